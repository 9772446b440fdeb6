//! # levenspell
//!
//! Hunspell-style spell checking with edit-distance suggestions.
//!
//! The crate answers two questions about a token: is it a known word
//! (tolerating capitalization variants), and which known words are
//! nearest to it by a human-friendly notion of similarity.
//!
//! Three subsystems carry the weight:
//!
//! 1. **Affix expansion** ([`affix`], [`dictionary`]) parses Hunspell
//!    `.aff`/`.dic` text and materializes every surface form generated by
//!    prefix/suffix rules, continuation classes, and compound-rule
//!    membership.
//! 2. **A BK-tree** ([`bk_tree`]) indexes the surface forms in a metric
//!    space keyed by Levenshtein distance, answering radius queries
//!    without scanning the whole dictionary.
//! 3. **A suggestion ranker** ([`speller`]) orders the candidates:
//!    exact match, normalization-equivalent match, Damerau-Levenshtein
//!    proximity, shared-prefix length, lexicographic tiebreak.
//!
//! ## Example
//!
//! ```rust
//! use levenspell::prelude::*;
//!
//! let affixes = "SFX S Y 1\nSFX S 0 s .\n";
//! let words = "2\nspelling/S\nspeeding/S\n";
//! let checker = SpellChecker::from_strings(affixes, words);
//!
//! assert!(checker.check("spellings"));
//! assert_eq!(
//!     checker.suggest_with("speling", SuggestOptions::new().max_dist(2.0)),
//!     ["spelling", "spellings", "speeding"]
//! );
//! ```
//!
//! Inputs are plain strings; file I/O, locale-aware case folding, and
//! compound-word *generation* stay outside the crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod affix;
pub mod bk_tree;
pub mod dictionary;
pub mod distance;
pub mod speller;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::affix::AffixData;
    pub use crate::bk_tree::BkTree;
    pub use crate::dictionary::DictionaryTable;
    pub use crate::distance::{levenshtein_distance, DamerauLevenshtein};
    pub use crate::speller::{
        BuilderError, SpellChecker, SpellCheckerBuilder, SuggestOptions,
    };
}
