//! Builder for [`SpellChecker`] instances.

use crate::speller::SpellChecker;

/// Error type for builder validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// No affix definitions were provided.
    #[error("Affix definitions are required. Use .affixes() to set them.")]
    MissingAffixes,
    /// No dictionary word list was provided.
    #[error("A dictionary word list is required. Use .dictionary() to set it.")]
    MissingDictionary,
}

/// Fluent construction of a [`SpellChecker`].
///
/// # Example
///
/// ```rust
/// use levenspell::prelude::*;
///
/// let checker = SpellCheckerBuilder::new()
///     .affixes("SFX S Y 1\nSFX S 0 s .\n")
///     .dictionary("1\nword/S\n")
///     .flag("COMPOUNDMIN", "4")
///     .build()
///     .unwrap();
///
/// assert!(checker.check("words"));
/// ```
#[derive(Debug, Default)]
pub struct SpellCheckerBuilder {
    affixes: Option<String>,
    dictionary: Option<String>,
    flags: Vec<(String, String)>,
}

impl SpellCheckerBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `.aff` content.
    pub fn affixes(mut self, affixes: impl Into<String>) -> Self {
        self.affixes = Some(affixes.into());
        self
    }

    /// Set the `.dic` content.
    pub fn dictionary(mut self, dictionary: impl Into<String>) -> Self {
        self.dictionary = Some(dictionary.into());
        self
    }

    /// Pre-seed a flag directive.
    ///
    /// Seeded directives are merged with — and overridden by — directives
    /// read from the affix text.
    pub fn flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.push((name.into(), value.into()));
        self
    }

    /// Build the checker.
    ///
    /// # Errors
    ///
    /// Returns an error if the affix text or the dictionary text was not
    /// supplied.
    pub fn build(self) -> Result<SpellChecker, BuilderError> {
        let affixes = self.affixes.ok_or(BuilderError::MissingAffixes)?;
        let dictionary = self.dictionary.ok_or(BuilderError::MissingDictionary)?;
        Ok(SpellChecker::with_flags(&affixes, &dictionary, self.flags))
    }
}
