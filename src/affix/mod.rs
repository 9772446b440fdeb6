//! Affix definitions parsed from Hunspell `.aff` text.
//!
//! The parser is deliberately permissive: real-world affix files contain
//! directives this crate never consults, missing fields, and continuation
//! flags that name no rule. Everything unrecognized is either stored in an
//! open-ended directive map or silently skipped; parsing never fails.

mod parser;
pub mod rules;

pub use rules::{AffixEntry, AffixKind, AffixRule, Strip};

use rustc_hash::FxHashMap;

pub(crate) use parser::split_lines;

/// Physical encoding of flag tokens, set by the `FLAG` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagMode {
    /// One flag per code point (Hunspell default).
    #[default]
    Short,
    /// Fixed-width two-character flags (`FLAG long`).
    Long,
    /// Comma-separated numeric flags (`FLAG num`).
    Numeric,
    /// One flag per Unicode scalar (`FLAG UTF-8`).
    Utf8,
}

impl FlagMode {
    pub(crate) fn from_value(value: &str) -> Self {
        match value {
            "long" => Self::Long,
            "num" => Self::Numeric,
            "UTF-8" => Self::Utf8,
            _ => Self::Short,
        }
    }

    /// Split a flag string into individual flag tokens.
    pub fn parse(self, text: &str) -> Vec<String> {
        match self {
            // A `char` is a Unicode scalar, so the default and UTF-8 modes
            // split identically here.
            Self::Short | Self::Utf8 => text.chars().map(String::from).collect(),
            Self::Long => {
                let chars: Vec<char> = text.chars().collect();
                chars
                    .chunks(2)
                    .map(|pair| pair.iter().collect())
                    .collect()
            }
            Self::Numeric => text.split(',').map(str::to_string).collect(),
        }
    }
}

/// Everything extracted from an `.aff` file.
///
/// Holds the affix rule table, the open-ended directive map, the `REP`
/// replacement table and the raw `COMPOUNDRULE` source patterns. Only a
/// handful of directives (`FLAG`, `COMPOUNDMIN`, `ONLYINCOMPOUND`,
/// `KEEPCASE`, `NEEDAFFIX`) are ever consulted; the rest ride along in the
/// map untouched.
#[derive(Debug, Default)]
pub struct AffixData {
    pub(crate) rules: FxHashMap<String, AffixRule>,
    pub(crate) directives: FxHashMap<String, String>,
    pub(crate) replacements: Vec<(String, String)>,
    pub(crate) compound_sources: Vec<String>,
    pub(crate) flag_mode: FlagMode,
}

impl AffixData {
    /// Parse `.aff` text.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_seeds(text, std::iter::empty())
    }

    /// Parse `.aff` text on top of pre-seeded directives.
    ///
    /// Seeds are applied first, so a directive that also appears in the
    /// text is overridden by the text. A seeded `FLAG` switches the flag
    /// encoding before any rule line is read.
    pub fn parse_with_seeds<I>(text: &str, seeds: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut data = Self::default();
        for (name, value) in seeds {
            if name == "FLAG" {
                data.flag_mode = FlagMode::from_value(&value);
            }
            data.directives.insert(name, value);
        }
        parser::parse_into(&mut data, text);
        data
    }

    /// Split a flag string under the current flag encoding.
    pub fn parse_flags(&self, text: &str) -> Vec<String> {
        self.flag_mode.parse(text)
    }

    /// Look up a directive's recorded value.
    pub fn directive(&self, name: &str) -> Option<&str> {
        self.directives.get(name).map(String::as_str)
    }

    /// Look up the affix rule registered under `flag`.
    pub fn rule(&self, flag: &str) -> Option<&AffixRule> {
        self.rules.get(flag)
    }

    /// The full rule table.
    pub fn rules(&self) -> &FxHashMap<String, AffixRule> {
        &self.rules
    }

    /// `(from, to)` pairs from the `REP` table, in file order.
    pub fn replacements(&self) -> &[(String, String)] {
        &self.replacements
    }

    /// Raw `COMPOUNDRULE` patterns, in file order.
    pub fn compound_sources(&self) -> &[String] {
        &self.compound_sources
    }

    /// The active flag encoding.
    pub fn flag_mode(&self) -> FlagMode {
        self.flag_mode
    }
}
