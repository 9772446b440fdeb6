//! Affix rules and their application to headwords.

use regex::Regex;
use rustc_hash::FxHashMap;

/// Which side of the word a rule operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    /// `PFX`: prepends to the word.
    Prefix,
    /// `SFX`: appends to the word.
    Suffix,
}

/// Removal applied before the affix text is attached.
#[derive(Debug, Clone)]
pub enum Strip {
    /// Nothing is removed (`0` in the entry line).
    None,
    /// A literal removed from the front of the word (prefix rules).
    Literal(String),
    /// An end-anchored pattern removed from the word (suffix rules).
    Pattern(Regex),
}

/// One entry line of a `PFX`/`SFX` block.
#[derive(Debug, Clone)]
pub struct AffixEntry {
    pub(crate) matcher: Option<Regex>,
    pub(crate) strip: Strip,
    pub(crate) add: String,
    pub(crate) continuation: Vec<String>,
}

impl AffixEntry {
    /// The literal text this entry attaches.
    pub fn add(&self) -> &str {
        &self.add
    }

    /// Continuation-class flags that chain further rules onto the
    /// produced form.
    pub fn continuation(&self) -> &[String] {
        &self.continuation
    }

    /// Whether this entry's condition admits `word`.
    pub fn matches(&self, word: &str) -> bool {
        self.matcher.as_ref().map_or(true, |m| m.is_match(word))
    }

    /// Produce the surface form this entry generates from `word`.
    pub fn build(&self, word: &str, kind: AffixKind) -> String {
        match kind {
            AffixKind::Suffix => {
                let stem = match &self.strip {
                    Strip::Pattern(pattern) => pattern.replace(word, "").into_owned(),
                    _ => word.to_string(),
                };
                format!("{stem}{}", self.add)
            }
            AffixKind::Prefix => {
                let stem = match &self.strip {
                    Strip::Literal(literal) => word.strip_prefix(literal.as_str()).unwrap_or(word),
                    _ => word,
                };
                format!("{}{stem}", self.add)
            }
        }
    }
}

/// An affix rule: the ordered entries registered under one flag.
#[derive(Debug, Clone)]
pub struct AffixRule {
    pub(crate) kind: AffixKind,
    pub(crate) combineable: bool,
    pub(crate) entries: Vec<AffixEntry>,
}

impl AffixRule {
    pub(crate) fn new(kind: AffixKind, combineable: bool, entries: Vec<AffixEntry>) -> Self {
        Self {
            kind,
            combineable,
            entries,
        }
    }

    /// Prefix or suffix.
    pub fn kind(&self) -> AffixKind {
        self.kind
    }

    /// Whether this rule may cross-combine with an opposite-type rule.
    pub fn combineable(&self) -> bool {
        self.combineable
    }

    /// The rule's entries in file order.
    pub fn entries(&self) -> &[AffixEntry] {
        &self.entries
    }

    /// Apply every matching entry to `word` and chase continuation
    /// classes through `rules`, depth first.
    ///
    /// Continuation flags that name no rule are skipped; real dictionaries
    /// contain such flags. Termination relies on the rule graph being
    /// finitely recursive, which holds for real affix files.
    pub fn apply(&self, word: &str, rules: &FxHashMap<String, AffixRule>) -> Vec<String> {
        let mut produced = Vec::new();
        for entry in &self.entries {
            if !entry.matches(word) {
                continue;
            }
            let formed = entry.build(word, self.kind);
            produced.push(formed.clone());
            for class in &entry.continuation {
                if let Some(next) = rules.get(class) {
                    produced.extend(next.apply(&formed, rules));
                }
            }
        }
        produced
    }

    /// Apply matching entries only, without chaining continuation classes.
    ///
    /// This is the one-level combination step: when a combineable prefix
    /// and suffix meet on the same headword, the second rule contributes
    /// its direct forms and nothing deeper.
    pub fn apply_shallow(&self, word: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.matches(word))
            .map(|entry| entry.build(word, self.kind))
            .collect()
    }
}
