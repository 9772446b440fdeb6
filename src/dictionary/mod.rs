//! The surface-form dictionary table and its expansion from `.dic` text.
//!
//! Expansion walks every `word/flags` line, admits the headword (unless it
//! exists only as an affixation base), applies each flagged affix rule —
//! including continuation classes and one-level prefix/suffix combination —
//! and records compound-rule memberships as it goes.

pub mod compound;

pub use compound::{CompoundRuleCodes, CompoundRules};

use rustc_hash::FxHashMap;

use crate::affix::{split_lines, AffixData};

/// Flag groups attached to one dictionary word.
///
/// Each inner list is one `.dic` membership of the same headword; an empty
/// outer list means the word is known with no flags at all. Either way the
/// word is accepted standalone unless every group carries the
/// `ONLYINCOMPOUND` flag.
pub type FlagGroups = Vec<Vec<String>>;

/// Mapping from every known surface form to its flag groups.
#[derive(Debug, Default)]
pub struct DictionaryTable {
    entries: FxHashMap<String, FlagGroups>,
}

impl DictionaryTable {
    /// Expand `.dic` text against parsed affix data.
    ///
    /// Returns the populated table together with the per-flag headword
    /// lists needed to compile compound rules.
    pub fn expand(dic: &str, affix: &AffixData) -> (Self, CompoundRuleCodes) {
        let mut table = Self::default();
        let mut codes = CompoundRuleCodes::seed(
            affix.compound_sources(),
            affix.directive("ONLYINCOMPOUND"),
        );
        let needaffix = affix.directive("NEEDAFFIX");

        let mut seen_count_line = false;
        for line in split_lines(dic) {
            // Tab-prefixed lines are comments.
            if line.starts_with('\t') {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            // The first non-empty line is the word-count hint; the actual
            // entries are counted, not trusted.
            if !seen_count_line {
                seen_count_line = true;
                continue;
            }

            let Some((word, flag_text)) = line.split_once('/') else {
                table.add_word(line, Vec::new());
                continue;
            };

            let rule_codes = affix.parse_flags(flag_text);

            let affix_only =
                needaffix.is_some_and(|flag| rule_codes.iter().any(|code| code == flag));
            if !affix_only {
                table.add_word(word, rule_codes.clone());
            }

            for (index, code) in rule_codes.iter().enumerate() {
                if let Some(rule) = affix.rule(code) {
                    let new_words = rule.apply(word, affix.rules());
                    for formed in &new_words {
                        table.add_word(formed, Vec::new());
                    }

                    if rule.combineable() {
                        // Cross-combine with later opposite-type rules,
                        // one level deep.
                        for other_code in &rule_codes[index + 1..] {
                            let Some(other) = affix.rule(other_code) else {
                                continue;
                            };
                            if !other.combineable() || other.kind() == rule.kind() {
                                continue;
                            }
                            for formed in &new_words {
                                for combined in other.apply_shallow(formed) {
                                    table.add_word(&combined, Vec::new());
                                }
                            }
                        }
                    }
                }

                // Compound membership records the original headword even
                // when the code names no affix rule.
                if codes.contains(code) {
                    codes.append(code, word);
                }
            }
        }

        codes.prune_empty();
        (table, codes)
    }

    /// Admit `word`, appending `rules` as one flag group when non-empty.
    ///
    /// A word admitted repeatedly accumulates one group per flagged
    /// admission; flagless admissions only establish presence.
    pub fn add_word(&mut self, word: &str, rules: Vec<String>) {
        let groups = self.entries.entry(word.to_string()).or_default();
        if !rules.is_empty() {
            groups.push(rules);
        }
    }

    /// Admit `word` with explicit flag groups, stored verbatim.
    pub fn add_word_groups(&mut self, word: &str, flag_groups: FlagGroups) {
        let groups = self.entries.entry(word.to_string()).or_default();
        groups.extend(flag_groups);
    }

    /// Remove `word` entirely. Returns whether it was present.
    pub fn remove(&mut self, word: &str) -> bool {
        self.entries.remove(word).is_some()
    }

    /// Whether `word` is known.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// The flag groups for `word`, if known.
    pub fn get(&self, word: &str) -> Option<&FlagGroups> {
        self.entries.get(word)
    }

    /// Iterate over every known surface form.
    pub fn words(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Number of known surface forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
