//! Compound-rule bookkeeping and compilation.
//!
//! `COMPOUNDRULE` sources are sequences where each character is either a
//! flag (standing for "any word carrying that flag") or a regex
//! metacharacter passed through verbatim. During dictionary expansion the
//! per-flag word lists fill in; afterwards each source compiles into a
//! case-insensitive whole-word pattern.

use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;

/// Words collected per compound-rule flag during expansion.
#[derive(Debug, Default)]
pub struct CompoundRuleCodes {
    lists: FxHashMap<String, Vec<String>>,
}

impl CompoundRuleCodes {
    /// Seed an empty list for every character of every source pattern,
    /// plus the `ONLYINCOMPOUND` flag when configured.
    ///
    /// Metacharacters get seeded too; their lists stay empty and are
    /// pruned after expansion.
    pub(crate) fn seed(sources: &[String], only_in_compound: Option<&str>) -> Self {
        let mut lists: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for source in sources {
            for ch in source.chars() {
                lists.entry(ch.to_string()).or_default();
            }
        }
        if let Some(flag) = only_in_compound {
            lists.entry(flag.to_string()).or_default();
        }
        Self { lists }
    }

    /// Whether `flag` participates in any compound rule.
    pub fn contains(&self, flag: &str) -> bool {
        self.lists.contains_key(flag)
    }

    /// The headwords collected under `flag`.
    pub fn words(&self, flag: &str) -> Option<&[String]> {
        self.lists.get(flag).map(Vec::as_slice)
    }

    /// Number of tracked flags.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether no flags are tracked.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub(crate) fn append(&mut self, flag: &str, word: &str) {
        if let Some(list) = self.lists.get_mut(flag) {
            list.push(word.to_string());
        }
    }

    pub(crate) fn prune_empty(&mut self) {
        self.lists.retain(|_, words| !words.is_empty());
    }
}

/// Compiled compound patterns; a word is compound-valid if any pattern
/// matches it in full.
#[derive(Debug, Default)]
pub struct CompoundRules {
    patterns: Vec<Regex>,
}

impl CompoundRules {
    /// Compile each source, splicing collected word lists in as
    /// alternations and passing other characters through verbatim.
    ///
    /// Words are regex-escaped so a headword cannot corrupt the pattern.
    /// A source that still fails to compile contributes nothing.
    pub fn compile(sources: &[String], codes: &CompoundRuleCodes) -> Self {
        let mut patterns = Vec::with_capacity(sources.len());
        for source in sources {
            let mut expr = String::new();
            for ch in source.chars() {
                match codes.words(ch.to_string().as_str()) {
                    Some(words) => {
                        expr.push('(');
                        let mut first = true;
                        for word in words {
                            if !first {
                                expr.push('|');
                            }
                            expr.push_str(&regex::escape(word));
                            first = false;
                        }
                        expr.push(')');
                    }
                    None => expr.push(ch),
                }
            }
            if let Ok(pattern) = RegexBuilder::new(&format!("^(?:{expr})$"))
                .case_insensitive(true)
                .build()
            {
                patterns.push(pattern);
            }
        }
        Self { patterns }
    }

    /// Whether any compiled pattern matches the whole word.
    pub fn matches(&self, word: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(word))
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns compiled.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_with(entries: &[(&str, &[&str])]) -> CompoundRuleCodes {
        let mut codes = CompoundRuleCodes::seed(
            &entries
                .iter()
                .map(|(flag, _)| flag.to_string())
                .collect::<Vec<_>>(),
            None,
        );
        for (flag, words) in entries {
            for word in *words {
                codes.append(flag, word);
            }
        }
        codes
    }

    #[test]
    fn seeding_covers_every_source_character() {
        let codes = CompoundRuleCodes::seed(&["xy*z".to_string()], Some("c"));
        for flag in ["x", "y", "*", "z", "c"] {
            assert!(codes.contains(flag));
        }
    }

    #[test]
    fn pruning_drops_untouched_flags() {
        let mut codes = CompoundRuleCodes::seed(&["xy".to_string()], None);
        codes.append("x", "foo");
        codes.prune_empty();
        assert!(codes.contains("x"));
        assert!(!codes.contains("y"));
    }

    #[test]
    fn compiled_rules_match_whole_words_case_insensitively() {
        let codes = codes_with(&[("x", &["foo", "bar"]), ("y", &["baz"])]);
        let rules = CompoundRules::compile(&["xy".to_string()], &codes);
        assert!(rules.matches("foobaz"));
        assert!(rules.matches("BarBaz"));
        assert!(!rules.matches("baz"));
        assert!(!rules.matches("foobazz"));
    }

    #[test]
    fn metacharacters_pass_through() {
        let codes = codes_with(&[("x", &["ab"])]);
        let rules = CompoundRules::compile(&["x*".to_string(), "xx".to_string()], &codes);
        assert!(rules.matches("ababab"));
        assert!(rules.matches("abab"));
        assert!(!rules.matches("aba"));
    }

    #[test]
    fn words_are_escaped_in_alternations() {
        let codes = codes_with(&[("x", &["a.b"])]);
        let rules = CompoundRules::compile(&["xx".to_string()], &codes);
        assert!(rules.matches("a.ba.b"));
        assert!(!rules.matches("aXba.b"));
    }
}
