//! The spell checker facade: construction, membership checks, and
//! suggestion generation.
//!
//! Construction parses the affix definitions, expands the word list into
//! the surface-form table, and compiles the compound rules. The BK-tree is
//! built lazily on the first suggestion query (or eagerly via
//! [`SpellChecker::init_bk_tree`]).
//!
//! Mutators take `&self` and synchronize internally, following the
//! dynamic-dictionary convention: read-only concurrent queries are safe,
//! but a reader racing a mutator may observe the table updated before the
//! tree. Removal deliberately never prunes the tree — stale terms are
//! filtered against the table at query time.

mod builder;
mod rank;

pub use builder::{BuilderError, SpellCheckerBuilder};

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use crate::affix::AffixData;
use crate::bk_tree::BkTree;
use crate::dictionary::{CompoundRules, DictionaryTable, FlagGroups};
use rank::Ranker;

/// Default capacity of the suggestion memo.
pub const SUGGESTION_MEMO_CAPACITY: usize = 10_000;

/// Options accepted by [`SpellChecker::suggest_with`].
///
/// `max_dist` below `1.0` is a fraction of the query length; at `1.0` or
/// above it is an absolute Levenshtein radius. Queries of one character
/// always use radius 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestOptions {
    /// Search radius, fractional or absolute. Defaults to `0.2`.
    pub max_dist: f64,
    /// Maximum number of suggestions returned. Defaults to unbounded.
    pub limit: Option<usize>,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_dist: 0.2,
            limit: None,
        }
    }
}

impl SuggestOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search radius.
    pub fn max_dist(mut self, max_dist: f64) -> Self {
        self.max_dist = max_dist;
        self
    }

    /// Cap the number of suggestions.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

type SuggestionKey = (String, u64, Option<usize>);

/// A Hunspell-style spell checker.
///
/// # Example
///
/// ```rust
/// use levenspell::prelude::*;
///
/// let affixes = "SFX S Y 1\nSFX S 0 s .\n";
/// let words = "3\nhospital/S\nhostel/S\nhosting\n";
/// let checker = SpellChecker::from_strings(affixes, words);
///
/// assert!(checker.check("hospitals"));
/// assert!(!checker.check("hostipal"));
/// let options = SuggestOptions::new().max_dist(5.0).limit(2);
/// assert_eq!(
///     checker.suggest_with("hostipal", options),
///     ["hospital", "hosting"]
/// );
/// ```
#[derive(Debug)]
pub struct SpellChecker {
    affix: AffixData,
    compound_rules: CompoundRules,
    table: RwLock<DictionaryTable>,
    tree: RwLock<Option<BkTree>>,
    ranker: Mutex<Ranker>,
    suggestion_memo: Mutex<LruCache<SuggestionKey, Vec<String>>>,
}

impl SpellChecker {
    /// Construct from `.aff` and `.dic` content.
    pub fn from_strings(affixes: &str, dictionary: &str) -> Self {
        Self::with_flags(affixes, dictionary, Vec::new())
    }

    /// Start a [`SpellCheckerBuilder`].
    pub fn builder() -> SpellCheckerBuilder {
        SpellCheckerBuilder::new()
    }

    pub(crate) fn with_flags(
        affixes: &str,
        dictionary: &str,
        seeds: Vec<(String, String)>,
    ) -> Self {
        let affix = AffixData::parse_with_seeds(affixes, seeds);
        let (table, codes) = DictionaryTable::expand(dictionary, &affix);
        let compound_rules = CompoundRules::compile(affix.compound_sources(), &codes);
        let memo_capacity =
            NonZeroUsize::new(SUGGESTION_MEMO_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            affix,
            compound_rules,
            table: RwLock::new(table),
            tree: RwLock::new(None),
            ranker: Mutex::new(Ranker::new()),
            suggestion_memo: Mutex::new(LruCache::new(memo_capacity)),
        }
    }

    /// The parsed affix data.
    pub fn affix(&self) -> &AffixData {
        &self.affix
    }

    /// Check a word, tolerating capitalization variants.
    ///
    /// All-caps queries fall back to their title-cased and lowercased
    /// forms; initial-capital queries fall back to an initial-lowercase
    /// form. A fallback flagged `KEEPCASE` rejects the variant outright.
    /// Empty (or all-whitespace) input is not a word.
    pub fn check(&self, word: &str) -> bool {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.check_exact(trimmed) {
            return true;
        }

        if trimmed == trimmed.to_uppercase() {
            let capitalized = title_case(trimmed);
            if self.has_flag(&capitalized, "KEEPCASE", None) {
                return false;
            }
            if self.check_exact(&capitalized) {
                return true;
            }
            if self.check_exact(&trimmed.to_lowercase()) {
                return true;
            }
        }

        let lowered = lower_first(trimmed);
        if lowered != trimmed {
            if self.has_flag(&lowered, "KEEPCASE", None) {
                return false;
            }
            if self.check_exact(&lowered) {
                return true;
            }
        }

        false
    }

    /// Check a word exactly as written.
    ///
    /// An unknown word can still pass as a compound when `COMPOUNDMIN` is
    /// configured, the word is long enough, and a compound rule matches it
    /// in full. A known word with flag groups passes only if some group
    /// permits standalone use (lacks the `ONLYINCOMPOUND` flag).
    pub fn check_exact(&self, word: &str) -> bool {
        {
            let table = self.table.read();
            if let Some(groups) = table.get(word) {
                if groups.is_empty() {
                    return true;
                }
                // Standalone-acceptable if some flag group lacks the
                // ONLYINCOMPOUND flag.
                return groups
                    .iter()
                    .any(|group| !self.has_flag(word, "ONLYINCOMPOUND", Some(group)));
            }
        }

        match self.compound_min() {
            Some(min) if word.chars().count() >= min => self.compound_rules.matches(word),
            _ => false,
        }
    }

    /// Whether `word` carries the flag named by `directive`.
    ///
    /// With a `group_override`, only that flag group is inspected;
    /// otherwise the union of all flag groups recorded for `word` is.
    /// False when the directive is unconfigured or, absent an override,
    /// the word is unknown.
    pub fn has_flag(&self, word: &str, directive: &str, group_override: Option<&[String]>) -> bool {
        let Some(flag) = self.affix.directive(directive) else {
            return false;
        };
        match group_override {
            Some(group) => group.iter().any(|f| f == flag),
            None => {
                let table = self.table.read();
                let Some(groups) = table.get(word) else {
                    return false;
                };
                groups.iter().any(|group| group.iter().any(|f| f == flag))
            }
        }
    }

    /// Suggest replacements for `word` with default options.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        self.suggest_with(word, SuggestOptions::default())
    }

    /// Suggest replacements for `word`.
    ///
    /// Queries the BK-tree within the effective radius, drops candidates
    /// no longer present in the dictionary table, ranks the rest, and
    /// truncates to the limit. Results are memoized per `(word, options)`
    /// until the dictionary mutates.
    pub fn suggest_with(&self, word: &str, options: SuggestOptions) -> Vec<String> {
        if word.is_empty() {
            return Vec::new();
        }

        let key: SuggestionKey = (word.to_string(), options.max_dist.to_bits(), options.limit);
        if let Some(cached) = self.suggestion_memo.lock().get(&key) {
            return cached.clone();
        }

        self.init_bk_tree();
        let radius = effective_radius(word, options.max_dist);
        let candidates = {
            let tree = self.tree.read();
            tree.as_ref()
                .map(|t| t.query(word, radius))
                .unwrap_or_default()
        };

        // Removed words may linger in the tree; the table decides.
        let kept: Vec<String> = {
            let table = self.table.read();
            candidates
                .into_iter()
                .filter(|candidate| table.contains(&candidate.term))
                .map(|candidate| candidate.term)
                .collect()
        };

        let mut ranked = self.ranker.lock().rank(word, kept);
        if let Some(limit) = options.limit {
            ranked.truncate(limit);
        }

        self.suggestion_memo.lock().put(key, ranked.clone());
        ranked
    }

    /// Build the BK-tree now instead of on the first suggestion.
    pub fn init_bk_tree(&self) {
        if self.tree.read().is_some() {
            return;
        }
        let terms: Vec<String> = {
            let table = self.table.read();
            table.words().cloned().collect()
        };
        let built = BkTree::from_terms(terms);
        let mut tree = self.tree.write();
        if tree.is_none() {
            *tree = Some(built);
        }
    }

    /// Add a word with no flags.
    pub fn add_word(&self, word: &str) {
        self.add_word_with_flags(word, Vec::new());
    }

    /// Add a word with explicit flag groups, stored verbatim (no affix
    /// expansion is applied).
    pub fn add_word_with_flags(&self, word: &str, flag_groups: FlagGroups) {
        self.table.write().add_word_groups(word, flag_groups);
        if let Some(tree) = self.tree.write().as_mut() {
            tree.insert(word);
        }
        self.suggestion_memo.lock().clear();
    }

    /// Remove a word.
    ///
    /// The BK-tree is left untouched; suggestion filtering hides the
    /// removed term.
    pub fn remove_word(&self, word: &str) {
        self.table.write().remove(word);
        self.suggestion_memo.lock().clear();
    }

    /// Every currently known surface form, in unspecified order.
    pub fn words(&self) -> Vec<String> {
        self.table.read().words().cloned().collect()
    }

    /// Number of currently known surface forms.
    pub fn word_count(&self) -> usize {
        self.table.read().len()
    }

    fn compound_min(&self) -> Option<usize> {
        self.affix
            .directive("COMPOUNDMIN")
            .and_then(|value| value.parse().ok())
    }
}

/// Effective BK-tree radius for a query under the given `max_dist`.
fn effective_radius(word: &str, max_dist: f64) -> usize {
    let len = word.chars().count();
    if len == 1 {
        return 1;
    }
    if max_dist < 1.0 {
        let fractional = (len as f64 * max_dist).ceil() as usize;
        fractional.min(len - 1)
    } else {
        max_dist as usize
    }
}

/// First character kept, the rest lowercased.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first);
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// First character lowercased, the rest kept.
fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "\
SET UTF-8
KEEPCASE k
NEEDAFFIX n
ONLYINCOMPOUND c
COMPOUNDMIN 6
COMPOUNDRULE 1
COMPOUNDRULE xy

PFX A Y 1
PFX A 0 re .

SFX S Y 2
SFX S 0 s [^sxy]
SFX S y ies y
";

    const DIC: &str = "\
10
hospital/S
hostile
hosting
hostel/S
London/k
anti/x
body/y
stem/nS
frag/c
walk/AS
";

    fn checker() -> SpellChecker {
        SpellChecker::from_strings(AFF, DIC)
    }

    #[test]
    fn known_words_check() {
        let c = checker();
        for word in ["hospital", "hospitals", "hostile", "walk", "rewalks"] {
            assert!(c.check(word), "expected {word} to check");
        }
        assert!(!c.check("hostipal"));
    }

    #[test]
    fn whitespace_is_trimmed_and_empty_fails() {
        let c = checker();
        assert!(c.check("  hospital "));
        assert!(!c.check(""));
        assert!(!c.check("   "));
    }

    #[test]
    fn all_caps_words_fall_back_to_known_casings() {
        let c = checker();
        assert!(c.check("HOSPITAL"));
        assert!(c.check("London"));
        // The title-cased probe carries KEEPCASE, which vetoes the
        // all-caps query outright.
        assert!(!c.check("LONDON"));
    }

    #[test]
    fn keepcase_blocks_title_cased_fallback() {
        // LONDON's title-cased form carries KEEPCASE, so the all-caps
        // query is rejected before the lowercase probe... unless the exact
        // form is present. Only the fallback path is blocked.
        let aff = "KEEPCASE k\n";
        let dic = "1\nLondon/k\n";
        let c = SpellChecker::from_strings(aff, dic);
        assert!(c.check("London"));
        assert!(!c.check("LONDON"));
        assert!(!c.check("london"));
    }

    #[test]
    fn initial_capital_falls_back_to_lowercase_first_char() {
        let c = checker();
        assert!(c.check("Hospital"));
        assert!(!c.check("HoSpItAl"));
    }

    #[test]
    fn needaffix_base_is_rejected_but_forms_check() {
        let c = checker();
        assert!(!c.check("stem"));
        assert!(c.check("stems"));
    }

    #[test]
    fn onlyincompound_words_are_rejected_standalone() {
        let c = checker();
        assert!(!c.check("frag"));
        assert!(!c.check_exact("frag"));
    }

    #[test]
    fn compound_rule_accepts_long_enough_matches() {
        let c = checker();
        assert!(c.check("antibody"));
        assert!(c.check_exact("AntiBody"));
        // "anti" alone is a dictionary word; "body" too.
        assert!(c.check("anti"));
        // Below COMPOUNDMIN nothing compound-matches.
        assert!(!c.check("antix"));
        assert!(!c.check("bodyanti"));
    }

    #[test]
    fn compound_fallback_requires_compoundmin() {
        let c = SpellChecker::from_strings("COMPOUNDRULE 1\nCOMPOUNDRULE xy\n", "2\nanti/x\nbody/y\n");
        // No COMPOUNDMIN directive: unknown words never compound-match.
        assert!(!c.check("antibody"));
    }

    #[test]
    fn has_flag_reads_the_directive_map() {
        let c = checker();
        assert!(c.has_flag("London", "KEEPCASE", None));
        assert!(!c.has_flag("hospital", "KEEPCASE", None));
        assert!(!c.has_flag("hospital", "NOSUCHDIRECTIVE", None));
        assert!(!c.has_flag("unknown", "KEEPCASE", None));
    }

    #[test]
    fn has_flag_group_override_restricts_the_check() {
        let c = checker();
        c.add_word_with_flags(
            "dual",
            vec![vec!["k".to_string()], vec!["S".to_string()]],
        );

        let keepcase_group = vec!["k".to_string()];
        let plural_group = vec!["S".to_string()];
        // The union over all groups sees the flag; a single-group
        // override only sees what that group carries.
        assert!(c.has_flag("dual", "KEEPCASE", None));
        assert!(c.has_flag("dual", "KEEPCASE", Some(&keepcase_group)));
        assert!(!c.has_flag("dual", "KEEPCASE", Some(&plural_group)));
        // An unconfigured directive never resolves, override or not.
        assert!(!c.has_flag("dual", "NOSUCHDIRECTIVE", Some(&keepcase_group)));
    }

    #[test]
    fn effective_radius_rules() {
        assert_eq!(effective_radius("a", 0.2), 1);
        assert_eq!(effective_radius("ab", 0.2), 1);
        // ceil(8 * 0.2) = 2
        assert_eq!(effective_radius("hostipal", 0.2), 2);
        // Fractional radius is capped at len - 1.
        assert_eq!(effective_radius("abc", 0.99), 2);
        // Absolute radius passes through.
        assert_eq!(effective_radius("hostipal", 5.0), 5);
    }

    #[test]
    fn suggest_empty_input_is_empty() {
        let c = checker();
        assert!(c.suggest("").is_empty());
    }

    #[test]
    fn suggest_finds_neighbors() {
        let c = checker();
        let options = SuggestOptions::new().max_dist(5.0).limit(3);
        let suggestions = c.suggest_with("hostipal", options);
        assert_eq!(suggestions[0], "hospital");
        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn suggest_respects_limit_prefix_property() {
        let c = checker();
        let wide = c.suggest_with("hostipal", SuggestOptions::new().max_dist(5.0));
        let narrow = c.suggest_with("hostipal", SuggestOptions::new().max_dist(5.0).limit(2));
        assert_eq!(narrow.as_slice(), &wide[..2]);
    }

    #[test]
    fn suggest_is_memoized_and_invalidated() {
        let c = checker();
        let options = SuggestOptions::new().max_dist(5.0);
        let before = c.suggest_with("hostipal", options);
        assert_eq!(c.suggest_with("hostipal", options), before);

        c.add_word("hostipal");
        let after = c.suggest_with("hostipal", options);
        assert_eq!(after.first().map(String::as_str), Some("hostipal"));
        assert_ne!(before, after);
    }

    #[test]
    fn removed_words_disappear_from_suggestions() {
        let c = checker();
        let options = SuggestOptions::new().max_dist(5.0);
        c.init_bk_tree();
        assert!(c
            .suggest_with("hostipal", options)
            .contains(&"hospital".to_string()));

        c.remove_word("hospital");
        assert!(!c.check("hospital"));
        assert!(!c
            .suggest_with("hostipal", options)
            .contains(&"hospital".to_string()));
    }

    #[test]
    fn added_words_reach_an_already_built_tree() {
        let c = checker();
        c.init_bk_tree();
        c.add_word("hostipan");
        let suggestions = c.suggest_with("hostipal", SuggestOptions::new().max_dist(2.0));
        assert!(suggestions.contains(&"hostipan".to_string()));
    }

    #[test]
    fn add_word_with_flags_stores_groups_verbatim() {
        let c = checker();
        c.add_word_with_flags("bespoke", vec![vec!["k".to_string()]]);
        assert!(c.check("bespoke"));
        assert!(c.has_flag("bespoke", "KEEPCASE", None));
        // The initial-lowercase fallback is vetoed by KEEPCASE.
        assert!(!c.check("Bespoke"));
    }

    #[test]
    fn words_reflects_mutations() {
        let c = checker();
        let baseline = c.word_count();
        c.add_word("brandnew");
        assert_eq!(c.word_count(), baseline + 1);
        assert!(c.words().contains(&"brandnew".to_string()));
        c.remove_word("brandnew");
        assert_eq!(c.word_count(), baseline);
    }
}
