//! Suggestion ranking.
//!
//! Candidates coming out of the BK-tree carry no useful order, so the
//! suggester imposes a layered total order relative to the query:
//!
//! 1. the query itself wins outright;
//! 2. a candidate whose normalized form equals the normalized query wins,
//!    checked per normalizer in chain order;
//! 3. smaller Damerau-Levenshtein distance over each normalizer's output;
//! 4. longer shared character-by-character prefix with the query;
//! 5. lexicographic order for a stable final tiebreak.
//!
//! The normalizer chain is lowercasing followed by collapsing pairs of
//! equal adjacent code points of the lowercased form ("speling" and
//! "spelling" collapse together). Every layer is deterministic and
//! transitive, so the comparator is a total order.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::distance::DamerauLevenshtein;

/// Default capacity of the normalized-forms memo.
pub(crate) const NORMALIZED_MEMO_CAPACITY: usize = 100_000;

/// The normalizer chain applied to one string, cached as a unit.
#[derive(Debug, Clone)]
struct NormalForms {
    lower: String,
    collapsed: String,
}

struct RankEntry {
    term: String,
    chars: Vec<char>,
    forms: NormalForms,
    lower_distance: usize,
    collapsed_distance: usize,
}

/// Shared ranking state: the transposition-aware distance calculator and
/// the normalized-forms memo.
#[derive(Debug)]
pub(crate) struct Ranker {
    damerau: DamerauLevenshtein,
    forms: LruCache<String, NormalForms>,
}

impl Ranker {
    pub(crate) fn new() -> Self {
        let capacity = NonZeroUsize::new(NORMALIZED_MEMO_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            damerau: DamerauLevenshtein::new(),
            forms: LruCache::new(capacity),
        }
    }

    /// Order `candidates` by similarity to `query`, best first.
    pub(crate) fn rank(&mut self, query: &str, candidates: Vec<String>) -> Vec<String> {
        let query_forms = self.forms(query);
        let query_chars: Vec<char> = query.chars().collect();

        let mut entries: Vec<RankEntry> = candidates
            .into_iter()
            .map(|term| {
                let forms = self.forms(&term);
                let lower_distance = self.damerau.distance(&forms.lower, &query_forms.lower);
                let collapsed_distance = self
                    .damerau
                    .distance(&forms.collapsed, &query_forms.collapsed);
                RankEntry {
                    chars: term.chars().collect(),
                    term,
                    forms,
                    lower_distance,
                    collapsed_distance,
                }
            })
            .collect();

        entries.sort_by(|a, b| compare(a, b, query, &query_forms, &query_chars));
        entries.into_iter().map(|entry| entry.term).collect()
    }

    fn forms(&mut self, word: &str) -> NormalForms {
        if let Some(forms) = self.forms.get(word) {
            return forms.clone();
        }
        let lower = word.to_lowercase();
        let collapsed = collapse_pairs(&lower);
        let forms = NormalForms { lower, collapsed };
        self.forms.put(word.to_string(), forms.clone());
        forms
    }
}

/// Collapse each pair of equal adjacent code points to a single one.
///
/// This is a single left-to-right pass, so a run of three equal characters
/// shrinks to two, not one.
fn collapse_pairs(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        out.push(chars[i]);
        i += if i + 1 < chars.len() && chars[i] == chars[i + 1] {
            2
        } else {
            1
        };
    }
    out
}

fn compare(
    a: &RankEntry,
    b: &RankEntry,
    query: &str,
    query_forms: &NormalForms,
    query_chars: &[char],
) -> Ordering {
    let a_exact = a.term == query;
    let b_exact = b.term == query;
    if a_exact != b_exact {
        return if a_exact { Ordering::Less } else { Ordering::Greater };
    }

    let equality_layers = [
        (
            a.forms.lower == query_forms.lower,
            b.forms.lower == query_forms.lower,
        ),
        (
            a.forms.collapsed == query_forms.collapsed,
            b.forms.collapsed == query_forms.collapsed,
        ),
    ];
    for (a_equal, b_equal) in equality_layers {
        if a_equal != b_equal {
            return if a_equal { Ordering::Less } else { Ordering::Greater };
        }
    }

    match a.lower_distance.cmp(&b.lower_distance) {
        Ordering::Equal => {}
        unequal => return unequal,
    }
    match a.collapsed_distance.cmp(&b.collapsed_distance) {
        Ordering::Equal => {}
        unequal => return unequal,
    }

    match prefix_affinity(&a.chars, &b.chars, query_chars) {
        Ordering::Equal => {}
        unequal => return unequal,
    }

    a.term.cmp(&b.term)
}

/// Longer run of leading characters shared with the query wins; the run
/// stops at each side's first mismatch.
fn prefix_affinity(a: &[char], b: &[char], query: &[char]) -> Ordering {
    shared_prefix_len(b, query).cmp(&shared_prefix_len(a, query))
}

fn shared_prefix_len(s: &[char], query: &[char]) -> usize {
    s.iter()
        .zip(query)
        .take_while(|(sc, qc)| sc == qc)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(query: &str, candidates: &[&str]) -> Vec<String> {
        Ranker::new().rank(query, candidates.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn collapse_pairs_halves_runs() {
        assert_eq!(collapse_pairs("spelling"), "speling");
        assert_eq!(collapse_pairs("aab"), "ab");
        assert_eq!(collapse_pairs("aaab"), "aab");
        assert_eq!(collapse_pairs(""), "");
    }

    #[test]
    fn exact_match_ranks_first() {
        let ranked = rank("word", &["wort", "word", "ward"]);
        assert_eq!(ranked[0], "word");
    }

    #[test]
    fn case_equality_beats_distance() {
        // "Word" equals the query after lowercasing; "ward" is one edit
        // away but never normalization-equal.
        let ranked = rank("word", &["ward", "Word"]);
        assert_eq!(ranked, ["Word", "ward"]);
    }

    #[test]
    fn collapsed_equality_beats_plain_distance() {
        // Both are one edit from "speling", but "spelling" collapses to
        // exactly the query.
        let ranked = rank("speling", &["sperling", "spelling"]);
        assert_eq!(ranked, ["spelling", "sperling"]);
    }

    #[test]
    fn transpositions_outrank_double_edits() {
        let ranked = rank("whastoever", &["whosoever", "whatsoever"]);
        assert_eq!(ranked, ["whatsoever", "whosoever"]);
    }

    #[test]
    fn shared_prefix_breaks_distance_ties() {
        // Both are a single substitution away; "abd" keeps the first two
        // query characters while "xbc" loses the first.
        let ranked = rank("abc", &["xbc", "abd"]);
        assert_eq!(ranked, ["abd", "xbc"]);
    }

    #[test]
    fn lexicographic_is_the_final_tiebreak() {
        // Equal distance, equal prefix behavior beyond the first char.
        let ranked = rank("cat", &["caz", "cay"]);
        assert_eq!(ranked, ["cay", "caz"]);
    }

    #[test]
    fn ranking_is_deterministic_across_input_orders() {
        let forward = rank("hostipal", &["hostile", "hospital", "hostel", "hosting"]);
        let backward = rank("hostipal", &["hosting", "hostel", "hospital", "hostile"]);
        assert_eq!(forward, backward);
    }
}
