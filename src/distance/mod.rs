//! Edit-distance primitives.
//!
//! Two distances live here and they are deliberately not interchangeable:
//!
//! - [`levenshtein_distance`] is the plain insert/delete/substitute metric.
//!   It satisfies the triangle inequality and is the only distance the
//!   BK-tree is allowed to use for traversal pruning.
//! - [`DamerauLevenshtein`] adds adjacent transpositions (optimal string
//!   alignment). Transpositions match how humans mistype, which makes it the
//!   right choice for *ranking* suggestions, but it is not a metric and must
//!   never drive the tree.

use std::mem;
use std::num::NonZeroUsize;

use lru::LruCache;
use smallvec::SmallVec;

/// Default capacity of the Damerau-Levenshtein memo cache.
pub const DAMERAU_MEMO_CAPACITY: usize = 100_000;

/// Compute the Levenshtein distance between two strings.
///
/// Single-row dynamic programming over code points. Insertions, deletions
/// and substitutions each cost 1.
///
/// # Example
///
/// ```rust
/// use levenspell::distance::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// assert_eq!(levenshtein_distance("hostel", "hostel"), 0);
/// ```
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let source: Vec<char> = a.chars().collect();
    let target: Vec<char> = b.chars().collect();

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, &sc) in source.iter().enumerate() {
        // `diagonal` carries d[i][j] while row[j] is rewritten to d[i+1][j].
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, &tc) in target.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(sc != tc);
            row[j + 1] = (above + 1) // deletion
                .min(row[j] + 1) // insertion
                .min(diagonal + cost); // substitution
            diagonal = above;
        }
    }

    row[target.len()]
}

/// Damerau-Levenshtein (optimal string alignment) distance calculator.
///
/// Computes the minimum number of insertions, deletions, substitutions and
/// adjacent transpositions (each cost 1) between two code-point sequences.
///
/// The calculator owns its scratch rows, which grow monotonically to the
/// longest input seen and are reused across calls, and a bounded LRU memo
/// keyed by the unordered input pair. Ranking workloads compare one query
/// against many near-identical candidates, so both buffers pay for
/// themselves quickly.
///
/// # Example
///
/// ```rust
/// use levenspell::distance::DamerauLevenshtein;
///
/// let mut damerau = DamerauLevenshtein::new();
/// assert_eq!(damerau.distance("teh", "the"), 1); // one transposition
/// assert_eq!(damerau.distance("spelling", "speling"), 1);
/// ```
#[derive(Debug)]
pub struct DamerauLevenshtein {
    row: SmallVec<[usize; 64]>,
    trans_row: SmallVec<[usize; 64]>,
    memo: LruCache<String, usize>,
}

impl DamerauLevenshtein {
    /// Create a calculator with the default memo capacity.
    pub fn new() -> Self {
        Self::with_memo_capacity(DAMERAU_MEMO_CAPACITY)
    }

    /// Create a calculator with a custom memo capacity.
    pub fn with_memo_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            row: SmallVec::new(),
            trans_row: SmallVec::new(),
            memo: LruCache::new(capacity),
        }
    }

    /// Distance between `a` and `b`.
    ///
    /// Symmetric; `distance(a, "") == a.chars().count()`.
    pub fn distance(&mut self, a: &str, b: &str) -> usize {
        if a == b {
            return 0;
        }

        // The distance is symmetric, so one ordered key serves both call
        // orders. '\0' cannot occur inside a dictionary word.
        let key = if a <= b {
            format!("{a}\u{0}{b}")
        } else {
            format!("{b}\u{0}{a}")
        };
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }

        let computed = self.compute(a, b);
        self.memo.put(key, computed);
        computed
    }

    /// Drop all memoized results. Scratch rows keep their capacity.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    fn compute(&mut self, a: &str, b: &str) -> usize {
        let mut chars1: Vec<char> = a.chars().collect();
        let mut chars2: Vec<char> = b.chars().collect();

        // Keep the shorter sequence in chars1.
        if chars1.len() > chars2.len() {
            mem::swap(&mut chars1, &mut chars2);
        }

        let mut len1 = chars1.len();
        let mut len2 = chars2.len();

        // Strip the common suffix, then the common prefix. Only the
        // differing core region takes part in the DP.
        while len1 > 0 && chars1[len1 - 1] == chars2[len2 - 1] {
            len1 -= 1;
            len2 -= 1;
        }
        let mut start = 0;
        while start < len1 && chars1[start] == chars2[start] {
            start += 1;
        }
        len1 -= start;
        len2 -= start;

        if len1 == 0 {
            return len2;
        }

        if self.row.len() < len2 {
            self.row.resize(len2, 0);
            self.trans_row.resize(len2, 0);
        }
        for j in 0..len2 {
            self.row[j] = j + 1;
            self.trans_row[j] = 0;
        }

        // Two-row DP. `trans_row` trails one extra row behind so that the
        // transposition case can reach the diagonal-of-diagonal cell.
        let mut current = 0;
        let mut char1 = '\u{0}';
        for i in 0..len1 {
            let prev_char1 = char1;
            char1 = chars1[start + i];
            let mut char2 = '\u{0}';
            let mut left = i;
            current = i + 1;
            let mut next_trans_cost = 0;

            for j in 0..len2 {
                let above = current;
                let this_trans_cost = next_trans_cost;
                next_trans_cost = self.trans_row[j];
                self.trans_row[j] = left;
                current = left;
                left = self.row[j];
                let prev_char2 = char2;
                char2 = chars2[start + j];

                if char1 != char2 {
                    if left < current {
                        current = left;
                    }
                    if above < current {
                        current = above;
                    }
                    current += 1;
                    if i != 0 && j != 0 && char1 == prev_char2 && prev_char1 == char2 {
                        let transposed = this_trans_cost + 1;
                        if transposed < current {
                            current = transposed;
                        }
                    }
                }
                self.row[j] = current;
            }
        }

        current
    }
}

impl Default for DamerauLevenshtein {
    fn default() -> Self {
        Self::new()
    }
}
