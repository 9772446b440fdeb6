//! Burkhard-Keller tree over dictionary terms.
//!
//! The tree indexes strings in a metric space keyed by Levenshtein
//! distance: every child edge is labeled with the distance between the
//! child's term and its parent's term, and a node has at most one child
//! per label. Radius queries then use the triangle inequality to descend
//! only into edges within `[d - radius, d + radius]` of the node's own
//! distance `d` to the query.
//!
//! Traversal correctness depends on the distance being a true metric, so
//! the tree always measures with [`levenshtein_distance`] — never the
//! transposition-aware ranking distance.

use rustc_hash::FxHashMap;

use crate::distance::levenshtein_distance;

/// A term matched by a radius query, together with its distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The matching term.
    pub term: String,
    /// Levenshtein distance from the query.
    pub distance: usize,
}

/// A single tree node: a pivot term plus distance-labeled children.
#[derive(Debug, Clone)]
pub struct BkNode {
    term: String,
    children: FxHashMap<usize, BkNode>,
}

impl BkNode {
    fn new(term: String) -> Self {
        Self {
            term,
            children: FxHashMap::default(),
        }
    }

    /// The pivot term stored at this node.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Iterate over `(edge distance, child)` pairs.
    pub fn children(&self) -> impl Iterator<Item = (usize, &BkNode)> {
        self.children.iter().map(|(&d, node)| (d, node))
    }
}

/// BK-tree supporting insertion and Levenshtein radius queries.
///
/// # Example
///
/// ```rust
/// use levenspell::bk_tree::BkTree;
///
/// let mut tree = BkTree::new();
/// for term in ["book", "books", "boo", "cake", "cape"] {
///     tree.insert(term);
/// }
///
/// let mut hits: Vec<String> = tree
///     .query("bo", 2)
///     .into_iter()
///     .map(|c| c.term)
///     .collect();
/// hits.sort();
/// assert_eq!(hits, ["boo", "book"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BkTree {
    root: Option<Box<BkNode>>,
    len: usize,
}

impl BkTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a list of terms.
    ///
    /// The last term becomes the root of the empty tree and the remaining
    /// terms are inserted in order.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        let mut tree = Self::new();
        if let Some(root) = terms.pop() {
            tree.insert(&root);
        }
        for term in &terms {
            tree.insert(term);
        }
        tree
    }

    /// Number of distinct terms in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no terms.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree has been populated.
    pub fn root(&self) -> Option<&BkNode> {
        self.root.as_deref()
    }

    /// Insert a term. Inserting a term already present is a no-op.
    pub fn insert(&mut self, term: &str) {
        let Some(root) = self.root.as_mut() else {
            self.root = Some(Box::new(BkNode::new(term.to_string())));
            self.len = 1;
            return;
        };

        let mut node: &mut BkNode = root;
        loop {
            let distance = levenshtein_distance(&node.term, term);
            if distance == 0 {
                return;
            }
            match node.children.entry(distance) {
                std::collections::hash_map::Entry::Occupied(entry) => {
                    node = entry.into_mut();
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(BkNode::new(term.to_string()));
                    self.len += 1;
                    return;
                }
            }
        }
    }

    /// Collect every term within `radius` Levenshtein edits of `query`.
    ///
    /// Result order is unspecified; callers rank the candidates.
    pub fn query(&self, query: &str, radius: usize) -> Vec<Candidate> {
        let mut results = Vec::new();
        let Some(root) = self.root.as_deref() else {
            return results;
        };

        let mut stack: Vec<&BkNode> = vec![root];
        while let Some(node) = stack.pop() {
            let distance = levenshtein_distance(&node.term, query);
            if distance <= radius {
                results.push(Candidate {
                    term: node.term.clone(),
                    distance,
                });
            }

            let low = distance.saturating_sub(radius);
            let high = distance + radius;
            for (&edge, child) in &node.children {
                if edge >= low && edge <= high {
                    stack.push(child);
                }
            }
        }

        results
    }
}
