//! Recursive whole-tree diff
//!
//! Produces the difference between two trees as four classification
//! buckets. Entries unique to tree A land in `unique_a`, entries unique
//! to tree B in `unique_b`; entries that denote the same list entry but
//! differ in content land pairwise in `changed_a`/`changed_b`. If the
//! trees are identical all four buckets are empty.
//!
//! Attributes are not inspected; only structure and leaf values are.

use conf_tree::{Node, NodeSet};

use crate::compare::{Comparison, MAX_DIFF_DEPTH, compare};
use crate::dummy;

/// One classified node, with the ancestor chain it was found under.
///
/// `path` runs from the compared root down to the node's parent,
/// inclusive; it is empty when the node is itself a compared root.
/// Synthesis uses it to rebuild an ancestor-connected patch tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry<'a> {
    pub path: Vec<&'a Node>,
    pub node: &'a Node,
}

/// The four-bucket result of [`diff`]
#[derive(Debug, Default)]
pub struct TreeDiff<'a> {
    /// Entries present in A with no counterpart in B
    pub unique_a: Vec<DiffEntry<'a>>,
    /// Entries present in B with no counterpart in A
    pub unique_b: Vec<DiffEntry<'a>>,
    /// A-side halves of changed pairs (diagnostic; the B side wins)
    pub changed_a: Vec<DiffEntry<'a>>,
    /// B-side halves of changed pairs
    pub changed_b: Vec<DiffEntry<'a>>,
}

impl TreeDiff<'_> {
    /// True when the trees were fully in sync
    pub fn is_empty(&self) -> bool {
        self.unique_a.is_empty()
            && self.unique_b.is_empty()
            && self.changed_a.is_empty()
            && self.changed_b.is_empty()
    }

    /// Total number of classified entries across all four buckets
    pub fn len(&self) -> usize {
        self.unique_a.len() + self.unique_b.len() + self.changed_a.len() + self.changed_b.len()
    }
}

/// Compute the structural difference between two trees.
///
/// Inputs are borrowed for the duration of the call and never mutated;
/// the result borrows into both trees. Inputs are assumed acyclic.
pub fn diff<'a>(a: &'a Node, b: &'a Node) -> TreeDiff<'a> {
    let mut result = TreeDiff::default();
    let mut path_a = Vec::new();
    let mut path_b = Vec::new();
    diff_at(a, b, &mut path_a, &mut path_b, &mut result, 0);
    tracing::debug!(
        unique_a = result.unique_a.len(),
        unique_b = result.unique_b.len(),
        changed = result.changed_a.len(),
        "Tree diff complete"
    );
    result
}

fn diff_at<'a>(
    a: &'a Node,
    b: &'a Node,
    path_a: &mut Vec<&'a Node>,
    path_b: &mut Vec<&'a Node>,
    out: &mut TreeDiff<'a>,
    depth: usize,
) {
    if !compare(a, b).is_related() {
        // completely different roots: classified wholesale
        out.unique_a.push(DiffEntry { path: path_a.clone(), node: a });
        out.unique_b.push(DiffEntry { path: path_b.clone(), node: b });
        return;
    }

    path_a.push(a);
    path_b.push(b);

    // every B child is consumed by at most one match
    let mut pool: Vec<&'a Node> = b.children().iter().collect();
    for a_child in a.children() {
        let mut matched: Option<(usize, Comparison)> = None;
        for (i, b_child) in pool.iter().enumerate() {
            let result = compare(a_child, b_child);
            if result.is_related() {
                matched = Some((i, result));
                break;
            }
        }
        match matched {
            Some((i, Comparison::Changed)) => {
                // same entry, different content: a pair-level replacement;
                // granularity beyond this is the merge engine's job
                let b_child = pool.remove(i);
                out.changed_a.push(DiffEntry { path: path_a.clone(), node: a_child });
                out.changed_b.push(DiffEntry { path: path_b.clone(), node: b_child });
            }
            Some((i, _)) => {
                let b_child = pool.remove(i);
                if a_child.is_container() && depth < MAX_DIFF_DEPTH {
                    diff_at(a_child, b_child, path_a, path_b, out, depth + 1);
                }
            }
            None => {
                out.unique_a.push(DiffEntry { path: path_a.clone(), node: a_child });
            }
        }
    }
    for b_child in pool {
        out.unique_b.push(DiffEntry { path: path_b.clone(), node: b_child });
    }

    path_a.pop();
    path_b.pop();
}

/// Check whether two configurations are equal or a sync is needed.
pub fn check_sync(a: &Node, b: &Node) -> bool {
    diff(a, b).is_empty()
}

/// [`check_sync`] over two bare top-level forests.
pub fn check_sync_forest(a: &NodeSet, b: &NodeSet) -> bool {
    let root_a = dummy::wrap(a);
    let root_b = dummy::wrap(b);
    check_sync(&root_a, &root_b)
}
