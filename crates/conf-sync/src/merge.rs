//! Leaf-level merge synthesis
//!
//! Builds the finest-grained patch: a decorated clone of the target tree
//! B from which everything already in sync has been pruned. Content that
//! only exists in A is appended as delete tombstones. The result matches
//! merge semantics (unlisted content is left alone on the device) where
//! the replace engine reinstalls whole entries.

use conf_tree::{Node, NodeSet};

use crate::compare::{MAX_DIFF_DEPTH, content_eq, equals, key_compare};
use crate::dummy;

/// Build the merge patch that transmutes tree A into tree B.
///
/// Both inputs are cloned at entry and never mutated; the returned tree
/// is a pruned, decorated clone of B. Never fails: unlike the replace
/// engine there is no single-tree folding step that could mismatch.
pub fn sync_merge(a: &Node, b: &Node) -> Node {
    let mut source = a.clone();
    let mut patch = b.clone();
    let diffs = merge_walk(&mut source, &mut patch, 0);
    tracing::debug!(diffs, root = %patch.tag(), "Merge synthesis complete");
    patch
}

/// [`sync_merge`] over two bare top-level forests.
pub fn sync_merge_forest(a: &NodeSet, b: &NodeSet) -> NodeSet {
    let mut source = dummy::wrap(a);
    let mut patch = dummy::wrap(b);
    merge_walk(&mut source, &mut patch, 0);
    patch.into_children()
}

/// Reconcile the children of a matched structural pair, returning the
/// number of differences in the subtree. Zero means the pair was fully
/// in sync and the caller prunes the whole `b` subtree.
fn merge_walk(a: &mut Node, b: &mut Node, depth: usize) -> usize {
    let mut diffs = 0;
    let mut pruned: Vec<usize> = Vec::new();
    let entry_keys: Vec<String> = b.keys().map(|k| k.to_vec()).unwrap_or_default();

    for i in 0..b.children().len() {
        {
            let child = &b.children()[i];
            if child.is_leaf() && entry_keys.iter().any(|k| k == child.name()) {
                // key leaves encode identity, already verified by the match
                continue;
            }
        }

        let Some(mut a_child) = take_match(a.children_mut(), &b.children()[i]) else {
            // new content, left in b as an implicit merge addition
            diffs += 1;
            continue;
        };

        let b_child = &mut b.children_mut()[i];
        if b_child.is_container() && depth < MAX_DIFF_DEPTH {
            let d = merge_walk(&mut a_child, b_child, depth + 1);
            diffs += d;
            if d == 0 {
                pruned.push(i); // subtree already in sync, omit
            }
        } else if b_child.is_container() {
            // depth guard: keep or drop the subtree wholesale
            if content_eq(&a_child, b_child) {
                pruned.push(i);
            } else {
                diffs += 1;
            }
        } else if b_child.is_leaf() {
            if equals(&a_child, b_child) {
                pruned.push(i); // identical leaves need not be sent
            } else {
                diffs += 1;
            }
        } else {
            // opaque nodes match by full content equality, so a match is
            // already in sync
            pruned.push(i);
        }
    }

    // whatever is left in a has no counterpart in b and must be deleted
    let a_keys: Vec<String> = a.keys().map(|k| k.to_vec()).unwrap_or_default();
    for child in std::mem::take(a.children_mut()) {
        if child.is_leaf() && a_keys.iter().any(|k| k == child.name()) {
            continue;
        }
        let mut tombstone = if child.is_leaf() {
            child
        } else {
            // identity and keys only: enough to address the entry
            child.clone_shallow()
        };
        tombstone.mark_delete();
        b.add_child(tombstone);
        diffs += 1;
    }

    for &i in pruned.iter().rev() {
        b.children_mut().remove(i);
    }
    diffs
}

/// Find and remove the `a`-side counterpart of `target`, per the shared
/// list-entry matching rule. Opaque targets fall back to content
/// equality, since they cannot be classified as key-bearing.
fn take_match(pool: &mut NodeSet, target: &Node) -> Option<Node> {
    let index = if target.is_leaf() {
        pool.position(|c| c.is_leaf() && c.tag() == target.tag())
    } else if target.is_container() {
        if target.keys().is_some() {
            pool.position(|c| !c.is_leaf() && key_compare(target, c))
        } else {
            pool.position(|c| !c.is_leaf() && equals(target, c))
        }
    } else {
        pool.position(|c| content_eq(target, c))
    };
    index.map(|i| pool.remove(i))
}
