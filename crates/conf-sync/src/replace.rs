//! Whole-entry replacement synthesis
//!
//! Folds the diff buckets into a single patch tree: entries unique to A
//! are tagged for deletion, entries unique to B for creation, and
//! changed entries are replaced wholesale with their B side. Coarse by
//! design, trading transmission size for simplicity; the merge engine
//! produces the finer-grained alternative.

use conf_tree::{Node, NodeSet, Operation};

use crate::compare::entry_match;
use crate::diff::{DiffEntry, TreeDiff, diff};
use crate::dummy;
use crate::error::{Error, Result};

/// Build the patch tree that transmutes tree A into tree B.
///
/// Returns `Ok(None)` when the trees are already in sync. Fails with
/// [`Error::StructuralMismatch`] when the roots are unrelated, since two
/// unrelated roots cannot be represented as one combinable tree.
pub fn sync(a: &Node, b: &Node) -> Result<Option<Node>> {
    let d = diff(a, b);
    tracing::debug!(
        deletes = d.unique_a.len(),
        creates = d.unique_b.len(),
        replaces = d.changed_b.len(),
        "Synthesizing replace patch"
    );
    build_patch(&d)
}

/// [`sync`] over two bare top-level forests.
///
/// Returns an empty set when the forests are in sync. Forest folding
/// cannot structurally mismatch: every entry hangs off the shared
/// synthetic root.
pub fn sync_forest(a: &NodeSet, b: &NodeSet) -> Result<NodeSet> {
    let root_a = dummy::wrap(a);
    let root_b = dummy::wrap(b);
    let d = diff(&root_a, &root_b);
    match build_patch(&d)? {
        None => Ok(NodeSet::new()),
        Some(root) if dummy::is_dummy(&root) => Ok(root.into_children()),
        Some(root) => Ok(NodeSet::from(vec![root])),
    }
}

fn build_patch(d: &TreeDiff<'_>) -> Result<Option<Node>> {
    let mut result = None;
    for entry in &d.unique_a {
        fold(&mut result, entry, Operation::Delete)?;
    }
    for entry in &d.unique_b {
        fold(&mut result, entry, Operation::Create)?;
    }
    // changed_a is diagnostic only: the target side wins
    for entry in &d.changed_b {
        fold(&mut result, entry, Operation::Replace)?;
    }
    Ok(result)
}

/// Merge one classified entry into the accumulating patch, synthesizing
/// any missing ancestor containers along its path so the result stays a
/// single well-formed tree.
fn fold(result: &mut Option<Node>, entry: &DiffEntry<'_>, operation: Operation) -> Result<()> {
    let Some((root, ancestors)) = entry.path.split_first() else {
        // the entry is itself a compared root; only representable while
        // the patch is still empty
        return match result {
            None => {
                let mut patch = entry.node.clone();
                patch.set_operation(operation);
                *result = Some(patch);
                Ok(())
            }
            Some(existing) => Err(mismatch(existing, entry.node)),
        };
    };

    let target = result.get_or_insert_with(|| root.clone_shallow());
    if !entry_match(root, target) {
        return Err(mismatch(target, root));
    }

    let mut cursor: &mut Node = target;
    for ancestor in ancestors {
        let index = match cursor.children().position(|c| entry_match(ancestor, c)) {
            Some(i) => i,
            None => {
                // shallow clones keep key children, so synthesized list
                // entries stay addressable
                cursor.add_child(ancestor.clone_shallow());
                cursor.children().len() - 1
            }
        };
        cursor = &mut cursor.children_mut()[index];
    }

    let mut patch = entry.node.clone();
    patch.set_operation(operation);
    cursor.add_child(patch);
    Ok(())
}

fn mismatch(a: &Node, b: &Node) -> Error {
    Error::StructuralMismatch {
        a: a.tag().to_string(),
        b: b.tag().to_string(),
    }
}
