//! Synthetic roots for forest operations
//!
//! The engines are written for single-rooted trees; wrapping two bare
//! forests in throwaway roots lets the same code compare top-level lists.
//! The wrapper is allocated per call and discarded after unwrapping.

use conf_tree::{Node, NodeSet};

pub(crate) const DUMMY_NAMESPACE: &str = "urn:conf-sync:dummy";
pub(crate) const DUMMY_NAME: &str = "dummy";

/// Wrap a forest in a fresh synthetic root.
pub(crate) fn wrap(forest: &NodeSet) -> Node {
    let mut root = Node::container(DUMMY_NAMESPACE, DUMMY_NAME, Vec::<String>::new());
    for node in forest {
        root.add_child(node.clone());
    }
    root
}

pub(crate) fn is_dummy(node: &Node) -> bool {
    node.namespace() == DUMMY_NAMESPACE && node.name() == DUMMY_NAME
}
