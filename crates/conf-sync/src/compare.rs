//! Pairwise node comparison
//!
//! Three predicates of increasing depth: [`equals`] looks at identity and
//! leaf value only, [`key_compare`] additionally checks list-entry keys,
//! and [`compare`] classifies a whole pair of subtrees.

use conf_tree::{Node, Schema};

/// Maximum recursion depth for comparison and synthesis walks.
///
/// Beyond this, a subtree pair degrades to an exact content check and a
/// single coarse change instead of per-tag bookkeeping.
pub(crate) const MAX_DIFF_DEPTH: usize = 128;

/// Result of comparing two subtrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Identity, value, or keys differ; the nodes are unrelated
    Distinct,
    /// Same identity and keys, but some non-key content differs
    Changed,
    /// The entire subtrees match
    Identical,
}

impl Comparison {
    /// True for [`Changed`](Self::Changed) and
    /// [`Identical`](Self::Identical): the two nodes denote the same
    /// configuration entry.
    pub fn is_related(self) -> bool {
        self != Self::Distinct
    }
}

/// Identity and value equality. Children are not inspected; structural
/// nodes carry no value, so for them this is identity equality alone.
pub fn equals(a: &Node, b: &Node) -> bool {
    a.tag() == b.tag() && a.value() == b.value()
}

/// Whether two list entries denote the same entry: [`equals`] plus an
/// equal-valued child for every declared key tag.
///
/// False when `a` declares no keys. A missing key child on either side is
/// a non-match.
pub fn key_compare(a: &Node, b: &Node) -> bool {
    if !equals(a, b) {
        return false;
    }
    let Some(keys) = a.keys() else {
        return false; // not a list entry
    };
    keys.iter().all(|key| match (a.get_child(key), b.get_child(key)) {
        (Some(x), Some(y)) => equals(x, y),
        _ => false,
    })
}

/// Full content equality: identity, value, and children as an unordered
/// multiset, recursively. Attributes and operation markers are ignored.
pub fn content_eq(a: &Node, b: &Node) -> bool {
    if a.tag() != b.tag() || a.value() != b.value() {
        return false;
    }
    if a.children().len() != b.children().len() {
        return false;
    }
    let mut pool: Vec<&Node> = b.children().iter().collect();
    for ours in a.children() {
        match pool.iter().position(|theirs| content_eq(ours, theirs)) {
            Some(i) => {
                pool.remove(i);
            }
            None => return false,
        }
    }
    true
}

/// The shared list-entry matching rule: key comparison when the node
/// declares keys, plain [`equals`] otherwise.
pub(crate) fn entry_match(a: &Node, b: &Node) -> bool {
    if a.keys().is_some() {
        key_compare(a, b)
    } else {
        equals(a, b)
    }
}

/// Classify a pair of subtrees.
///
/// [`Comparison::Identical`] only if the entire subtrees match;
/// [`Comparison::Changed`] iff identity (and keys, for list entries)
/// match but some non-key content differs; [`Comparison::Distinct`]
/// otherwise. Key children are excluded from the content walk; they
/// encode identity, which is verified up front.
pub fn compare(a: &Node, b: &Node) -> Comparison {
    compare_at(a, b, 0)
}

pub(crate) fn compare_at(a: &Node, b: &Node, depth: usize) -> Comparison {
    if a.tag() != b.tag() {
        return Comparison::Distinct;
    }
    match (a.schema(), b.schema()) {
        (Schema::Leaf, Schema::Leaf) => {
            if a.value() == b.value() {
                Comparison::Identical
            } else {
                Comparison::Changed
            }
        }
        (Schema::Container(_), Schema::Container(_)) => {
            if a.value() != b.value() {
                return Comparison::Distinct;
            }
            compare_containers(a, b, depth)
        }
        // at least one side is schema-unaware (or the kinds disagree):
        // fall back to full content equality
        _ => {
            if content_eq(a, b) {
                Comparison::Identical
            } else {
                Comparison::Changed
            }
        }
    }
}

fn compare_containers(a: &Node, b: &Node, depth: usize) -> Comparison {
    let keys = a.keys().unwrap_or(&[]);
    for key in keys {
        match (a.get_child(key), b.get_child(key)) {
            (Some(x), Some(y)) if equals(x, y) => {}
            _ => return Comparison::Distinct,
        }
    }

    if depth >= MAX_DIFF_DEPTH {
        return if content_eq(a, b) {
            Comparison::Identical
        } else {
            Comparison::Changed
        };
    }

    // declared tags in schema order, then any undeclared tags in
    // appearance order; key tags are identity and stay out of the walk
    let mut tags: Vec<&str> = a
        .child_order()
        .iter()
        .map(String::as_str)
        .filter(|tag| !keys.iter().any(|k| k == tag))
        .collect();
    for child in a.children().iter().chain(b.children().iter()) {
        let tag = child.name();
        if !keys.iter().any(|k| k == tag) && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    for tag in tags {
        let mut pool: Vec<&Node> = b.children_named(tag).collect();
        for ours in a.children_named(tag) {
            let Some(found) = pool.iter().position(|theirs| entry_match(ours, theirs)) else {
                return Comparison::Changed;
            };
            let theirs = pool.remove(found);
            if compare_at(ours, theirs, depth + 1) != Comparison::Identical {
                return Comparison::Changed;
            }
        }
        if !pool.is_empty() {
            return Comparison::Changed;
        }
    }
    Comparison::Identical
}
