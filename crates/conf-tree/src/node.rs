//! Configuration tree nodes
//!
//! A `Node` is either a scalar leaf or a structural container, qualified
//! by a namespace/name tag and optionally annotated with an edit
//! operation. Trees own their children top-down; cloning a node yields a
//! fully independent tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::nodeset::NodeSet;
use crate::schema::Schema;
use crate::tag::Tag;

/// Edit operation recorded on a node by the synthesis engines.
///
/// The wire serializer renders these as the operation attribute of the
/// corresponding protocol element; `None` nodes are plain context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// No operation recorded.
    #[default]
    None,
    /// Apply the enumerated deltas, leaving unmentioned content alone.
    Merge,
    /// Discard the old entry and install this one wholesale.
    Replace,
    /// Add this subtree verbatim.
    Create,
    /// Remove the addressed entry entirely.
    Delete,
}

impl Operation {
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Merge => "merge",
            Self::Replace => "replace",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a configuration tree.
///
/// Attributes are carried for round-tripping but excluded from all
/// comparison; the engines inspect only structure and leaf values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    tag: Tag,
    value: Option<String>,
    attributes: BTreeMap<String, String>,
    children: NodeSet,
    schema: Schema,
    operation: Operation,
}

impl Node {
    /// Create a node from a tag and schema classification
    pub fn new(tag: Tag, schema: Schema) -> Self {
        Self {
            tag,
            value: None,
            attributes: BTreeMap::new(),
            children: NodeSet::new(),
            schema,
            operation: Operation::None,
        }
    }

    /// Create a leaf carrying `value`
    pub fn leaf(
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(Tag::new(namespace, name), Schema::Leaf);
        node.value = Some(value.into());
        node
    }

    /// Create a singleton container with a declared child order
    pub fn container<I, S>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        child_order: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Tag::new(namespace, name), Schema::container(child_order))
    }

    /// Create a list entry identified among same-tag siblings by `keys`
    pub fn list_entry<I, S, J, T>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        child_order: I,
        keys: J,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(
            Tag::new(namespace, name),
            Schema::list_entry(child_order, keys),
        )
    }

    /// Create a node without schema metadata
    pub fn opaque(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Tag::new(namespace, name), Schema::Opaque)
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn namespace(&self) -> &str {
        &self.tag.namespace
    }

    pub fn name(&self) -> &str {
        &self.tag.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Builder form of [`set_value`](Self::set_value)
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builder form of [`set_attribute`](Self::set_attribute)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Declared child tag names in schema order; empty for leaves and
    /// opaque nodes
    pub fn child_order(&self) -> &[String] {
        match &self.schema {
            Schema::Container(meta) => &meta.child_order,
            _ => &[],
        }
    }

    /// Key tag names identifying this node as a list entry, if any
    pub fn keys(&self) -> Option<&[String]> {
        match &self.schema {
            Schema::Container(meta) => meta.keys.as_deref(),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.schema, Schema::Leaf)
    }

    pub fn is_container(&self) -> bool {
        matches!(self.schema, Schema::Container(_))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.schema, Schema::Opaque)
    }

    pub fn is_list_entry(&self) -> bool {
        self.keys().is_some()
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    pub fn mark_merge(&mut self) {
        self.operation = Operation::Merge;
    }

    pub fn mark_replace(&mut self) {
        self.operation = Operation::Replace;
    }

    pub fn mark_create(&mut self) {
        self.operation = Operation::Create;
    }

    pub fn mark_delete(&mut self) {
        self.operation = Operation::Delete;
    }

    pub fn children(&self) -> &NodeSet {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut NodeSet {
        &mut self.children
    }

    /// Consume the node, keeping only its children
    pub fn into_children(self) -> NodeSet {
        self.children
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder form of [`add_child`](Self::add_child)
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// First child with the given local name
    pub fn get_child(&self, name: &str) -> Option<&Node> {
        self.children.find(|c| c.name() == name)
    }

    pub fn get_child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name() == name)
    }

    /// All children with the given local name, in document order
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.name() == name)
    }

    /// First child with the given local name, or `ElementMissing`
    pub fn require_child(&self, name: &str) -> Result<&Node> {
        self.get_child(name)
            .ok_or_else(|| Error::missing(format!("{}/{}", self.tag, name)))
    }

    /// All nodes reached by a slash-separated child-name path.
    ///
    /// Empty segments are skipped; an empty path yields the node itself.
    pub fn get(&self, path: &str) -> Vec<&Node> {
        let mut current = vec![self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let mut next = Vec::new();
            for node in current {
                next.extend(node.children_named(segment));
            }
            current = next;
        }
        current
    }

    /// Descend along `path`, taking the first matching child per level
    fn get_first_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current.get_child_mut(segment)?;
        }
        Some(current)
    }

    fn mark_at(&mut self, path: &str, operation: Operation) -> Result<()> {
        let display = format!("{}/{}", self.tag, path);
        match self.get_first_mut(path) {
            Some(node) => {
                node.set_operation(operation);
                Ok(())
            }
            None => Err(Error::missing(display)),
        }
    }

    /// Mark the node at a child path for deletion
    pub fn mark_leaf_delete(&mut self, path: &str) -> Result<()> {
        self.mark_at(path, Operation::Delete)
    }

    /// Mark the node at a child path for creation
    pub fn mark_leaf_create(&mut self, path: &str) -> Result<()> {
        self.mark_at(path, Operation::Create)
    }

    /// Mark the node at a child path for replacement
    pub fn mark_leaf_replace(&mut self, path: &str) -> Result<()> {
        self.mark_at(path, Operation::Replace)
    }

    /// Mark the node at a child path for merging
    pub fn mark_leaf_merge(&mut self, path: &str) -> Result<()> {
        self.mark_at(path, Operation::Merge)
    }

    /// Clone identity, value, attributes, and key children only.
    ///
    /// The result addresses the same entry as `self` without carrying its
    /// content; synthesis uses it for ancestor scaffolding and delete
    /// tombstones. The operation marker is reset.
    pub fn clone_shallow(&self) -> Node {
        let mut copy = Node::new(self.tag.clone(), self.schema.clone());
        copy.value = self.value.clone();
        copy.attributes = self.attributes.clone();
        if let Some(keys) = self.keys() {
            for key in keys {
                if let Some(child) = self.get_child(key) {
                    copy.children.push(child.clone());
                }
            }
        }
        copy
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}
