//! Schema-derived structure metadata
//!
//! The schema compiler that generates this metadata is an external
//! collaborator; the engine only consumes it through the `Schema` variant
//! attached to each node.

use serde::{Deserialize, Serialize};

/// Structure information attached to a node.
///
/// Replaces name-based runtime dispatch with a compile-time tagged
/// variant: the decoder (or a manual adapter) classifies each node once,
/// and the engines branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Schema {
    /// Scalar node carrying a value.
    Leaf,
    /// Structural node with declared children.
    Container(ContainerMeta),
    /// Node without local schema knowledge, e.g. decoded from a newer
    /// module revision than the generated metadata covers. Matching falls
    /// back to full content equality.
    Opaque,
}

impl Schema {
    /// Container metadata for a singleton container (no keys).
    pub fn container<I, S>(child_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Container(ContainerMeta {
            child_order: child_order.into_iter().map(Into::into).collect(),
            keys: None,
        })
    }

    /// Container metadata for a list entry identified by `keys`.
    ///
    /// Keys must be declared first in `child_order`.
    pub fn list_entry<I, S, J, T>(child_order: I, keys: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Container(ContainerMeta {
            child_order: child_order.into_iter().map(Into::into).collect(),
            keys: Some(keys.into_iter().map(Into::into).collect()),
        })
    }
}

/// Declared structure of a schema-aware container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMeta {
    /// Declared child tag names in schema order. Key tags come first.
    pub child_order: Vec<String>,
    /// Ordered key-leaf names that identify a list entry among same-tag
    /// siblings. `None` for singleton containers and for key-less list
    /// entry types, which fall back to full-content equality.
    pub keys: Option<Vec<String>>,
}
