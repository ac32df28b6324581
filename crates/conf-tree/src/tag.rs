//! Qualified node identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// The qualifying identity of a node: a (namespace, local name) pair.
///
/// Two nodes with different tags are never related, regardless of their
/// content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Namespace URI of the defining module
    pub namespace: String,
    /// Local element name
    pub name: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}
