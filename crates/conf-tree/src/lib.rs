//! Configuration tree data model for the conf-sync engine
//!
//! Provides the node tree handed to the comparison and synchronization
//! engines: qualified tags, scalar leaves, schema-aware containers with
//! declared child order and list-entry keys, edit operation markers, and
//! the namespace registry used by decoders.

pub mod error;
pub mod node;
pub mod nodeset;
pub mod registry;
pub mod schema;
pub mod tag;

pub use error::{Error, Result};
pub use node::{Node, Operation};
pub use nodeset::NodeSet;
pub use registry::SchemaRegistry;
pub use schema::{ContainerMeta, Schema};
pub use tag::Tag;
