//! Comparison and synchronization engines for configuration trees
//!
//! Fundamental operations for comparing and syncing two configuration
//! trees, typically one read from a device and one held in a database:
//! [`check_sync`] decides whether the two are equal, [`diff`] classifies
//! their differences into four buckets, and the two synthesis strategies
//! build edit scripts from them: [`sync`] with coarse whole-entry
//! replacement, [`sync_merge`] with leaf-level merge granularity.

pub mod compare;
pub mod diff;
mod dummy;
pub mod error;
pub mod merge;
pub mod replace;

pub use compare::{Comparison, compare, content_eq, equals, key_compare};
pub use diff::{DiffEntry, TreeDiff, check_sync, check_sync_forest, diff};
pub use error::{Error, Result};
pub use merge::{sync_merge, sync_merge_forest};
pub use replace::{sync, sync_forest};
