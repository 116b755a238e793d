//! Mongolia Content Store
//!
//! A hierarchical node-and-property store in the style of a JCR workspace.
//!
//! # Model
//!
//! - **Nodes** have a name, a primary type label, scalar properties and an
//!   ordered list of children. Same-name siblings are allowed and addressed
//!   as `name[2]`, `name[3]`, ...
//! - **Properties** hold one [`PropertyValue`] each.
//! - **Identifiers** are Blake3 hashes of the workspace name and the node's
//!   creation sequence, so a store rebuilt in the same order gets the same ids.
//!
//! The [`ContentStore`] trait is the only surface other crates depend on.
//! [`MemoryStore`] implements it in memory and [`Snapshot`] moves subtrees
//! in and out as JSON.

mod error;
mod id;
mod memory;
mod path;
mod snapshot;
mod store;
mod value;

pub use error::{Result, StoreError};
pub use id::NodeId;
pub use memory::{MemoryStore, DEFAULT_WORKSPACE, ROOT_TYPE};
pub use path::{validate_name, NodePath, Segment};
pub use snapshot::Snapshot;
pub use store::ContentStore;
pub use value::{Property, PropertyType, PropertyValue};
