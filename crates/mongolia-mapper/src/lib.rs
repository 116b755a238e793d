//! Mongolia Tree Mapper
//!
//! Binds typed records to node subtrees of a [`mongolia_content::ContentStore`].
//!
//! # Reading
//!
//! [`TreeMapper::read`] builds a zero-valued [`Record`] and fills every field
//! whose name matches a property or child node:
//!
//! - scalar fields take the property of the same name, coerced by type
//!   (`String`, `Long` as 32-bit integer, `Date`, `Boolean`);
//! - translatable fields take `<name>_<locale>` when reading in a locale other
//!   than the default and that property exists, else the canonical value;
//! - child-collection fields take the grandchildren under the child node of
//!   the same name, each read as the declared element type.
//!
//! # Writing
//!
//! [`TreeMapper::write`] upserts one node: an existing node at the path is
//! updated in place, otherwise one is created with the given type label. Only
//! canonical scalar properties are written.
//!
//! # Issues
//!
//! Anything skipped along the way (unknown names, unsupported types, store
//! failures in a subtree) is logged and returned in [`Mapped::issues`], so the
//! caller decides whether to accept a partial result.

mod bean;
mod config;
mod error;
mod mapper;
mod outcome;
mod read;
mod record;
mod registry;
mod schema;
mod write;

pub use bean::{required, Bean};
pub use config::{MapperConfig, DEFAULT_LOCALE_ENV, DEFAULT_OVERRIDE_SEPARATOR, OVERRIDE_SEPARATOR_ENV};
pub use error::{MapError, Result, SchemaError};
pub use mapper::TreeMapper;
pub use outcome::{IssueKind, MapIssue, Mapped};
pub use record::{FieldValue, Record};
pub use registry::{SchemaRegistry, SchemaSource};
pub use schema::{FieldDef, FieldKind, RecordSchema, ScalarType, SchemaBuilder};
