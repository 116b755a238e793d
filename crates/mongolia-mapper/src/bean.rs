//! Plain Rust structs as record types.
//!
//! Implement [`Bean`] to describe a struct's schema once and convert it to
//! and from [`Record`]. The mapper then reads and writes the struct directly.

use mongolia_content::{ContentStore, NodeId};
use mongolia_i18n::Locale;

use crate::error::{MapError, Result, SchemaError};
use crate::outcome::Mapped;
use crate::record::Record;
use crate::schema::RecordSchema;
use crate::TreeMapper;

/// A struct with a fixed record schema.
pub trait Bean: Sized {
    /// Name the schema is registered under.
    const TYPE_NAME: &'static str;

    /// The schema describing this struct. Its name must be [`Bean::TYPE_NAME`].
    fn schema() -> std::result::Result<RecordSchema, SchemaError>;

    /// Build the struct from a mapped record.
    fn from_record(record: &Record) -> Result<Self>;

    /// Build a record. Nested element schemas come from `mapper`.
    fn to_record(&self, mapper: &TreeMapper) -> Result<Record>;
}

/// Unwrap a field a bean can't do without.
pub fn required<T>(record: &Record, field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| MapError::MissingField {
        record: record.type_name().to_string(),
        field: field.to_string(),
    })
}

impl TreeMapper {
    /// [`TreeMapper::read`] followed by [`Bean::from_record`].
    pub fn read_bean<T: Bean, S: ContentStore + ?Sized>(
        &self,
        store: &S,
        node: NodeId,
        locale: Option<Locale>,
    ) -> Result<Mapped<T>> {
        self.read(store, node, T::TYPE_NAME, locale)?
            .try_map(|record| T::from_record(&record))
    }

    /// [`Bean::to_record`] followed by [`TreeMapper::write`].
    pub fn write_bean<T: Bean, S: ContentStore + ?Sized>(
        &self,
        store: &mut S,
        bean: &T,
        parent: NodeId,
        rel_path: &str,
        type_label: &str,
    ) -> Result<Mapped<NodeId>> {
        let record = bean.to_record(self)?;
        self.write(store, &record, parent, rel_path, type_label)
    }
}
