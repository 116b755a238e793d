//! Record instances.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{MapError, Result};
use crate::schema::{FieldKind, RecordSchema, ScalarType};

/// The value of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i32),
    Date(DateTime<Utc>),
    Boolean(bool),
    Children(Vec<Record>),
}

impl FieldValue {
    /// The scalar type of this value, `None` for child collections.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            FieldValue::String(_) => Some(ScalarType::String),
            FieldValue::Integer(_) => Some(ScalarType::Integer),
            FieldValue::Date(_) => Some(ScalarType::Date),
            FieldValue::Boolean(_) => Some(ScalarType::Boolean),
            FieldValue::Children(_) => None,
        }
    }

    fn describe(&self) -> String {
        match self.scalar_type() {
            Some(scalar) => scalar.to_string(),
            None => "child collection".to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Date(v)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(v: Vec<Record>) -> Self {
        FieldValue::Children(v)
    }
}

/// An instance of a record type.
///
/// Fields start unset (the zero value) and only hold values assigned through
/// [`Record::set`] or by the mapper.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// A zero-valued instance of `schema`.
    pub fn new(schema: Arc<RecordSchema>) -> Result<Self> {
        if !schema.constructible {
            return Err(MapError::NotConstructible(schema.name.clone()));
        }
        Ok(Self {
            schema,
            values: BTreeMap::new(),
        })
    }

    /// The record's type descriptor.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// The record type name.
    pub fn type_name(&self) -> &str {
        &self.schema.name
    }

    /// Assign a field, checking it against the schema.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let def = self.schema.field(field).ok_or_else(|| MapError::UnknownField {
            record: self.schema.name.clone(),
            field: field.to_string(),
        })?;

        let mismatch = |expected: String| MapError::TypeMismatch {
            field: field.to_string(),
            expected,
            found: value.describe(),
        };

        match (&def.kind, &value) {
            (FieldKind::Scalar { scalar }, _) => {
                if value.scalar_type() != Some(*scalar) {
                    return Err(mismatch(scalar.to_string()));
                }
            }
            (FieldKind::Children { element }, FieldValue::Children(items)) => {
                if let Some(other) = items.iter().find(|r| r.type_name() != element) {
                    return Err(MapError::TypeMismatch {
                        field: field.to_string(),
                        expected: element.clone(),
                        found: other.type_name().to_string(),
                    });
                }
            }
            (FieldKind::Children { element }, _) => {
                return Err(mismatch(format!("collection of {}", element)));
            }
        }

        self.values.insert(field.to_string(), value);
        Ok(())
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Assign without checks. The caller guarantees the value fits the field.
    pub(crate) fn set_unchecked(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_string(), value);
    }

    /// Return a field to its zero value.
    pub fn unset(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// Get a field value. `None` means unset.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Check whether a field holds a value.
    pub fn is_set(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Set fields, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of set fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when every field is unset.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_integer(&self, field: &str) -> Option<i32> {
        match self.get(field) {
            Some(FieldValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        match self.get(field) {
            Some(FieldValue::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_date(&self, field: &str) -> Option<DateTime<Utc>> {
        match self.get(field) {
            Some(FieldValue::Date(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_children(&self, field: &str) -> Option<&[Record]> {
        match self.get(field) {
            Some(FieldValue::Children(v)) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name && self.values == other.values
    }
}
