//! Record type descriptors.
//!
//! A [`RecordSchema`] lists the fields of one record type: their names, the
//! scalar type or child-collection element type, and whether they carry
//! per-locale overrides. A schema may extend another one and inherit its
//! fields. Schemas are validated once, when built or registered, and then
//! shared behind an `Arc`.

use std::collections::HashSet;

use mongolia_content::PropertyType;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Semantic type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    String,
    /// 32-bit signed integer, stored as a `Long` property.
    Integer,
    Date,
    Boolean,
}

impl ScalarType {
    /// The property type this field is stored as.
    pub fn property_type(&self) -> PropertyType {
        match self {
            ScalarType::String => PropertyType::String,
            ScalarType::Integer => PropertyType::Long,
            ScalarType::Date => PropertyType::Date,
            ScalarType::Boolean => PropertyType::Boolean,
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Date => "date",
            ScalarType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// One scalar value, read from the property of the same name.
    Scalar {
        #[serde(rename = "type")]
        scalar: ScalarType,
    },
    /// Ordered nested records, read from the grandchildren of the child node
    /// of the same name.
    Children { element: String },
}

/// One field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub translatable: bool,
}

impl FieldDef {
    pub fn scalar(name: &str, scalar: ScalarType) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Scalar { scalar },
            translatable: false,
        }
    }

    pub fn translatable(name: &str, scalar: ScalarType) -> Self {
        Self {
            translatable: true,
            ..Self::scalar(name, scalar)
        }
    }

    pub fn children(name: &str, element: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Children {
                element: element.to_string(),
            },
            translatable: false,
        }
    }

    /// The scalar type, if this is a scalar field.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.kind {
            FieldKind::Scalar { scalar } => Some(scalar),
            FieldKind::Children { .. } => None,
        }
    }

    /// The element type name, if this is a child collection.
    pub fn element_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Children { element } => Some(element),
            FieldKind::Scalar { .. } => None,
        }
    }
}

fn constructible_default() -> bool {
    true
}

/// Descriptor of one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<FieldDef>,
    /// False for abstract types that can't be instantiated.
    #[serde(default = "constructible_default")]
    pub constructible: bool,
    /// Base type whose fields come before this type's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

impl RecordSchema {
    /// Start building a schema.
    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            schema: RecordSchema {
                name: name.to_string(),
                fields: Vec::new(),
                constructible: true,
                extends: None,
            },
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// This schema with `base`'s fields in front of its own.
    ///
    /// `base` must already carry its own inherited fields.
    pub fn inherit(&self, base: &RecordSchema) -> Result<RecordSchema, SchemaError> {
        let merged = RecordSchema {
            fields: base.fields.iter().chain(&self.fields).cloned().collect(),
            ..self.clone()
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Check the per-type invariants.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.translatable && field.element_type().is_some() {
                return Err(SchemaError::InvalidTranslatable {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builder returned by [`RecordSchema::builder`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: RecordSchema,
}

impl SchemaBuilder {
    /// Add a plain scalar field.
    pub fn scalar(mut self, name: &str, scalar: ScalarType) -> Self {
        self.schema.fields.push(FieldDef::scalar(name, scalar));
        self
    }

    /// Add a scalar field with per-locale overrides.
    pub fn translatable(mut self, name: &str, scalar: ScalarType) -> Self {
        self.schema.fields.push(FieldDef::translatable(name, scalar));
        self
    }

    /// Add a child collection of `element` records.
    pub fn children(mut self, name: &str, element: &str) -> Self {
        self.schema.fields.push(FieldDef::children(name, element));
        self
    }

    /// Add a prepared field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.schema.fields.push(field);
        self
    }

    /// Inherit the fields of `base`.
    pub fn extends(mut self, base: &str) -> Self {
        self.schema.extends = Some(base.to_string());
        self
    }

    /// Mark the type as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.schema.constructible = false;
        self
    }

    /// Validate and finish.
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        self.schema.validate()?;
        Ok(self.schema)
    }
}
