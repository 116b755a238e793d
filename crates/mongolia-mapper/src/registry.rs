//! Schema lookup by record type name.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::SchemaError;
use crate::schema::RecordSchema;
use crate::Bean;

/// Supplies record type descriptors to the mapper.
pub trait SchemaSource: Send + Sync {
    /// The schema registered under `name`, if any.
    fn schema(&self, name: &str) -> Option<Arc<RecordSchema>>;
}

/// A map of record type name to schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a schema.
    ///
    /// A schema that extends another type gets the base's fields merged in
    /// front of its own, so the base must be registered first.
    pub fn register(&mut self, schema: RecordSchema) -> Result<Arc<RecordSchema>, SchemaError> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateType(schema.name));
        }
        let schema = match schema.extends.as_deref() {
            None => schema,
            Some(base) if base == schema.name => {
                return Err(SchemaError::CyclicBase(vec![schema.name]));
            }
            Some(base) => match self.schemas.get(base) {
                Some(parent) => schema.inherit(parent)?,
                None => {
                    return Err(SchemaError::UnknownBaseType {
                        base: base.to_string(),
                        record: schema.name,
                    })
                }
            },
        };
        debug!("Registered record type '{}' ({} fields)", schema.name, schema.fields.len());
        let schema = Arc::new(schema);
        self.schemas.insert(schema.name.clone(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Builder-style [`SchemaRegistry::register`].
    pub fn with(mut self, schema: RecordSchema) -> Result<Self, SchemaError> {
        self.register(schema)?;
        Ok(self)
    }

    /// Register the schema of a [`Bean`] type.
    pub fn register_bean<T: Bean>(&mut self) -> Result<Arc<RecordSchema>, SchemaError> {
        self.register(T::schema()?)
    }

    /// Get a schema by name.
    pub fn get(&self, name: &str) -> Option<&Arc<RecordSchema>> {
        self.schemas.get(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Check that every child collection names a registered, constructible
    /// element type.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for name in self.names() {
            let schema = &self.schemas[name];
            for field in &schema.fields {
                let Some(element) = field.element_type() else {
                    continue;
                };
                match self.schemas.get(element) {
                    None => {
                        return Err(SchemaError::UnknownElementType {
                            record: schema.name.clone(),
                            field: field.name.clone(),
                            element: element.to_string(),
                        })
                    }
                    Some(target) if !target.constructible => {
                        return Err(SchemaError::AbstractElementType {
                            record: schema.name.clone(),
                            field: field.name.clone(),
                            element: element.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Load a JSON array of schemas and validate the result.
    ///
    /// Schemas may appear in any order; bases are registered before the
    /// types that extend them.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let mut pending: Vec<RecordSchema> = serde_json::from_str(json)?;
        let mut registry = Self::new();

        while !pending.is_empty() {
            let (ready, waiting): (Vec<_>, Vec<_>) = pending.into_iter().partition(|schema| {
                schema
                    .extends
                    .as_deref()
                    .map_or(true, |base| registry.schemas.contains_key(base))
            });
            if ready.is_empty() {
                return Err(unresolved_bases(&waiting));
            }
            for schema in ready {
                registry.register(schema)?;
            }
            pending = waiting;
        }

        registry.validate()?;
        Ok(registry)
    }
}

/// Why none of `waiting` could be registered: a missing base or a cycle.
fn unresolved_bases(waiting: &[RecordSchema]) -> SchemaError {
    let names: HashSet<&str> = waiting.iter().map(|s| s.name.as_str()).collect();
    for schema in waiting {
        if let Some(base) = schema.extends.as_deref() {
            if !names.contains(base) {
                return SchemaError::UnknownBaseType {
                    record: schema.name.clone(),
                    base: base.to_string(),
                };
            }
        }
    }
    let mut cycle: Vec<String> = names.into_iter().map(str::to_string).collect();
    cycle.sort_unstable();
    SchemaError::CyclicBase(cycle)
}

impl SchemaSource for SchemaRegistry {
    fn schema(&self, name: &str) -> Option<Arc<RecordSchema>> {
        self.schemas.get(name).cloned()
    }
}
