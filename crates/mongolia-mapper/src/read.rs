//! Node to record.

use std::sync::Arc;

use mongolia_content::{ContentStore, NodeId, Property, PropertyValue};
use mongolia_i18n::Locale;
use tracing::{debug, warn};

use crate::error::Result;
use crate::outcome::{IssueKind, MapIssue, Mapped};
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, RecordSchema, ScalarType};
use crate::TreeMapper;

/// Locale settings fixed for one read.
#[derive(Debug, Clone, Copy)]
struct ReadLocale {
    requested: Locale,
    /// Overrides are consulted only when the requested locale is not the default.
    localized: bool,
}

impl TreeMapper {
    /// Read `node` as an instance of `record_type`.
    ///
    /// `locale` defaults to the provider's current locale. Translatable fields
    /// take the `<field>_<locale>` property when it exists and the canonical
    /// property otherwise. Names without a matching field, unsupported
    /// property types and unreadable subtrees are reported in
    /// [`Mapped::issues`] and skipped.
    ///
    /// Fails only when the type is unknown or abstract, or when the node's
    /// own properties or children cannot be listed.
    pub fn read<S: ContentStore + ?Sized>(
        &self,
        store: &S,
        node: NodeId,
        record_type: &str,
        locale: Option<Locale>,
    ) -> Result<Mapped<Record>> {
        let schema = self.schema(record_type)?;
        let requested = locale.unwrap_or_else(|| self.current_locale());
        let ctx = ReadLocale {
            requested,
            localized: requested != self.default_locale(),
        };

        let mut issues = Vec::new();
        let record = self.read_node(store, node, schema, ctx, "", &mut issues)?;
        Ok(Mapped::new(record, issues))
    }

    fn read_node<S: ContentStore + ?Sized>(
        &self,
        store: &S,
        node: NodeId,
        schema: Arc<RecordSchema>,
        ctx: ReadLocale,
        prefix: &str,
        issues: &mut Vec<MapIssue>,
    ) -> Result<Record> {
        let mut record = Record::new(Arc::clone(&schema))?;

        let properties = store.properties(node)?;
        for property in &properties {
            self.read_property(&schema, &properties, property, ctx, prefix, &mut record, issues);
        }

        for child in store.children(node)? {
            self.read_child(store, &schema, child, ctx, prefix, &mut record, issues);
        }

        Ok(record)
    }

    #[allow(clippy::too_many_arguments)]
    fn read_property(
        &self,
        schema: &RecordSchema,
        properties: &[Property],
        property: &Property,
        ctx: ReadLocale,
        prefix: &str,
        record: &mut Record,
        issues: &mut Vec<MapIssue>,
    ) {
        let path = join(prefix, &property.name);

        let Some(field) = schema.field(&property.name) else {
            if !self.is_override(schema, &property.name) {
                debug!("Field '{}' not found in '{}'", property.name, schema.name);
                issues.push(MapIssue::new(path, IssueKind::UnknownField));
            }
            return;
        };

        let scalar = match &field.kind {
            FieldKind::Scalar { scalar } => *scalar,
            FieldKind::Children { element } => {
                warn!("Property '{}' matches child collection of {}", path, element);
                issues.push(MapIssue::new(
                    path,
                    IssueKind::TypeMismatch {
                        expected: format!("child nodes of {}", element),
                        found: property.value.property_type().to_string(),
                    },
                ));
                return;
            }
        };

        if let Some(localized) = self.override_of(field, properties, ctx) {
            let override_path = join(prefix, &localized.name);
            match coerce(&localized.value, scalar) {
                Ok(value) => {
                    record.set_unchecked(&field.name, value);
                    return;
                }
                Err(kind) => {
                    warn!("Ignoring override '{}' in '{}': {}", override_path, schema.name, kind);
                    issues.push(MapIssue::new(override_path, kind));
                }
            }
        }

        match coerce(&property.value, scalar) {
            Ok(value) => record.set_unchecked(&field.name, value),
            Err(kind) => {
                warn!("Skipping '{}' in '{}': {}", path, schema.name, kind);
                issues.push(MapIssue::new(path, kind));
            }
        }
    }

    /// The override property for the requested locale, if the field has one.
    fn override_of<'a>(
        &self,
        field: &FieldDef,
        properties: &'a [Property],
        ctx: ReadLocale,
    ) -> Option<&'a Property> {
        if !(field.translatable && ctx.localized) {
            return None;
        }
        let name = self.config.override_name(&field.name, ctx.requested);
        properties.iter().find(|p| p.name == name)
    }

    /// True for `<field>_<xx>` where `field` is translatable.
    fn is_override(&self, schema: &RecordSchema, property: &str) -> bool {
        self.config
            .split_override(property)
            .and_then(|(field, _)| schema.field(field))
            .is_some_and(|f| f.translatable)
    }

    #[allow(clippy::too_many_arguments)]
    fn read_child<S: ContentStore + ?Sized>(
        &self,
        store: &S,
        schema: &RecordSchema,
        child: NodeId,
        ctx: ReadLocale,
        prefix: &str,
        record: &mut Record,
        issues: &mut Vec<MapIssue>,
    ) {
        let name = match store.name(child) {
            Ok(name) => name,
            Err(e) => {
                warn!("Cannot read name of child {} under '{}': {}", child, prefix, e);
                issues.push(MapIssue::new(prefix, IssueKind::Store(e)));
                return;
            }
        };
        let path = join(prefix, &name);

        let Some(field) = schema.field(&name) else {
            debug!("Field '{}' not found in '{}'", name, schema.name);
            issues.push(MapIssue::new(path, IssueKind::UnknownField));
            return;
        };

        let Some(element) = field.element_type() else {
            warn!("Child node '{}' matches scalar field of '{}'", path, schema.name);
            issues.push(MapIssue::new(path, IssueKind::NotACollection));
            return;
        };

        let Some(element_schema) = self.schemas.schema(element) else {
            warn!("Element type '{}' of '{}' is not registered", element, path);
            issues.push(MapIssue::new(path, IssueKind::UnknownElementType(element.to_string())));
            return;
        };

        let items = match store.children(child) {
            Ok(items) => items,
            Err(e) => {
                warn!("Cannot list children of '{}': {}", path, e);
                issues.push(MapIssue::new(path, IssueKind::Store(e)));
                return;
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let item_path = match store.name(item) {
                Ok(item_name) => join(&path, &item_name),
                Err(_) => join(&path, &item.to_string()),
            };
            match self.read_node(store, item, Arc::clone(&element_schema), ctx, &item_path, issues) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping element '{}': {}", item_path, e);
                    issues.push(MapIssue::new(item_path, IssueKind::ElementFailed(e.to_string())));
                }
            }
        }

        // Same-name collection nodes (`variants`, `variants[2]`) add up.
        if let Some(FieldValue::Children(mut earlier)) = record.unset(&field.name) {
            earlier.extend(records);
            records = earlier;
        }
        record.set_unchecked(&field.name, FieldValue::Children(records));
    }
}

/// Convert a property value to a field value of the given type.
pub(crate) fn coerce(value: &PropertyValue, scalar: ScalarType) -> std::result::Result<FieldValue, IssueKind> {
    match (value, scalar) {
        (PropertyValue::String(s), ScalarType::String) => Ok(FieldValue::String(s.clone())),
        (PropertyValue::Long(v), ScalarType::Integer) => i32::try_from(*v)
            .map(FieldValue::Integer)
            .map_err(|_| IssueKind::OutOfRange(*v)),
        (PropertyValue::Date(d), ScalarType::Date) => Ok(FieldValue::Date(*d)),
        (PropertyValue::Boolean(b), ScalarType::Boolean) => Ok(FieldValue::Boolean(*b)),
        (PropertyValue::Double(_) | PropertyValue::Binary(_) | PropertyValue::Reference(_), _) => {
            Err(IssueKind::UnsupportedType(value.property_type()))
        }
        (other, scalar) => Err(IssueKind::TypeMismatch {
            expected: scalar.to_string(),
            found: other.property_type().to_string(),
        }),
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
