//! Record to node.

use mongolia_content::{ContentStore, NodeId, PropertyValue};
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::outcome::{IssueKind, MapIssue, Mapped};
use crate::record::{FieldValue, Record};
use crate::TreeMapper;

impl TreeMapper {
    /// Upsert `record` at `rel_path` under `parent`.
    ///
    /// An existing node is updated in place and keeps its type. Otherwise a
    /// node of type `type_label` is created. Set scalar fields are written to
    /// their canonical properties. Unset fields, child collections and
    /// per-locale overrides are left alone.
    ///
    /// Fails when the target can be neither found nor created. A property that
    /// can't be written is reported in [`Mapped::issues`] and the remaining
    /// fields are still written.
    pub fn write<S: ContentStore + ?Sized>(
        &self,
        store: &mut S,
        record: &Record,
        parent: NodeId,
        rel_path: &str,
        type_label: &str,
    ) -> Result<Mapped<NodeId>> {
        let node = match store.node(parent, rel_path) {
            Ok(Some(existing)) => {
                debug!("Updating '{}' from {}", rel_path, record.type_name());
                existing
            }
            Ok(None) => store.add_node(parent, rel_path, type_label).map_err(|e| {
                error!("Unable to create node {}: {}", rel_path, e);
                e
            })?,
            Err(e) => {
                error!("Unable to look up node {}: {}", rel_path, e);
                return Err(e.into());
            }
        };

        let mut issues = Vec::new();
        for field in &record.schema().fields {
            let Some(value) = record.get(&field.name) else {
                continue;
            };
            let Some(property) = to_property(value) else {
                debug!("Not writing child collection '{}' of {}", field.name, record.type_name());
                continue;
            };
            if let Err(e) = store.set_property(node, &field.name, property) {
                warn!("Unable to write '{}' on {}: {}", field.name, rel_path, e);
                issues.push(MapIssue::new(field.name.as_str(), IssueKind::Store(e)));
            }
        }

        Ok(Mapped::new(node, issues))
    }
}

/// The canonical property for a scalar value.
fn to_property(value: &FieldValue) -> Option<PropertyValue> {
    match value {
        FieldValue::String(s) => Some(PropertyValue::String(s.clone())),
        FieldValue::Integer(v) => Some(PropertyValue::Long(i64::from(*v))),
        FieldValue::Date(d) => Some(PropertyValue::Date(*d)),
        FieldValue::Boolean(b) => Some(PropertyValue::Boolean(*b)),
        FieldValue::Children(_) => None,
    }
}
