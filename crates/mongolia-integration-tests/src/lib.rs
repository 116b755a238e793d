//! Shared fixtures for the Mongolia integration tests.

use std::collections::HashSet;
use std::sync::Arc;

use mongolia_content::{ContentStore, MemoryStore, NodeId, Property, PropertyValue, Result, StoreError};
use mongolia_i18n::{Locale, LocaleProvider, StaticLocales};
use mongolia_mapper::{RecordSchema, ScalarType, SchemaRegistry, TreeMapper};

/// Record types used across the tests.
///
/// - `Product`: scalars of every type, a translatable `title`, and a
///   `variants` collection of `Variant`.
/// - `Variant`: a translatable `label` and an integer `size`.
/// - `Plain`: scalar fields only, none translatable.
pub fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            RecordSchema::builder("Product")
                .scalar("sku", ScalarType::String)
                .translatable("title", ScalarType::String)
                .scalar("stock", ScalarType::Integer)
                .scalar("published", ScalarType::Boolean)
                .scalar("released", ScalarType::Date)
                .children("variants", "Variant")
                .build()
                .expect("Product schema"),
        )
        .expect("register Product");
    registry
        .register(
            RecordSchema::builder("Variant")
                .translatable("label", ScalarType::String)
                .scalar("size", ScalarType::Integer)
                .build()
                .expect("Variant schema"),
        )
        .expect("register Variant");
    registry
        .register(
            RecordSchema::builder("Plain")
                .scalar("name", ScalarType::String)
                .scalar("count", ScalarType::Integer)
                .scalar("active", ScalarType::Boolean)
                .scalar("stamp", ScalarType::Date)
                .build()
                .expect("Plain schema"),
        )
        .expect("register Plain");
    registry.validate().expect("element types registered");
    registry
}

/// A mapper over [`registry`] with English as the default locale.
pub fn mapper() -> TreeMapper {
    mapper_with(StaticLocales::default())
}

/// A mapper over [`registry`] with the given locale provider.
pub fn mapper_with<P: LocaleProvider + 'static>(locales: P) -> TreeMapper {
    TreeMapper::new(Arc::new(registry()), Arc::new(locales))
}

/// Shorthand for a known-good locale code.
pub fn locale(code: &str) -> Locale {
    Locale::parse(code).expect("valid locale code")
}

/// A store containing `/a/b` with `b` of type `shop:product`.
pub fn store_with_a_b() -> (MemoryStore, NodeId, NodeId) {
    let mut store = MemoryStore::new();
    let root = store.root();
    let a = store.add_node(root, "a", "mgnl:folder").expect("add /a");
    let b = store.add_node(a, "b", "shop:product").expect("add /a/b");
    (store, a, b)
}

/// Wraps a [`MemoryStore`] and fails chosen operations on chosen nodes.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    failing_properties: HashSet<NodeId>,
    failing_children: HashSet<NodeId>,
    failing_writes: HashSet<String>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Make `properties(node)` fail.
    pub fn fail_properties(&mut self, node: NodeId) {
        self.failing_properties.insert(node);
    }

    /// Make `children(node)` fail.
    pub fn fail_children(&mut self, node: NodeId) {
        self.failing_children.insert(node);
    }

    /// Make `set_property` fail for a property name.
    pub fn fail_writes_of(&mut self, name: &str) {
        self.failing_writes.insert(name.to_string());
    }

    fn broken(what: &str, node: NodeId) -> StoreError {
        StoreError::Backend(format!("{} unavailable for {}", what, node))
    }
}

impl ContentStore for FlakyStore {
    fn root(&self) -> NodeId {
        self.inner.root()
    }

    fn node(&self, parent: NodeId, rel_path: &str) -> Result<Option<NodeId>> {
        self.inner.node(parent, rel_path)
    }

    fn add_node(&mut self, parent: NodeId, rel_path: &str, primary_type: &str) -> Result<NodeId> {
        self.inner.add_node(parent, rel_path, primary_type)
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.inner.remove_node(node)
    }

    fn properties(&self, node: NodeId) -> Result<Vec<Property>> {
        if self.failing_properties.contains(&node) {
            return Err(Self::broken("properties", node));
        }
        self.inner.properties(node)
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        if self.failing_children.contains(&node) {
            return Err(Self::broken("children", node));
        }
        self.inner.children(node)
    }

    fn property(&self, node: NodeId, name: &str) -> Result<Option<PropertyValue>> {
        self.inner.property(node, name)
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: PropertyValue) -> Result<()> {
        if self.failing_writes.contains(name) {
            return Err(Self::broken(name, node));
        }
        self.inner.set_property(node, name, value)
    }

    fn name(&self, node: NodeId) -> Result<String> {
        self.inner.name(node)
    }

    fn primary_type(&self, node: NodeId) -> Result<String> {
        self.inner.primary_type(node)
    }

    fn set_primary_type(&mut self, node: NodeId, primary_type: &str) -> Result<()> {
        self.inner.set_primary_type(node, primary_type)
    }
}
