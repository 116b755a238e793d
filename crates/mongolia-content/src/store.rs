//! The content store interface.

use crate::error::Result;
use crate::{NodeId, Property, PropertyValue};

/// A hierarchical store of named nodes carrying scalar properties.
///
/// Nodes are addressed by [`NodeId`]. Paths passed to [`ContentStore::node`]
/// and [`ContentStore::add_node`] are parsed with [`crate::NodePath`] and are
/// relative to the given node unless they start with `/`.
pub trait ContentStore {
    /// The root node of this store.
    fn root(&self) -> NodeId;

    /// Look up a node by path. Returns `None` if nothing exists there.
    fn node(&self, parent: NodeId, rel_path: &str) -> Result<Option<NodeId>>;

    /// Create a node at `rel_path` with the given primary type.
    ///
    /// Every segment except the last must already exist. Creating a name that
    /// is already taken appends a same-name sibling.
    fn add_node(&mut self, parent: NodeId, rel_path: &str, primary_type: &str) -> Result<NodeId>;

    /// Remove a node and its whole subtree.
    fn remove_node(&mut self, node: NodeId) -> Result<()>;

    /// All properties of a node.
    fn properties(&self, node: NodeId) -> Result<Vec<Property>>;

    /// Child nodes in order.
    fn children(&self, node: NodeId) -> Result<Vec<NodeId>>;

    /// A single property, if set.
    fn property(&self, node: NodeId, name: &str) -> Result<Option<PropertyValue>>;

    /// Set a property, replacing any previous value.
    fn set_property(&mut self, node: NodeId, name: &str, value: PropertyValue) -> Result<()>;

    /// The node's own name. The root's name is empty.
    fn name(&self, node: NodeId) -> Result<String>;

    /// The node's primary type label.
    fn primary_type(&self, node: NodeId) -> Result<String>;

    /// Replace the node's primary type label.
    fn set_primary_type(&mut self, node: NodeId, primary_type: &str) -> Result<()>;

    /// Check whether a path resolves under `parent`.
    fn has_node(&self, parent: NodeId, rel_path: &str) -> Result<bool> {
        Ok(self.node(parent, rel_path)?.is_some())
    }

    /// Check whether a property is set.
    fn has_property(&self, node: NodeId, name: &str) -> Result<bool> {
        Ok(self.property(node, name)?.is_some())
    }
}
