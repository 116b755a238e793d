//! In-memory content store.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::path::{validate_name, NodePath, Segment};
use crate::store::ContentStore;
use crate::{NodeId, Property, PropertyValue};

/// Workspace name used by [`MemoryStore::new`].
pub const DEFAULT_WORKSPACE: &str = "website";

/// Primary type of every store root.
pub const ROOT_TYPE: &str = "rep:root";

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    primary_type: String,
    parent: Option<NodeId>,
    properties: BTreeMap<String, PropertyValue>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(name: &str, primary_type: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            primary_type: primary_type.to_string(),
            parent,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

/// Arena-backed [`ContentStore`] holding one workspace tree.
///
/// Property iteration is sorted by name; child iteration keeps insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    workspace: String,
    root: NodeId,
    nodes: HashMap<NodeId, NodeData>,
    next_sequence: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store for the default workspace.
    pub fn new() -> Self {
        Self::with_workspace(DEFAULT_WORKSPACE)
    }

    /// Create an empty store for a named workspace.
    pub fn with_workspace(workspace: &str) -> Self {
        let root = NodeId::derive(workspace, 0);
        let mut nodes = HashMap::new();
        nodes.insert(root, NodeData::new("", ROOT_TYPE, None));
        Self {
            workspace: workspace.to_string(),
            root,
            nodes,
            next_sequence: 1,
        }
    }

    /// Workspace name.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Absolute path of a node, e.g. `/a/b[2]`.
    pub fn path(&self, node: NodeId) -> Result<String> {
        let mut parts = Vec::new();
        let mut current = node;
        while let Some(parent) = self.data(current)?.parent {
            let data = self.data(current)?;
            let index = self.sibling_index(parent, current, &data.name)?;
            if index == 1 {
                parts.push(data.name.clone());
            } else {
                parts.push(format!("{}[{}]", data.name, index));
            }
            current = parent;
        }
        parts.reverse();
        Ok(format!("/{}", parts.join("/")))
    }

    fn data(&self, node: NodeId) -> Result<&NodeData> {
        self.nodes.get(&node).ok_or(StoreError::NodeNotFound(node))
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(&node).ok_or(StoreError::NodeNotFound(node))
    }

    fn sibling_index(&self, parent: NodeId, node: NodeId, name: &str) -> Result<usize> {
        let mut index = 0;
        for child in &self.data(parent)?.children {
            if self.data(*child)?.name == name {
                index += 1;
            }
            if *child == node {
                break;
            }
        }
        Ok(index)
    }

    fn find_child(&self, parent: NodeId, name: &str, index: usize) -> Result<Option<NodeId>> {
        let mut seen = 0;
        for child in &self.data(parent)?.children {
            if self.data(*child)?.name == name {
                seen += 1;
                if seen == index {
                    return Ok(Some(*child));
                }
            }
        }
        Ok(None)
    }

    fn resolve(&self, start: NodeId, path: &NodePath) -> Result<Option<NodeId>> {
        // Fail on a dangling start node even when the path is absolute.
        self.data(start)?;
        let mut current = if path.absolute { self.root } else { start };

        for segment in &path.segments {
            match segment {
                Segment::Current => {}
                Segment::Parent => match self.data(current)?.parent {
                    Some(parent) => current = parent,
                    None => return Ok(None),
                },
                Segment::Child { name, index } => match self.find_child(current, name, *index)? {
                    Some(child) => current = child,
                    None => return Ok(None),
                },
            }
        }

        Ok(Some(current))
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::derive(&self.workspace, self.next_sequence);
        self.next_sequence += 1;
        id
    }
}

impl ContentStore for MemoryStore {
    fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, parent: NodeId, rel_path: &str) -> Result<Option<NodeId>> {
        let path = NodePath::parse(rel_path)?;
        self.resolve(parent, &path)
    }

    fn add_node(&mut self, parent: NodeId, rel_path: &str, primary_type: &str) -> Result<NodeId> {
        let path = NodePath::parse(rel_path)?;
        if let Some(Segment::Child { index, .. }) = path.segments.last() {
            if *index != 1 || rel_path.ends_with(']') {
                return Err(StoreError::InvalidPath {
                    path: rel_path.to_string(),
                    reason: "cannot create a node at an indexed path".to_string(),
                });
            }
        }
        let (parent_path, name) = path.split_last().ok_or_else(|| StoreError::InvalidPath {
            path: rel_path.to_string(),
            reason: "path does not end in a node name".to_string(),
        })?;

        let target_parent = self
            .resolve(parent, &parent_path)?
            .ok_or_else(|| StoreError::PathNotFound(rel_path.to_string()))?;

        let id = self.allocate_id();
        self.nodes
            .insert(id, NodeData::new(name, primary_type, Some(target_parent)));
        self.data_mut(target_parent)?.children.push(id);

        debug!("Added node {} '{}' ({})", id, name, primary_type);
        Ok(id)
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        let parent = self
            .data(node)?
            .parent
            .ok_or(StoreError::RootImmutable)?;
        self.data_mut(parent)?.children.retain(|c| *c != node);

        let mut pending = vec![node];
        let mut removed = 0;
        while let Some(id) = pending.pop() {
            if let Some(data) = self.nodes.remove(&id) {
                pending.extend(data.children);
                removed += 1;
            }
        }

        debug!("Removed node {} ({} nodes in subtree)", node, removed);
        Ok(())
    }

    fn properties(&self, node: NodeId) -> Result<Vec<Property>> {
        Ok(self
            .data(node)?
            .properties
            .iter()
            .map(|(name, value)| Property {
                name: name.clone(),
                value: value.clone(),
            })
            .collect())
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.data(node)?.children.clone())
    }

    fn property(&self, node: NodeId, name: &str) -> Result<Option<PropertyValue>> {
        Ok(self.data(node)?.properties.get(name).cloned())
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: PropertyValue) -> Result<()> {
        validate_name(name)?;
        self.data_mut(node)?
            .properties
            .insert(name.to_string(), value);
        Ok(())
    }

    fn name(&self, node: NodeId) -> Result<String> {
        Ok(self.data(node)?.name.clone())
    }

    fn primary_type(&self, node: NodeId) -> Result<String> {
        Ok(self.data(node)?.primary_type.clone())
    }

    fn set_primary_type(&mut self, node: NodeId, primary_type: &str) -> Result<()> {
        if node == self.root {
            return Err(StoreError::RootImmutable);
        }
        self.data_mut(node)?.primary_type = primary_type.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_ab() -> (MemoryStore, NodeId, NodeId) {
        let mut store = MemoryStore::new();
        let root = store.root();
        let a = store.add_node(root, "a", "mgnl:folder").unwrap();
        let b = store.add_node(a, "b", "mgnl:content").unwrap();
        (store, a, b)
    }

    #[test]
    fn add_and_lookup() {
        let (store, a, b) = store_with_ab();
        let root = store.root();

        assert_eq!(store.node(root, "a").unwrap(), Some(a));
        assert_eq!(store.node(root, "a/b").unwrap(), Some(b));
        assert_eq!(store.node(a, "b").unwrap(), Some(b));
        assert_eq!(store.node(b, "/a").unwrap(), Some(a));
        assert_eq!(store.node(b, "..").unwrap(), Some(a));
        assert_eq!(store.node(root, "..").unwrap(), None);
        assert_eq!(store.node(root, "a/c").unwrap(), None);
        assert_eq!(store.primary_type(b).unwrap(), "mgnl:content");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn multi_segment_add_requires_parent() {
        let (mut store, _, _) = store_with_ab();
        let root = store.root();

        let c = store.add_node(root, "a/b/c", "mgnl:content").unwrap();
        assert_eq!(store.path(c).unwrap(), "/a/b/c");

        let err = store.add_node(root, "x/y", "mgnl:content").unwrap_err();
        assert_eq!(err, StoreError::PathNotFound("x/y".to_string()));
    }

    #[test]
    fn same_name_siblings() {
        let (mut store, a, b) = store_with_ab();
        let b2 = store.add_node(a, "b", "mgnl:content").unwrap();

        assert_ne!(b, b2);
        assert_eq!(store.node(a, "b").unwrap(), Some(b));
        assert_eq!(store.node(a, "b[1]").unwrap(), Some(b));
        assert_eq!(store.node(a, "b[2]").unwrap(), Some(b2));
        assert_eq!(store.path(b2).unwrap(), "/a/b[2]");
        assert!(store.add_node(a, "b[3]", "mgnl:content").is_err());
    }

    #[test]
    fn properties_sorted_and_replaced() {
        let (mut store, _, b) = store_with_ab();
        store.set_property(b, "title", "Hello".into()).unwrap();
        store.set_property(b, "count", PropertyValue::Long(3)).unwrap();
        store.set_property(b, "title", "Hi".into()).unwrap();

        let names: Vec<_> = store.properties(b).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["count", "title"]);
        assert_eq!(store.property(b, "title").unwrap(), Some("Hi".into()));
        assert!(store.has_property(b, "count").unwrap());
        assert!(!store.has_property(b, "missing").unwrap());
    }

    #[test]
    fn remove_subtree() {
        let (mut store, a, b) = store_with_ab();
        store.add_node(b, "leaf", "mgnl:content").unwrap();

        store.remove_node(a).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.name(b), Err(StoreError::NodeNotFound(b)));
        assert_eq!(store.remove_node(store.root()), Err(StoreError::RootImmutable));
    }

    #[test]
    fn unknown_node_errors() {
        let store = MemoryStore::new();
        let ghost = NodeId::from_bytes([9; 32]);
        assert_eq!(store.children(ghost), Err(StoreError::NodeNotFound(ghost)));
        assert_eq!(store.node(ghost, "/"), Err(StoreError::NodeNotFound(ghost)));
    }

    #[test]
    fn root_cannot_be_retyped() {
        let (mut store, a, _) = store_with_ab();
        let root = store.root();
        assert_eq!(store.set_primary_type(root, "x"), Err(StoreError::RootImmutable));
        store.set_primary_type(a, "mgnl:page").unwrap();
        assert_eq!(store.primary_type(a).unwrap(), "mgnl:page");
        assert_eq!(store.name(root).unwrap(), "");
    }

    #[test]
    fn ids_differ_between_workspaces() {
        let a = MemoryStore::with_workspace("website");
        let b = MemoryStore::with_workspace("dam");
        assert_ne!(a.root(), b.root());
        assert_eq!(b.workspace(), "dam");
    }
}
