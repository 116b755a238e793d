//! JSON export and import of node subtrees.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::memory::MemoryStore;
use crate::store::ContentStore;
use crate::{NodeId, Property};

/// A detached copy of a node and everything below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub primary_type: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub children: Vec<Snapshot>,
}

impl Snapshot {
    /// Create an empty snapshot node.
    pub fn new(name: &str, primary_type: &str) -> Self {
        Self {
            name: name.to_string(),
            primary_type: primary_type.to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Builder-style child setter.
    pub fn with_child(mut self, child: Snapshot) -> Self {
        self.children.push(child);
        self
    }

    /// Copy a subtree out of a store.
    pub fn capture<S: ContentStore + ?Sized>(store: &S, node: NodeId) -> Result<Self> {
        let mut children = Vec::new();
        for child in store.children(node)? {
            children.push(Self::capture(store, child)?);
        }
        Ok(Self {
            name: store.name(node)?,
            primary_type: store.primary_type(node)?,
            properties: store.properties(node)?,
            children,
        })
    }

    /// Recreate this subtree as a new child of `parent`.
    pub fn restore<S: ContentStore + ?Sized>(&self, store: &mut S, parent: NodeId) -> Result<NodeId> {
        let node = store.add_node(parent, &self.name, &self.primary_type)?;
        self.restore_contents(store, node)?;
        Ok(node)
    }

    fn restore_contents<S: ContentStore + ?Sized>(&self, store: &mut S, node: NodeId) -> Result<()> {
        for property in &self.properties {
            store.set_property(node, &property.name, property.value.clone())?;
        }
        for child in &self.children {
            child.restore(store, node)?;
        }
        Ok(())
    }

    /// Number of nodes in this snapshot.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Snapshot::node_count).sum::<usize>()
    }

    /// Write as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        info!("Saved snapshot '{}' ({} nodes) to {:?}", self.name, self.node_count(), path.as_ref());
        Ok(())
    }

    /// Read a snapshot written by [`Snapshot::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl MemoryStore {
    /// Build a store whose root carries the snapshot's properties and children.
    ///
    /// The snapshot's own name and primary type are ignored.
    pub fn from_snapshot(workspace: &str, snapshot: &Snapshot) -> Result<Self> {
        let mut store = MemoryStore::with_workspace(workspace);
        let root = store.root();
        snapshot.restore_contents(&mut store, root)?;
        Ok(store)
    }
}
