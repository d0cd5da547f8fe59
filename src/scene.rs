//! Scene service: creates and destroys the visual nodes the map spawns
//!
//! The navigator never builds visuals itself. Info boxes and shelf icons
//! are requested through [`SceneService`], which a renderer can implement
//! however it likes. [`MemoryScene`] is the stock implementation: it keeps
//! the node table in memory for the SDL frontend to draw from and for tests
//! to inspect.

use crate::error::SceneError;
use crate::map::ScreenId;
use crate::motion::Point;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefabKind {
    InfoBox,
    CharacterIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// Container a node is created under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeParent {
    /// The info-box container of one screen
    InfoContainer(ScreenId),
    IconShelf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: PrefabKind,
    pub position: Point,
    pub parent: NodeParent,
    pub label: String,
}

pub trait SceneService {
    fn instantiate(
        &mut self,
        kind: PrefabKind,
        position: Point,
        parent: NodeParent,
    ) -> Result<NodeHandle, SceneError>;

    fn destroy(&mut self, node: NodeHandle);

    fn set_label(&mut self, node: NodeHandle, label: &str);
}

/// In-memory node table
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeHandle, SceneNode>,
    screen_count: usize,
    node_limit: Option<usize>,
    next_node: u64,
}

impl MemoryScene {
    /// Scene with one info container per screen
    pub fn new(screen_count: usize) -> Self {
        MemoryScene {
            screen_count,
            ..Default::default()
        }
    }

    /// Refuses to hold more than `limit` live nodes
    pub fn with_node_limit(screen_count: usize, limit: usize) -> Self {
        MemoryScene {
            node_limit: Some(limit),
            ..Self::new(screen_count)
        }
    }

    pub fn get(&self, node: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live nodes under `parent`, oldest first
    pub fn children(&self, parent: NodeParent) -> impl Iterator<Item = (NodeHandle, &SceneNode)> {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.parent == parent)
            .map(|(handle, node)| (*handle, node))
    }

    pub fn count(&self, kind: PrefabKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }
}

impl SceneService for MemoryScene {
    fn instantiate(
        &mut self,
        kind: PrefabKind,
        position: Point,
        parent: NodeParent,
    ) -> Result<NodeHandle, SceneError> {
        if let NodeParent::InfoContainer(screen) = parent {
            if screen.index() >= self.screen_count {
                return Err(SceneError::MissingParent(screen));
            }
        }
        if let Some(limit) = self.node_limit {
            if self.nodes.len() >= limit {
                return Err(SceneError::Exhausted(limit));
            }
        }

        let handle = NodeHandle(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            handle,
            SceneNode {
                kind,
                position,
                parent,
                label: String::new(),
            },
        );
        Ok(handle)
    }

    fn destroy(&mut self, node: NodeHandle) {
        if self.nodes.remove(&node).is_none() {
            log::debug!("destroy of unknown node {:?} ignored", node);
        }
    }

    fn set_label(&mut self, node: NodeHandle, label: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.label = label.to_string();
        }
    }
}
