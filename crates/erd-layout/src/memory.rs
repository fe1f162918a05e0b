//! In-memory [`DiagramSurface`] implementation.
//!
//! [`MemoryDiagram`] stores nodes, links and their properties in plain
//! collections. It backs the command-line tool and the tests, and serves as
//! the reference for how a surface is expected to behave:
//!
//! - nodes and links enumerate in insertion order;
//! - transactions nest, each `begin` saving a snapshot that `rollback`
//!   restores and `commit` discards;
//! - links are stored without checking their endpoints, so a malformed
//!   reference is only discovered when a layout reads it.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use erd_layout_core::{
    diagram::{GraphLink, GraphNode, LinkId, NodeCategory, PropertyValue},
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::{
    config::ViewConfig,
    surface::{DiagramSurface, SurfaceError},
};

/// Property bag attached to a node or link.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Visible region chosen by [`DiagramSurface::fit_and_center`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: Point,
    scale: f32,
}

impl Viewport {
    pub fn new(center: Point, scale: f32) -> Self {
        Self { center, scale }
    }

    /// Diagram point shown at the middle of the view
    pub fn center(&self) -> Point {
        self.center
    }

    /// Zoom factor from diagram units to view units
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NodeEntry {
    node: GraphNode,
    properties: Properties,
}

#[derive(Debug, Clone, PartialEq)]
struct LinkEntry {
    from: Id,
    to: Id,
    properties: Properties,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    nodes: IndexMap<Id, NodeEntry>,
    links: Vec<LinkEntry>,
}

/// A diagram held entirely in memory.
///
/// # Examples
///
/// ```
/// use erd_layout::memory::MemoryDiagram;
/// use erd_layout::surface::DiagramSurface;
/// use erd_layout_core::{diagram::NodeCategory, geometry::Point};
///
/// let mut diagram = MemoryDiagram::default();
/// diagram.add_node("user", NodeCategory::Entity, "User", Point::default()).unwrap();
/// diagram.add_node("user_id", NodeCategory::Attribute, "id", Point::default()).unwrap();
/// diagram.add_link("user", "user_id");
///
/// assert_eq!(diagram.node_count(), 2);
/// assert_eq!(diagram.links().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryDiagram {
    nodes: IndexMap<Id, NodeEntry>,
    links: Vec<LinkEntry>,
    view: ViewConfig,
    viewport: Option<Viewport>,
    transactions: Vec<(String, Snapshot)>,
}

impl MemoryDiagram {
    /// Creates an empty diagram fitted into a view of the given configuration.
    pub fn new(view: ViewConfig) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Rejected`] if a node with the same key already exists.
    pub fn add_node(
        &mut self,
        key: impl Into<Id>,
        category: NodeCategory,
        label: impl Into<String>,
        position: Point,
    ) -> Result<(), SurfaceError> {
        let key = key.into();
        if self.nodes.contains_key(&key) {
            return Err(SurfaceError::Rejected {
                target: format!("node `{key}`"),
                reason: "duplicate node key".to_string(),
            });
        }
        let node = GraphNode::new(key, category, label, position);
        self.nodes.insert(
            key,
            NodeEntry {
                node,
                properties: Properties::new(),
            },
        );
        Ok(())
    }

    /// Adds a directed link. Endpoints are not checked.
    pub fn add_link(&mut self, from: impl Into<Id>, to: impl Into<Id>) -> LinkId {
        let id = LinkId::new(self.links.len());
        self.links.push(LinkEntry {
            from: from.into(),
            to: to.into(),
            properties: Properties::new(),
        });
        id
    }

    /// Returns a snapshot of one node.
    pub fn node(&self, key: impl Into<Id>) -> Option<GraphNode> {
        self.nodes.get(&key.into()).map(|entry| entry.node.clone())
    }

    pub fn node_properties(&self, key: impl Into<Id>) -> Option<&Properties> {
        self.nodes.get(&key.into()).map(|entry| &entry.properties)
    }

    pub fn node_property(&self, key: impl Into<Id>, name: &str) -> Option<&PropertyValue> {
        self.node_properties(key)?.get(name)
    }

    pub fn link_properties(&self, link: LinkId) -> Option<&Properties> {
        self.links.get(link.index()).map(|entry| &entry.properties)
    }

    pub fn link_property(&self, link: LinkId, name: &str) -> Option<&PropertyValue> {
        self.link_properties(link)?.get(name)
    }

    /// Viewport chosen by the last fit, if any.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Number of transactions currently open
    pub fn transaction_depth(&self) -> usize {
        self.transactions.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.nodes.clone(),
            links: self.links.clone(),
        }
    }

    fn pop_transaction(&mut self, name: &str, action: &str) -> Option<Snapshot> {
        let Some((open_name, snapshot)) = self.transactions.pop() else {
            warn!(transaction = name, action; "No open transaction");
            return None;
        };
        if open_name != name {
            warn!(
                transaction = name,
                open_transaction = open_name.as_str(),
                action;
                "Transaction name does not match the innermost open transaction"
            );
        }
        Some(snapshot)
    }
}

impl DiagramSurface for MemoryDiagram {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn nodes(&self) -> Vec<GraphNode> {
        self.nodes.values().map(|entry| entry.node.clone()).collect()
    }

    fn links(&self) -> Vec<GraphLink> {
        self.links
            .iter()
            .enumerate()
            .map(|(index, entry)| GraphLink::new(LinkId::new(index), entry.from, entry.to))
            .collect()
    }

    fn set_node_position(&mut self, key: Id, position: Point) -> Result<(), SurfaceError> {
        let entry = self
            .nodes
            .get_mut(&key)
            .ok_or(SurfaceError::UnknownNode(key))?;
        trace!(node = key.to_string(), x = position.x(), y = position.y(); "Moving node");
        entry.node.set_position(position);
        Ok(())
    }

    fn set_node_property(
        &mut self,
        key: Id,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SurfaceError> {
        let entry = self
            .nodes
            .get_mut(&key)
            .ok_or(SurfaceError::UnknownNode(key))?;
        entry.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn set_link_property(
        &mut self,
        link: LinkId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SurfaceError> {
        let entry = self
            .links
            .get_mut(link.index())
            .ok_or(SurfaceError::UnknownLink(link))?;
        entry.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn begin_transaction(&mut self, name: &str) {
        let snapshot = self.snapshot();
        self.transactions.push((name.to_string(), snapshot));
    }

    fn commit_transaction(&mut self, name: &str) {
        self.pop_transaction(name, "commit");
    }

    fn rollback_transaction(&mut self, name: &str) {
        if let Some(snapshot) = self.pop_transaction(name, "rollback") {
            self.nodes = snapshot.nodes;
            self.links = snapshot.links;
        }
    }

    fn fit_and_center(&mut self) {
        let Some(bounds) = Bounds::from_points(self.nodes.values().map(|e| e.node.position()))
        else {
            debug!("Nothing to fit, diagram has no nodes");
            return;
        };

        let padded = bounds.expand(self.view.padding());
        let scale = [
            (self.view.width(), padded.width()),
            (self.view.height(), padded.height()),
        ]
        .into_iter()
        .filter(|&(_, extent)| extent > 0.0)
        .map(|(view, extent)| view / extent)
        .reduce(f32::min)
        .unwrap_or(1.0);

        let viewport = Viewport::new(bounds.center(), scale);
        debug!(
            center_x = viewport.center().x(),
            center_y = viewport.center().y(),
            scale = viewport.scale();
            "Fitted content into view"
        );
        self.viewport = Some(viewport);
    }
}
