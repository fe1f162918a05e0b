//! Data model shared between the layout engine and diagram surfaces.
//!
//! Surfaces hand out [`GraphNode`] and [`GraphLink`] values as snapshots of
//! their own state. The layout engine reads identity, category and label from
//! them, and reports new positions back through the surface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{geometry::Point, identifier::Id};

/// Role of a node in an entity-relationship diagram.
///
/// Classification is done by the host; the layout engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// A database entity (table).
    Entity,
    /// A field of an entity.
    Attribute,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCategory::Entity => f.write_str("entity"),
            NodeCategory::Attribute => f.write_str("attribute"),
        }
    }
}

/// Snapshot of one diagram node.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    key: Id,
    category: NodeCategory,
    label: String,
    position: Point,
}

impl GraphNode {
    pub fn new(key: Id, category: NodeCategory, label: impl Into<String>, position: Point) -> Self {
        Self {
            key,
            category,
            label: label.into(),
            position,
        }
    }

    /// Unique key of the node within its diagram
    pub fn key(&self) -> Id {
        self.key
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }

    pub fn is_entity(&self) -> bool {
        self.category == NodeCategory::Entity
    }

    pub fn is_attribute(&self) -> bool {
        self.category == NodeCategory::Attribute
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of characters in the label, used as a proxy for its rendered width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erd_layout_core::{diagram::{GraphNode, NodeCategory}, geometry::Point};
    /// let node = GraphNode::new("n".into(), NodeCategory::Attribute, "名前", Point::default());
    /// assert_eq!(node.label_len(), 2);
    /// ```
    pub fn label_len(&self) -> usize {
        self.label.chars().count()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// Identifies a link by its place in the surface's link enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl LinkId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of a directed link between two nodes.
///
/// Endpoints are node keys; a surface may hand out links whose endpoints do
/// not resolve to any of its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLink {
    id: LinkId,
    from: Id,
    to: Id,
}

impl GraphLink {
    pub fn new(id: LinkId, from: Id, to: Id) -> Self {
        Self { id, from, to }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Key of the source node
    pub fn from(&self) -> Id {
        self.from
    }

    /// Key of the target node
    pub fn to(&self) -> Id {
        self.to
    }
}

/// Value written to a node or link property by style application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f32),
    Text(String),
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(value) => write!(f, "{value}"),
            PropertyValue::Text(value) => f.write_str(value),
        }
    }
}
