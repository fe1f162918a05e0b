//! Classification of diagram nodes into entities and their attributes.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use erd_layout_core::{
    diagram::{GraphLink, GraphNode},
    identifier::Id,
};

use crate::error::LayoutError;

/// Attributes of each entity, keyed by entity key.
///
/// Built fresh for every layout run. Entities appear in the order the
/// surface enumerates them, and each entity's attributes in the order their
/// links were enumerated. Entities without attributes map to an empty list.
#[derive(Debug, Default)]
pub struct EntityIndex {
    attributes: IndexMap<Id, Vec<GraphNode>>,
}

/// Result of classifying a diagram.
#[derive(Debug)]
pub struct Classification {
    pub entities: Vec<GraphNode>,
    pub index: EntityIndex,
}

impl EntityIndex {
    /// Splits `nodes` into entities and indexes attributes under the entity
    /// linking to them.
    ///
    /// Only links going from an entity to an attribute are indexed; all others
    /// are ignored. An attribute linked from several entities is listed under
    /// each of them.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DanglingLink`] if a link endpoint is not one of `nodes`.
    pub fn classify(nodes: &[GraphNode], links: &[GraphLink]) -> Result<Classification, LayoutError> {
        let by_key: HashMap<Id, &GraphNode> = nodes.iter().map(|node| (node.key(), node)).collect();

        let mut entities = Vec::new();
        let mut index = EntityIndex::default();
        for node in nodes.iter().filter(|node| node.is_entity()) {
            entities.push(node.clone());
            index.attributes.insert(node.key(), Vec::new());
        }

        for link in links {
            let resolve = |key: Id| {
                by_key
                    .get(&key)
                    .copied()
                    .ok_or(LayoutError::DanglingLink {
                        link: link.id(),
                        key,
                    })
            };
            let from = resolve(link.from())?;
            let to = resolve(link.to())?;

            if from.is_entity() && to.is_attribute() {
                if let Some(attributes) = index.attributes.get_mut(&from.key()) {
                    trace!(entity = from.key().to_string(), attribute = to.key().to_string(); "Indexed attribute");
                    attributes.push(to.clone());
                }
            }
        }

        debug!(
            entity_count = entities.len(),
            attribute_count = index.attribute_count();
            "Classified diagram nodes"
        );

        Ok(Classification { entities, index })
    }

    /// Attributes of `entity`, empty if it has none or is not an indexed entity.
    pub fn attributes_of(&self, entity: Id) -> &[GraphNode] {
        self.attributes
            .get(&entity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of indexed attribute entries
    pub fn attribute_count(&self) -> usize {
        self.attributes.values().map(Vec::len).sum()
    }

    /// Number of indexed entities
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
