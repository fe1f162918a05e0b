//! Radial placement of attributes around their entity.

use std::f32::consts::TAU;

use log::debug;

use erd_layout_core::{diagram::GraphNode, geometry::Point};

use crate::{
    layout::collision::{CollisionResolver, PlacementCandidate},
    surface::{DiagramSurface, SurfaceError},
};

/// Outcome of placing one entity's attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadialPlacement {
    /// Final candidates, in attribute order
    pub candidates: Vec<PlacementCandidate>,
    /// Collision passes run; 0 when there was nothing to place
    pub passes: usize,
}

/// Spreads attributes on evenly divided rays around their entity.
///
/// The first attribute sits at angle 0 and the rest follow at `2π/n`
/// increments. Attributes with longer labels sit up to 20% further out than
/// the base radius.
#[derive(Debug, Clone)]
pub struct RadialPlacer {
    attribute_spacing: f32,
    resolver: CollisionResolver,
}

impl RadialPlacer {
    pub fn new(attribute_spacing: f32) -> Self {
        Self {
            attribute_spacing,
            resolver: CollisionResolver::default(),
        }
    }

    /// Radius before per-label inflation.
    ///
    /// Grows with the number of attributes and the longest label, and never
    /// drops below 80.
    pub fn base_radius(&self, attributes: &[GraphNode]) -> f32 {
        let max_label_len = max_label_len(attributes);
        let radius = self.attribute_spacing
            + attributes.len() as f32 * 5.0
            + max_label_len as f32 * 2.0;
        radius.max(80.0)
    }

    /// Initial candidates for `attributes` around `center`, before collision
    /// resolution.
    pub fn candidates(&self, center: Point, attributes: &[GraphNode]) -> Vec<PlacementCandidate> {
        let count = attributes.len();
        let base_radius = self.base_radius(attributes);
        let max_label_len = max_label_len(attributes);

        attributes
            .iter()
            .enumerate()
            .map(|(index, attribute)| {
                let angle = TAU * index as f32 / count as f32;
                let inflation = if max_label_len == 0 {
                    0.0
                } else {
                    attribute.label_len() as f32 / max_label_len as f32
                };
                let radius = base_radius * (1.0 + 0.2 * inflation);
                PlacementCandidate::new(attribute, index, angle, radius, center)
            })
            .collect()
    }

    /// Places `attributes` around `entity` and writes their positions.
    ///
    /// All candidates are resolved before the first write, so a surface never
    /// sees a partially resolved set. An empty attribute list writes nothing.
    ///
    /// # Errors
    ///
    /// Returns the first [`SurfaceError`] reported while writing positions.
    pub fn place<S: DiagramSurface + ?Sized>(
        &self,
        surface: &mut S,
        entity: &GraphNode,
        attributes: &[GraphNode],
    ) -> Result<RadialPlacement, SurfaceError> {
        if attributes.is_empty() {
            return Ok(RadialPlacement::default());
        }

        let center = entity.position();
        let mut candidates = self.candidates(center, attributes);
        let passes = self.resolver.resolve(&mut candidates, center);

        for candidate in &candidates {
            surface.set_node_position(candidate.key(), candidate.position())?;
        }

        debug!(
            entity = entity.key().to_string(),
            attribute_count = candidates.len(),
            passes;
            "Placed attributes around entity"
        );

        Ok(RadialPlacement { candidates, passes })
    }
}

fn max_label_len(nodes: &[GraphNode]) -> usize {
    nodes.iter().map(GraphNode::label_len).max().unwrap_or(0)
}
