//! Circular placement of entities around the diagram origin.

use std::f32::consts::TAU;

use log::{debug, trace};

use erd_layout_core::{diagram::GraphNode, geometry::Point};

use crate::{
    layout::{index::EntityIndex, radial::RadialPlacer},
    surface::{DiagramSurface, SurfaceError},
};

/// Outcome of placing all entities on the circle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircularPlacement {
    /// Radius of the circle the entities were placed on
    pub radius: f32,
    /// Collision passes run while re-placing attributes
    pub collision_passes: usize,
}

/// Spreads entities evenly on a circle centered at the origin, then places
/// each entity's attributes around its new position.
#[derive(Debug, Clone)]
pub struct CircularPlacer {
    entity_spacing: f32,
    radial: RadialPlacer,
}

impl CircularPlacer {
    pub fn new(entity_spacing: f32, radial: RadialPlacer) -> Self {
        Self {
            entity_spacing,
            radial,
        }
    }

    /// Radius of the circle for `entity_count` entities.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erd_layout::layout::{CircularPlacer, RadialPlacer};
    /// let placer = CircularPlacer::new(180.0, RadialPlacer::new(100.0));
    /// assert_eq!(placer.circle_radius(2), 180.0);
    /// assert_eq!(placer.circle_radius(5), 250.0);
    /// ```
    pub fn circle_radius(&self, entity_count: usize) -> f32 {
        150.0_f32
            .max(entity_count as f32 * 50.0)
            .max(self.entity_spacing)
    }

    /// Places `entities` on the circle and their attributes around them.
    ///
    /// Each entity's attributes are placed right after the entity itself, so
    /// they always surround its final position. The positions in `entities`
    /// are updated to match what was written.
    ///
    /// # Errors
    ///
    /// Returns the first [`SurfaceError`] reported while writing positions.
    pub fn place<S: DiagramSurface + ?Sized>(
        &self,
        surface: &mut S,
        entities: &mut [GraphNode],
        index: &EntityIndex,
    ) -> Result<CircularPlacement, SurfaceError> {
        let count = entities.len();
        let radius = self.circle_radius(count);
        let mut collision_passes = 0;

        for (i, entity) in entities.iter_mut().enumerate() {
            let angle = TAU * i as f32 / count as f32;
            let position = Point::from_polar(Point::default(), radius, angle);

            surface.set_node_position(entity.key(), position)?;
            entity.set_position(position);
            trace!(entity = entity.key().to_string(), angle; "Placed entity on circle");

            let placement = self
                .radial
                .place(surface, entity, index.attributes_of(entity.key()))?;
            collision_passes += placement.passes;
        }

        debug!(entity_count = count, radius; "Placed entities on circle");

        Ok(CircularPlacement {
            radius,
            collision_passes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use float_cmp::{approx_eq, assert_approx_eq};

    use erd_layout_core::{
        diagram::{GraphLink, NodeCategory},
        identifier::Id,
    };

    use super::*;
    use crate::{layout::index::Classification, memory::MemoryDiagram};

    fn placer(entity_spacing: f32) -> CircularPlacer {
        CircularPlacer::new(entity_spacing, RadialPlacer::new(100.0))
    }

    /// Builds a diagram with the given entities, each owning `attribute_count` attributes.
    fn diagram(entities: &[&str], attribute_count: usize) -> MemoryDiagram {
        let mut diagram = MemoryDiagram::default();
        for entity in entities {
            diagram
                .add_node(*entity, NodeCategory::Entity, *entity, Point::new(7.0, 7.0))
                .unwrap();
            for i in 0..attribute_count {
                let key = format!("{entity}_field_{i}");
                diagram
                    .add_node(key.as_str(), NodeCategory::Attribute, key.as_str(), Point::default())
                    .unwrap();
                diagram.add_link(*entity, key.as_str());
            }
        }
        diagram
    }

    fn classify(diagram: &MemoryDiagram) -> Classification {
        EntityIndex::classify(&diagram.nodes(), &diagram.links()).unwrap()
    }

    #[test]
    fn test_circle_radius_selection() {
        assert_eq!(placer(0.0).circle_radius(1), 150.0);
        assert_eq!(placer(0.0).circle_radius(3), 150.0);
        assert_eq!(placer(0.0).circle_radius(10), 500.0);
        assert_eq!(placer(400.0).circle_radius(3), 400.0);
    }

    #[test]
    fn test_entities_are_evenly_spaced_on_circle() {
        let mut diagram = diagram(&["a", "b", "c", "d"], 0);
        let Classification { mut entities, index } = classify(&diagram);

        let placement = placer(180.0)
            .place(&mut diagram, &mut entities, &index)
            .unwrap();

        assert_eq!(placement.radius, 200.0);
        assert_eq!(placement.collision_passes, 0);
        for (i, entity) in entities.iter().enumerate() {
            let position = diagram.node(entity.key()).unwrap().position();
            assert_eq!(position, entity.position());
            assert_approx_eq!(f32, position.hypot(), 200.0, epsilon = 0.001);

            let angle = position.y().atan2(position.x()).rem_euclid(2.0 * PI);
            let expected = 2.0 * PI * i as f32 / 4.0;
            assert!(
                approx_eq!(f32, angle, expected, epsilon = 0.001)
                    || approx_eq!(f32, angle, expected + 2.0 * PI, epsilon = 0.001),
                "entity {i}: angle {angle}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_attributes_follow_entity_to_new_position() {
        let mut diagram = diagram(&["left", "right"], 2);
        let Classification { mut entities, index } = classify(&diagram);

        let placement = placer(180.0)
            .place(&mut diagram, &mut entities, &index)
            .unwrap();

        assert!(placement.collision_passes >= 2);
        for entity in &entities {
            let center = diagram.node(entity.key()).unwrap().position();
            let base_radius = RadialPlacer::new(100.0).base_radius(index.attributes_of(entity.key()));
            for attribute in index.attributes_of(entity.key()) {
                let position = diagram.node(attribute.key()).unwrap().position();
                assert!(position.distance(center) >= base_radius - 0.01);
            }
        }
    }

    #[test]
    fn test_single_entity_sits_at_angle_zero() {
        let mut diagram = diagram(&["solo"], 0);
        let Classification { mut entities, index } = classify(&diagram);

        placer(0.0)
            .place(&mut diagram, &mut entities, &index)
            .unwrap();

        assert_eq!(
            diagram.node(Id::new("solo")).unwrap().position(),
            Point::new(150.0, 0.0)
        );
    }

    #[test]
    fn test_unknown_entity_is_reported() {
        let mut diagram = MemoryDiagram::default();
        let mut entities = vec![GraphNode::new(
            Id::new("phantom"),
            NodeCategory::Entity,
            "Phantom",
            Point::default(),
        )];
        let links: [GraphLink; 0] = [];
        let Classification { index, .. } = EntityIndex::classify(&entities, &links).unwrap();

        let err = placer(180.0)
            .place(&mut diagram, &mut entities, &index)
            .unwrap_err();

        assert_eq!(err, SurfaceError::UnknownNode(Id::new("phantom")));
    }
}
