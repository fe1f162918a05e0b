//! Collision resolution for attributes placed around an entity.
//!
//! Candidates sit on rays leaving their entity at fixed angles. Whenever two
//! of them are closer than their label lengths allow, both are pushed further
//! out along their own ray. The process repeats until a pass finds no
//! collision or the pass limit is reached; residual overlaps after the last
//! pass are accepted.

use log::trace;

use erd_layout_core::{diagram::GraphNode, geometry::Point, identifier::Id};

/// Working record for one attribute during radial placement.
///
/// Candidates for one entity are built as a batch, adjusted in place by the
/// [`CollisionResolver`], and only then written back to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    key: Id,
    label_len: usize,
    index: usize,
    angle: f32,
    radius: f32,
    position: Point,
}

impl PlacementCandidate {
    /// Places `node` at `radius` from `center` along `angle`.
    pub fn new(node: &GraphNode, index: usize, angle: f32, radius: f32, center: Point) -> Self {
        Self {
            key: node.key(),
            label_len: node.label_len(),
            index,
            angle,
            radius,
            position: Point::from_polar(center, radius, angle),
        }
    }

    pub fn key(&self) -> Id {
        self.key
    }

    pub fn label_len(&self) -> usize {
        self.label_len
    }

    /// Position of the attribute within its entity's attribute list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Direction from the entity, in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Distance from the entity
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the candidate `step` further out along its ray.
    fn push_out(&mut self, step: f32, center: Point) {
        self.radius += step;
        self.position = Point::from_polar(center, self.radius, self.angle);
    }
}

/// Iterative radius-growth resolver.
///
/// Two candidates `a` and `b` collide when they are closer than
/// `min_separation + label_clearance * (len(a) + len(b)) / 2`. Each collision
/// grows both radii by `radius_step`; angles are never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResolver {
    min_separation: f32,
    label_clearance: f32,
    radius_step: f32,
    max_passes: usize,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            min_separation: 60.0,
            label_clearance: 5.0,
            radius_step: 20.0,
            max_passes: 5,
        }
    }
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separation required between two unlabeled candidates
    pub fn with_min_separation(mut self, separation: f32) -> Self {
        self.min_separation = separation;
        self
    }

    /// Set the extra separation required per label character
    pub fn with_label_clearance(mut self, clearance: f32) -> Self {
        self.label_clearance = clearance;
        self
    }

    /// Set how far a colliding candidate is pushed out
    pub fn with_radius_step(mut self, step: f32) -> Self {
        self.radius_step = step;
        self
    }

    /// Set the maximum number of passes over all pairs
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Minimum distance allowed between two candidates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erd_layout::layout::CollisionResolver;
    /// let resolver = CollisionResolver::default();
    /// // 60 + 5 * (4 + 6) / 2
    /// assert_eq!(resolver.min_distance(4, 6), 85.0);
    /// ```
    pub fn min_distance(&self, label_len_a: usize, label_len_b: usize) -> f32 {
        self.min_separation + self.label_clearance * (label_len_a + label_len_b) as f32 / 2.0
    }

    fn collides(&self, a: &PlacementCandidate, b: &PlacementCandidate) -> bool {
        a.position.distance(b.position) < self.min_distance(a.label_len, b.label_len)
    }

    /// Pushes colliding candidates apart, returning the number of passes run.
    ///
    /// Pairs are visited in index order and a correction is applied as soon
    /// as a collision is found, so later pairs of the same pass see the
    /// updated positions.
    pub fn resolve(&self, candidates: &mut [PlacementCandidate], center: Point) -> usize {
        let mut passes = 0;
        let mut colliding = true;

        while colliding && passes < self.max_passes {
            colliding = false;
            passes += 1;
            let mut corrections = 0;

            for i in 0..candidates.len() {
                let (head, tail) = candidates.split_at_mut(i + 1);
                let a = &mut head[i];
                for b in tail.iter_mut() {
                    if self.collides(a, b) {
                        colliding = true;
                        corrections += 1;
                        a.push_out(self.radius_step, center);
                        b.push_out(self.radius_step, center);
                    }
                }
            }

            trace!(pass = passes, corrections; "Collision pass finished");
        }

        passes
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use erd_layout_core::diagram::NodeCategory;

    use super::*;

    fn candidate(label: &str, index: usize, angle: f32, radius: f32) -> PlacementCandidate {
        let node = GraphNode::new(
            Id::new(&format!("attr_{index}")),
            NodeCategory::Attribute,
            label,
            Point::default(),
        );
        PlacementCandidate::new(&node, index, angle, radius, Point::default())
    }

    #[test]
    fn test_candidate_position_follows_angle_and_radius() {
        let node = GraphNode::new(Id::new("id"), NodeCategory::Attribute, "id", Point::default());
        let c = PlacementCandidate::new(&node, 0, FRAC_PI_2, 100.0, Point::new(10.0, 10.0));

        assert_eq!(c.key(), "id");
        assert_eq!(c.label_len(), 2);
        assert_approx_eq!(f32, c.position().x(), 10.0, epsilon = 0.001);
        assert_approx_eq!(f32, c.position().y(), 110.0);
    }

    #[test]
    fn test_min_distance() {
        let resolver = CollisionResolver::default();
        assert_eq!(resolver.min_distance(0, 0), 60.0);
        assert_eq!(resolver.min_distance(10, 0), 85.0);
        assert_eq!(resolver.min_distance(3, 4), 77.5);
    }

    #[test]
    fn test_non_colliding_set_is_untouched() {
        let resolver = CollisionResolver::default();
        let mut candidates = vec![candidate("a", 0, 0.0, 200.0), candidate("b", 1, PI, 200.0)];
        let before = candidates.clone();

        let passes = resolver.resolve(&mut candidates, Point::default());

        assert_eq!(passes, 1);
        assert_eq!(candidates, before);
    }

    #[test]
    fn test_empty_and_single_candidate_sets() {
        let resolver = CollisionResolver::default();

        let mut empty: Vec<PlacementCandidate> = Vec::new();
        assert_eq!(resolver.resolve(&mut empty, Point::default()), 1);

        let mut single = vec![candidate("only", 0, 0.0, 80.0)];
        let before = single.clone();
        assert_eq!(resolver.resolve(&mut single, Point::default()), 1);
        assert_eq!(single, before);
    }

    #[test]
    fn test_colliding_pair_moves_outward() {
        let resolver = CollisionResolver::default();
        // Angles 0 and 0.3 at radius 100 are ~30 apart, well below 60 + 5 * 8 / 2 = 80.
        let mut candidates = vec![
            candidate("name", 0, 0.0, 100.0),
            candidate("type", 1, 0.3, 100.0),
        ];
        let initial_distance = candidates[0].position().distance(candidates[1].position());

        let passes = resolver.resolve(&mut candidates, Point::default());

        assert!(passes > 1);
        assert!(candidates[0].radius() > 100.0);
        assert!(candidates[1].radius() > 100.0);
        assert_eq!(candidates[0].angle(), 0.0);
        assert_eq!(candidates[1].angle(), 0.3);
        let final_distance = candidates[0].position().distance(candidates[1].position());
        assert!(final_distance > initial_distance);
    }

    #[test]
    fn test_distance_never_decreases_across_passes() {
        let center = Point::new(40.0, -20.0);
        let mut candidates = vec![
            PlacementCandidate::new(
                &GraphNode::new(Id::new("p"), NodeCategory::Attribute, "price", center),
                0,
                1.0,
                90.0,
                center,
            ),
            PlacementCandidate::new(
                &GraphNode::new(Id::new("q"), NodeCategory::Attribute, "quantity", center),
                1,
                1.2,
                90.0,
                center,
            ),
        ];

        let mut previous = candidates[0].position().distance(candidates[1].position());
        for _ in 0..5 {
            CollisionResolver::default()
                .with_max_passes(1)
                .resolve(&mut candidates, center);
            let current = candidates[0].position().distance(candidates[1].position());
            assert!(current >= previous, "{current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_pass_limit_is_hard() {
        // Identical angles never separate, so every pass finds a collision.
        let resolver = CollisionResolver::default();
        let mut candidates = vec![
            candidate("x", 0, 0.0, 100.0),
            candidate("y", 1, 0.0, 100.0),
            candidate("z", 2, 0.0, 100.0),
        ];

        let passes = resolver.resolve(&mut candidates, Point::default());

        assert_eq!(passes, 5);
        // Each candidate collides with both others in each of the 5 passes.
        for c in &candidates {
            assert_approx_eq!(f32, c.radius(), 100.0 + 5.0 * 2.0 * 20.0);
        }
    }

    #[test]
    fn test_zero_passes_does_nothing() {
        let resolver = CollisionResolver::new().with_max_passes(0);
        let mut candidates = vec![candidate("x", 0, 0.0, 100.0), candidate("y", 1, 0.0, 100.0)];
        let before = candidates.clone();

        assert_eq!(resolver.resolve(&mut candidates, Point::default()), 0);
        assert_eq!(candidates, before);
    }

    #[test]
    fn test_custom_constants() {
        let resolver = CollisionResolver::new()
            .with_min_separation(10.0)
            .with_label_clearance(0.0)
            .with_radius_step(1.0);
        assert_eq!(resolver.min_distance(100, 100), 10.0);

        // 20 apart is fine when only 10 is required.
        let mut candidates = vec![candidate("a", 0, 0.0, 10.0), candidate("b", 1, PI, 10.0)];
        let before = candidates.clone();
        resolver.resolve(&mut candidates, Point::default());
        assert_eq!(candidates, before);
    }
}
