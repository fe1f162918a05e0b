//! Automatic layout for entity-relationship diagrams.
//!
//! Entities are spread evenly on a circle and each entity's attributes are
//! spread on rays around it, with a bounded collision pass pushing crowded
//! attributes outward. The diagram itself stays with the host: the engine
//! reads and writes it through the [`DiagramSurface`](surface::DiagramSurface)
//! trait, inside a single transaction that is rolled back on failure.

pub mod config;
pub mod layout;
pub mod memory;
pub mod surface;

mod error;

pub use erd_layout_core::{diagram, geometry, identifier};

pub use error::LayoutError;

use log::{debug, error, info};

use config::LayoutOptions;
use layout::{CircularPlacer, Classification, EntityIndex, RadialPlacer};
use surface::{DiagramSurface, Transaction};

/// Name of the transaction a layout run is wrapped in.
pub const TRANSACTION_NAME: &str = "auto-layout";

/// What a successful layout run did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutSummary {
    pub entity_count: usize,
    /// Attribute entries placed, counting shared attributes once per entity
    pub attribute_count: usize,
    /// Radius of the entity circle, `None` when circular placement was skipped
    pub circle_radius: Option<f32>,
    /// Collision passes run across all radial placements
    pub collision_passes: usize,
    /// Style writes rejected by the surface
    pub style_failures: usize,
}

/// Layout orchestrator.
///
/// # Examples
///
/// ```
/// use erd_layout::{
///     AutoLayout,
///     config::LayoutOptions,
///     diagram::NodeCategory,
///     geometry::Point,
///     memory::MemoryDiagram,
/// };
///
/// let mut diagram = MemoryDiagram::default();
/// diagram.add_node("user", NodeCategory::Entity, "User", Point::default())?;
/// diagram.add_node("email", NodeCategory::Attribute, "email", Point::default())?;
/// diagram.add_link("user", "email");
///
/// let summary = AutoLayout::new(LayoutOptions::default()).run(&mut diagram)?;
/// assert_eq!(summary.entity_count, 1);
/// assert_eq!(summary.attribute_count, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoLayout {
    options: LayoutOptions,
}

impl AutoLayout {
    /// Create a new orchestrator with the given options.
    ///
    /// # Arguments
    ///
    /// * `options` - Spacing and style values for every run
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out every node of `surface`.
    ///
    /// Styles are applied to all nodes and links, attributes are placed
    /// around their entities and, when there is more than one entity, the
    /// entities are spread on a circle with their attributes re-placed around
    /// the new positions. A single entity keeps its position. On success the
    /// surface is asked to fit its content into view.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::EmptyDiagram`] without touching the surface.
    /// Any other error rolls back every write made by this run. Style values
    /// are written as given; a style write the surface rejects is skipped.
    pub fn run<S: DiagramSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<LayoutSummary, LayoutError> {
        if surface.node_count() == 0 {
            return Err(LayoutError::EmptyDiagram);
        }

        info!(node_count = surface.node_count(); "Starting auto layout");

        let mut tx = Transaction::begin(surface, TRANSACTION_NAME);

        let nodes = tx.nodes();
        let links = tx.links();
        let Classification {
            mut entities,
            index,
        } = EntityIndex::classify(&nodes, &links)?;

        let style_failures = layout::apply_styles(&mut *tx, &nodes, &links, &self.options);

        let radial = RadialPlacer::new(self.options.attribute_spacing());
        let mut collision_passes = 0;
        for entity in &entities {
            let attributes = index.attributes_of(entity.key());
            if attributes.is_empty() {
                continue;
            }
            collision_passes += radial.place(&mut *tx, entity, attributes)?.passes;
        }

        let circle_radius = if entities.len() > 1 {
            let placement = CircularPlacer::new(self.options.entity_spacing(), radial).place(
                &mut *tx,
                &mut entities,
                &index,
            )?;
            collision_passes += placement.collision_passes;
            Some(placement.radius)
        } else {
            debug!("Single entity keeps its position");
            None
        };

        tx.commit();
        surface.fit_and_center();

        let summary = LayoutSummary {
            entity_count: entities.len(),
            attribute_count: index.attribute_count(),
            circle_radius,
            collision_passes,
            style_failures,
        };
        info!(
            entity_count = summary.entity_count,
            attribute_count = summary.attribute_count,
            collision_passes = summary.collision_passes,
            style_failures = summary.style_failures;
            "Auto layout finished"
        );

        Ok(summary)
    }
}

/// Lay out `diagram`, reporting failures through the log only.
///
/// Missing `options` fall back to [`LayoutOptions::default`]. Returns `true`
/// when the layout was committed, and `false` when the diagram is missing or
/// empty, or when the run failed and was rolled back.
///
/// # Examples
///
/// ```
/// use erd_layout::{auto_layout, memory::MemoryDiagram};
///
/// let mut empty = MemoryDiagram::default();
/// assert!(!auto_layout(Some(&mut empty), None));
/// assert!(!auto_layout::<MemoryDiagram>(None, None));
/// ```
pub fn auto_layout<S: DiagramSurface + ?Sized>(
    diagram: Option<&mut S>,
    options: Option<&LayoutOptions>,
) -> bool {
    let Some(surface) = diagram else {
        error!("Auto layout failed: no diagram");
        return false;
    };

    let layout = options.cloned().map(AutoLayout::new).unwrap_or_default();
    match layout.run(surface) {
        Ok(_) => true,
        Err(err) => {
            error!(err:err; "Auto layout failed");
            false
        }
    }
}
