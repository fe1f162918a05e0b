//! The layout algorithm: classification, circular and radial placement,
//! collision resolution and style application.

mod circular;
mod collision;
mod index;
mod radial;
pub mod style;

pub use circular::{CircularPlacement, CircularPlacer};
pub use collision::{CollisionResolver, PlacementCandidate};
pub use index::{Classification, EntityIndex};
pub use radial::{RadialPlacement, RadialPlacer};
pub use style::apply_styles;
