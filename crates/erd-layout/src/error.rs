//! Error types for layout operations.

use thiserror::Error;

use erd_layout_core::{diagram::LinkId, identifier::Id};

use crate::surface::SurfaceError;

/// Reasons a layout run can fail.
///
/// [`LayoutError::EmptyDiagram`] is raised before the layout transaction is
/// opened. Every other variant is raised inside it and causes it to be rolled
/// back.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Diagram is not initialized or has no nodes")]
    EmptyDiagram,

    #[error("Link {link} references unknown node `{key}`")]
    DanglingLink { link: LinkId, key: Id },

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}
