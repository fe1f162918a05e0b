//! The diagram surface abstraction and its transaction guard.
//!
//! A [`DiagramSurface`] is whatever owns the nodes and links being laid out:
//! a UI diagram model, or the in-memory [`MemoryDiagram`](crate::memory::MemoryDiagram).
//! The layout engine only reads node identity, category and label, and
//! writes positions and style properties back.
//!
//! All writes of one layout run happen inside a [`Transaction`]. The guard
//! rolls the surface back when it is dropped without being committed, so an
//! early return through `?` leaves the surface untouched.

use std::ops::{Deref, DerefMut};

use log::{debug, warn};
use thiserror::Error;

use erd_layout_core::{
    diagram::{GraphLink, GraphNode, LinkId, PropertyValue},
    geometry::Point,
    identifier::Id,
};

/// Errors reported by a surface for a single write.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("Unknown node `{0}`")]
    UnknownNode(Id),

    #[error("Unknown link {0}")]
    UnknownLink(LinkId),

    #[error("Write to {target} rejected: {reason}")]
    Rejected { target: String, reason: String },
}

/// Collaborator the layout engine reads from and writes to.
pub trait DiagramSurface {
    /// Number of nodes currently in the diagram
    fn node_count(&self) -> usize;

    /// Snapshots of all nodes, in the surface's enumeration order
    fn nodes(&self) -> Vec<GraphNode>;

    /// Snapshots of all links, in the surface's enumeration order
    fn links(&self) -> Vec<GraphLink>;

    /// Moves a node.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the node does not exist or the surface refuses the write.
    fn set_node_position(&mut self, key: Id, position: Point) -> Result<(), SurfaceError>;

    /// Sets a property on a node's backing data.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the node does not exist or the surface refuses the write.
    fn set_node_property(
        &mut self,
        key: Id,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SurfaceError>;

    /// Sets a property on a link's backing data.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the link does not exist or the surface refuses the write.
    fn set_link_property(
        &mut self,
        link: LinkId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SurfaceError>;

    fn begin_transaction(&mut self, name: &str);

    fn commit_transaction(&mut self, name: &str);

    /// Discards every write made since the matching [`begin_transaction`](Self::begin_transaction).
    fn rollback_transaction(&mut self, name: &str);

    /// Fits all content into the view and centers it.
    fn fit_and_center(&mut self);
}

/// Scoped transaction over a [`DiagramSurface`].
///
/// Dereferences to the surface, so writes are made through the guard. Call
/// [`commit`](Self::commit) to keep them; otherwise they are rolled back
/// when the guard goes out of scope.
pub struct Transaction<'s, S: DiagramSurface + ?Sized> {
    surface: &'s mut S,
    name: String,
    committed: bool,
}

impl<'s, S: DiagramSurface + ?Sized> Transaction<'s, S> {
    /// Opens a named transaction on `surface`.
    pub fn begin(surface: &'s mut S, name: impl Into<String>) -> Self {
        let name = name.into();
        debug!(transaction = name.as_str(); "Beginning transaction");
        surface.begin_transaction(&name);
        Self {
            surface,
            name,
            committed: false,
        }
    }

    /// Commits every write made through this guard.
    pub fn commit(mut self) {
        debug!(transaction = self.name.as_str(); "Committing transaction");
        self.surface.commit_transaction(&self.name);
        self.committed = true;
    }
}

impl<S: DiagramSurface + ?Sized> Deref for Transaction<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<S: DiagramSurface + ?Sized> DerefMut for Transaction<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl<S: DiagramSurface + ?Sized> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if !self.committed {
            warn!(transaction = self.name.as_str(); "Rolling back uncommitted transaction");
            self.surface.rollback_transaction(&self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records transaction calls and nothing else.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        position_writes: usize,
    }

    impl DiagramSurface for Recorder {
        fn node_count(&self) -> usize {
            0
        }

        fn nodes(&self) -> Vec<GraphNode> {
            Vec::new()
        }

        fn links(&self) -> Vec<GraphLink> {
            Vec::new()
        }

        fn set_node_position(&mut self, _key: Id, _position: Point) -> Result<(), SurfaceError> {
            self.position_writes += 1;
            Ok(())
        }

        fn set_node_property(
            &mut self,
            key: Id,
            _name: &str,
            _value: PropertyValue,
        ) -> Result<(), SurfaceError> {
            Err(SurfaceError::UnknownNode(key))
        }

        fn set_link_property(
            &mut self,
            link: LinkId,
            _name: &str,
            _value: PropertyValue,
        ) -> Result<(), SurfaceError> {
            Err(SurfaceError::UnknownLink(link))
        }

        fn begin_transaction(&mut self, name: &str) {
            self.calls.push(format!("begin:{name}"));
        }

        fn commit_transaction(&mut self, name: &str) {
            self.calls.push(format!("commit:{name}"));
        }

        fn rollback_transaction(&mut self, name: &str) {
            self.calls.push(format!("rollback:{name}"));
        }

        fn fit_and_center(&mut self) {
            self.calls.push("fit".to_string());
        }
    }

    #[test]
    fn test_commit_does_not_roll_back() {
        let mut surface = Recorder::default();
        let tx = Transaction::begin(&mut surface, "layout");
        tx.commit();

        assert_eq!(surface.calls, ["begin:layout", "commit:layout"]);
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let mut surface = Recorder::default();
        {
            let _tx = Transaction::begin(&mut surface, "layout");
        }

        assert_eq!(surface.calls, ["begin:layout", "rollback:layout"]);
    }

    #[test]
    fn test_early_return_rolls_back() {
        fn fails(surface: &mut Recorder) -> Result<(), SurfaceError> {
            let mut tx = Transaction::begin(surface, "layout");
            tx.set_node_position(Id::new("a"), Point::default())?;
            tx.set_node_property(Id::new("a"), "fontSize", PropertyValue::from(16.0_f32))?;
            tx.commit();
            Ok(())
        }

        let mut surface = Recorder::default();
        let err = fails(&mut surface).unwrap_err();

        assert_eq!(err, SurfaceError::UnknownNode(Id::new("a")));
        assert_eq!(surface.position_writes, 1);
        assert_eq!(surface.calls, ["begin:layout", "rollback:layout"]);
    }

    #[test]
    fn test_guard_works_with_trait_objects() {
        let mut surface = Recorder::default();
        let dyn_surface: &mut dyn DiagramSurface = &mut surface;
        let tx = Transaction::begin(dyn_surface, "dyn");
        tx.commit();

        assert_eq!(surface.calls, ["begin:dyn", "commit:dyn"]);
    }

    #[test]
    fn test_surface_error_messages() {
        assert_eq!(
            SurfaceError::UnknownNode(Id::new("ghost")).to_string(),
            "Unknown node `ghost`"
        );
        assert_eq!(
            SurfaceError::UnknownLink(LinkId::new(2)).to_string(),
            "Unknown link #2"
        );
        let rejected = SurfaceError::Rejected {
            target: "node `a`".to_string(),
            reason: "read-only".to_string(),
        };
        assert_eq!(rejected.to_string(), "Write to node `a` rejected: read-only");
    }
}
