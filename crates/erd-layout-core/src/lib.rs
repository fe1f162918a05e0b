//! Core Types for ER Diagram Layout
//!
//! This crate provides the foundational types shared by the layout engine
//! and the surfaces it lays out. It includes:
//!
//! - **Identifiers**: String-interned node keys ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Diagram**: Node, link and property snapshots ([`diagram`] module)

pub mod diagram;
pub mod geometry;
pub mod identifier;
