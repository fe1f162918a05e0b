//! TOML diagram documents.
//!
//! A document lists nodes and links; after a layout run the node positions,
//! the style properties and the viewport are written back into it.
//!
//! ```toml
//! [[nodes]]
//! key = "user"
//! category = "entity"
//! label = "User"
//!
//! [[nodes]]
//! key = "user.email"
//! category = "attribute"
//! label = "email"
//!
//! [[links]]
//! from = "user"
//! to = "user.email"
//! ```

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use toml::Spanned;

use erd_layout::{
    LayoutError,
    config::ViewConfig,
    diagram::{LinkId, NodeCategory},
    geometry::Point,
    memory::{MemoryDiagram, Properties},
    surface::DiagramSurface,
};

use crate::error::CliError;

/// A whole diagram document.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DiagramDocument {
    #[serde(default)]
    nodes: Vec<NodeRecord>,

    #[serde(default)]
    links: Vec<LinkRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    viewport: Option<ViewportRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
struct NodeRecord {
    key: Spanned<String>,
    category: NodeCategory,
    #[serde(default)]
    label: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

#[derive(Debug, Deserialize, Serialize)]
struct LinkRecord {
    from: String,
    to: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
struct ViewportRecord {
    center_x: f32,
    center_y: f32,
    scale: f32,
}

impl DiagramDocument {
    /// Parses a document from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Document`] pointing at the offending input when
    /// the source is not valid TOML, does not match the document shape, or
    /// repeats a node key.
    pub fn parse(src: &str) -> Result<Self, CliError> {
        let document: Self = toml::from_str(src)
            .map_err(|err| CliError::new_document_error(err.message(), err.span(), src))?;

        let mut seen = HashMap::new();
        for node in &document.nodes {
            if let Some(first) = seen.insert(node.key.get_ref().as_str(), node.key.span()) {
                return Err(CliError::new_document_error(
                    format!(
                        "Duplicate node key `{}` (first defined at byte {})",
                        node.key.get_ref(),
                        first.start
                    ),
                    Some(node.key.span()),
                    src,
                ));
            }
        }

        debug!(
            node_count = document.nodes.len(),
            link_count = document.links.len();
            "Parsed diagram document"
        );

        Ok(document)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Builds an in-memory diagram holding the document's nodes, links and
    /// properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagram refuses a node or a property.
    pub fn to_diagram(&self, view: &ViewConfig) -> Result<MemoryDiagram, CliError> {
        let mut diagram = MemoryDiagram::new(*view);

        for node in &self.nodes {
            let key = node.key.get_ref().as_str();
            diagram
                .add_node(key, node.category, node.label.as_str(), Point::new(node.x, node.y))
                .map_err(LayoutError::from)?;
            for (name, value) in &node.properties {
                diagram
                    .set_node_property(key.into(), name, value.clone())
                    .map_err(LayoutError::from)?;
            }
        }

        for link in &self.links {
            let id = diagram.add_link(link.from.as_str(), link.to.as_str());
            for (name, value) in &link.properties {
                diagram
                    .set_link_property(id, name, value.clone())
                    .map_err(LayoutError::from)?;
            }
        }

        Ok(diagram)
    }

    /// Copies positions, properties and the viewport from `diagram` back
    /// into the document.
    pub fn apply_layout(&mut self, diagram: &MemoryDiagram) {
        for node in &mut self.nodes {
            let key = node.key.get_ref().as_str();
            if let Some(laid_out) = diagram.node(key) {
                node.x = laid_out.position().x();
                node.y = laid_out.position().y();
            }
            if let Some(properties) = diagram.node_properties(key) {
                node.properties.clone_from(properties);
            }
        }

        for (index, link) in self.links.iter_mut().enumerate() {
            if let Some(properties) = diagram.link_properties(LinkId::new(index)) {
                link.properties.clone_from(properties);
            }
        }

        self.viewport = diagram.viewport().map(|viewport| ViewportRecord {
            center_x: viewport.center().x(),
            center_y: viewport.center().y(),
            scale: viewport.scale(),
        });
    }

    /// Renders the document as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Output`] if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use erd_layout::{AutoLayout, diagram::PropertyValue, layout::style};

    use super::*;

    const LIBRARY: &str = r##"
[[nodes]]
key = "book"
category = "entity"
label = "Book"
x = 10.0
y = 20.0

[[nodes]]
key = "book.isbn"
category = "attribute"
label = "isbn"

[nodes.properties]
background = "#eeeeee"

[[links]]
from = "book"
to = "book.isbn"
"##;

    #[test]
    fn test_parse_reads_nodes_and_links() {
        let document = DiagramDocument::parse(LIBRARY).unwrap();

        assert_eq!(document.node_count(), 2);
        assert_eq!(document.link_count(), 1);
        assert!(document.viewport.is_none());
        assert_eq!(document.nodes[0].category, NodeCategory::Entity);
        assert_eq!(document.nodes[1].x, 0.0);
    }

    #[test]
    fn test_to_diagram_keeps_positions_and_properties() {
        let document = DiagramDocument::parse(LIBRARY).unwrap();

        let diagram = document.to_diagram(&ViewConfig::default()).unwrap();

        assert_eq!(
            diagram.node("book").unwrap().position(),
            Point::new(10.0, 20.0)
        );
        assert_eq!(
            diagram.node_property("book.isbn", style::BACKGROUND),
            Some(&PropertyValue::from("#eeeeee"))
        );
        assert_eq!(diagram.links().len(), 1);
    }

    #[test]
    fn test_duplicate_key_points_at_second_definition() {
        let src = "[[nodes]]\nkey = \"a\"\ncategory = \"entity\"\n\n[[nodes]]\nkey = \"a\"\ncategory = \"attribute\"\n";

        let err = DiagramDocument::parse(src).unwrap_err();

        match err {
            CliError::Document { message, span, .. } => {
                assert!(message.contains("Duplicate node key `a`"), "{message}");
                let span = span.unwrap();
                assert!(span.start > src.rfind("key").unwrap());
                assert!(src[span].contains('a'));
            }
            other => panic!("Expected Document error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_is_a_document_error() {
        let src = "[[nodes]]\nkey = \"a\"\ncategory = \"table\"\n";

        let err = DiagramDocument::parse(src).unwrap_err();

        assert!(matches!(err, CliError::Document { span: Some(_), .. }));
    }

    #[test]
    fn test_layout_results_are_written_back() {
        let mut document = DiagramDocument::parse(LIBRARY).unwrap();
        let mut diagram = document.to_diagram(&ViewConfig::default()).unwrap();
        AutoLayout::default().run(&mut diagram).unwrap();

        document.apply_layout(&diagram);

        // A single entity stays where it was.
        assert_eq!((document.nodes[0].x, document.nodes[0].y), (10.0, 20.0));
        assert_ne!((document.nodes[1].x, document.nodes[1].y), (0.0, 0.0));
        assert!(document.nodes[0].properties.contains_key(style::FONT_SIZE));
        assert!(document.links[0].properties.contains_key(style::LINK_COLOR));
        assert!(document.viewport.is_some());

        let rendered = document.to_toml().unwrap();
        let reparsed = DiagramDocument::parse(&rendered).unwrap();
        assert_eq!(reparsed.node_count(), 2);
        assert_eq!(reparsed.viewport, document.viewport);
    }
}
