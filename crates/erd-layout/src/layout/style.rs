//! Best-effort style application.
//!
//! Every node and link gets the configured font, fill, border and text
//! colors. A surface refusing one write does not stop the others: failures
//! are logged and counted, never propagated.

use log::{debug, warn};

use erd_layout_core::diagram::{GraphLink, GraphNode, PropertyValue};

use crate::{config::LayoutOptions, surface::DiagramSurface};

/// Node property holding the label font size
pub const FONT_SIZE: &str = "fontSize";
/// Node property holding the fill color
pub const BACKGROUND: &str = "background";
/// Node property holding the border color
pub const BORDER: &str = "border";
/// Node property holding the label color
pub const TEXT_COLOR: &str = "textColor";
/// Link property holding the line color
pub const LINK_COLOR: &str = "linkColor";
/// Link property holding the label color
pub const LINK_TEXT_COLOR: &str = "linkTextColor";

/// Writes style properties to every node and link, returning the number of
/// writes the surface rejected.
pub fn apply_styles<S: DiagramSurface + ?Sized>(
    surface: &mut S,
    nodes: &[GraphNode],
    links: &[GraphLink],
    options: &LayoutOptions,
) -> usize {
    let node_styles = [
        (FONT_SIZE, PropertyValue::from(options.font_size())),
        (BACKGROUND, PropertyValue::from(options.background_color())),
        (BORDER, PropertyValue::from(options.border_color())),
        (TEXT_COLOR, PropertyValue::from(options.text_color())),
    ];
    let link_styles = [
        (LINK_COLOR, PropertyValue::from(options.border_color())),
        (LINK_TEXT_COLOR, PropertyValue::from(options.text_color())),
    ];

    let mut failures = 0;

    for node in nodes {
        for (name, value) in &node_styles {
            if let Err(err) = surface.set_node_property(node.key(), name, value.clone()) {
                warn!(node = node.key().to_string(), property = *name, err:err; "Skipping node style");
                failures += 1;
            }
        }
    }

    for link in links {
        for (name, value) in &link_styles {
            if let Err(err) = surface.set_link_property(link.id(), name, value.clone()) {
                warn!(link = link.id().to_string(), property = *name, err:err; "Skipping link style");
                failures += 1;
            }
        }
    }

    debug!(
        node_count = nodes.len(),
        link_count = links.len(),
        failures;
        "Applied styles"
    );

    failures
}
