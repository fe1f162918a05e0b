//! Example: Laying out an in-memory diagram
//!
//! This example builds a small library schema with the in-memory surface,
//! runs the automatic layout and prints where every node ended up.

use erd_layout::{
    AutoLayout,
    config::LayoutOptions,
    diagram::NodeCategory,
    geometry::Point,
    memory::MemoryDiagram,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut diagram = MemoryDiagram::default();

    // Entities, all stacked at the origin
    for (key, label) in [("book", "Book"), ("author", "Author"), ("loan", "Loan")] {
        diagram.add_node(key, NodeCategory::Entity, label, Point::default())?;
    }

    // Attributes, linked from their owning entity
    let attributes = [
        ("book", "isbn"),
        ("book", "title"),
        ("book", "published_at"),
        ("author", "name"),
        ("author", "born"),
        ("loan", "due_date"),
    ];
    for (entity, attribute) in attributes {
        let key = format!("{entity}.{attribute}");
        diagram.add_node(key.as_str(), NodeCategory::Attribute, attribute, Point::default())?;
        diagram.add_link(entity, key.as_str());
    }

    // Tighter spacing than the defaults
    let options = LayoutOptions::default()
        .with_entity_spacing(160.0)
        .with_attribute_spacing(80.0);

    let summary = AutoLayout::new(options).run(&mut diagram)?;

    println!("Laid out {} entities", summary.entity_count);
    println!("  Attributes: {}", summary.attribute_count);
    println!("  Circle radius: {:?}", summary.circle_radius);
    println!("  Collision passes: {}", summary.collision_passes);
    println!();

    for node in erd_layout::surface::DiagramSurface::nodes(&diagram) {
        println!(
            "{:>20} ({:9}) at ({:8.1}, {:8.1})",
            node.label(),
            node.category().to_string(),
            node.position().x(),
            node.position().y()
        );
    }

    if let Some(viewport) = diagram.viewport() {
        println!();
        println!(
            "Viewport centered at ({:.1}, {:.1}), scale {:.3}",
            viewport.center().x(),
            viewport.center().y(),
            viewport.scale()
        );
    }

    Ok(())
}
