//! CLI logic for the erd-layout tool.
//!
//! This module reads a TOML diagram document, lays it out with
//! [`erd_layout::AutoLayout`] and writes the laid-out document back as TOML.

pub mod error_adapter;

mod args;
mod config;
mod document;
mod error;

pub use args::Args;
pub use config::{ConfigError, load_config};
pub use document::DiagramDocument;
pub use error::CliError;

use std::fs;

use log::info;

use erd_layout::AutoLayout;

/// Run the erd-layout CLI application
///
/// This function lays out the input document and writes the result to the
/// output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    // Load configuration
    let app_config = load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;
    let mut document = DiagramDocument::parse(&source)?;

    // Lay out an in-memory copy of the diagram
    let mut diagram = document.to_diagram(app_config.view())?;
    let summary = AutoLayout::new(app_config.layout().clone()).run(&mut diagram)?;
    info!(
        entity_count = summary.entity_count,
        attribute_count = summary.attribute_count;
        "Diagram laid out"
    );

    // Write output file
    document.apply_layout(&diagram);
    fs::write(&args.output, document.to_toml()?)?;

    info!(output_file = args.output; "Document written successfully");

    Ok(())
}
