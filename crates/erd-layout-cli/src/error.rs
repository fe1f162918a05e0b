//! Error types for the CLI.

use std::{io, ops::Range};

use thiserror::Error;

use erd_layout::LayoutError;

use crate::config::ConfigError;

/// Everything that can stop the CLI from producing an output document.
///
/// The `Document` variant keeps the source text and the byte range of the
/// offending input so the error can be rendered with a snippet.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{message}")]
    Document {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Failed to serialize output document: {0}")]
    Output(#[from] toml::ser::Error),
}

impl CliError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Document {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
