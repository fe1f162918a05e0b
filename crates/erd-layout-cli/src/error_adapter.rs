//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's standard error types
//! and miette's rich diagnostic formatting. Document errors are rendered with
//! a snippet of the input around the offending span; every other error is
//! rendered as a plain report with a code.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use erd_layout::LayoutError;

use crate::{config::ConfigError, error::CliError};

/// Adapter for a document error with source text.
pub struct DocumentAdapter<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> DocumentAdapter<'a> {
    /// Create a new document adapter.
    pub fn new(message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for DocumentAdapter<'_> {}

impl MietteDiagnostic for DocumentAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("erd_layout::document"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        None
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`CliError`] variants without source text.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "erd_layout::io",
            CliError::Config(_) => "erd_layout::config",
            CliError::Document { .. } => "erd_layout::document",
            CliError::Layout(_) => "erd_layout::layout",
            CliError::Output(_) => "erd_layout::output",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CliError::Config(ConfigError::Validation(_)) => {
                "colors accept any CSS color, such as `#1890ff` or `navy`"
            }
            CliError::Layout(LayoutError::EmptyDiagram) => {
                "add at least one `[[nodes]]` entry to the document"
            }
            CliError::Layout(LayoutError::DanglingLink { .. }) => {
                "every link endpoint must be the key of a node"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a document error or a plain error, providing a
/// uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error with a location in the input document.
    Document(DocumentAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Document(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Document(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Document(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Document(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a byte range into a miette [`SourceSpan`].
fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Document { message, span, src } => {
            Reportable::Document(DocumentAdapter::new(message, span.as_ref(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
