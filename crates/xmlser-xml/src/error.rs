//! Error types for XML document writing and checking.

use std::io;

/// Errors that can occur while writing or re-reading XML documents.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document ended with elements still open.
    #[error("{0} element(s) left unclosed at end of document")]
    Unclosed(usize),
}
