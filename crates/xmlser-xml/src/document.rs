//! Whole-document helpers: the XML prolog and a well-formedness check.
//!
//! Rendered template output is a document *body*. Callers that need a
//! standalone document prepend the prolog with [`to_document`]; tests and
//! debugging tools re-read output with [`check_well_formed`].

use std::io::Write;

use quick_xml::events::{BytesDecl, Event};
use quick_xml::{Reader, Writer};

use crate::error::XmlError;

/// Encoding label written into the prolog when none is configured.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Write `<?xml version="1.0" encoding="..."?>` into `sink`.
///
/// # Errors
///
/// Returns `io::Error` if writing to the sink fails.
pub fn write_declaration<W: Write>(sink: W, encoding: &str) -> std::io::Result<()> {
    let mut writer = Writer::new(sink);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some(encoding), None)))?;
    Ok(())
}

/// Prefix a rendered body with the XML prolog.
///
/// # Errors
///
/// Returns `XmlError` if the prolog cannot be written.
pub fn to_document(body: &str, encoding: &str) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(body.len() + 64);
    write_declaration(&mut buf, encoding)?;
    buf.extend_from_slice(body.as_bytes());
    tracing::trace!(bytes = buf.len(), encoding, "wrote XML document");
    Ok(buf)
}

/// Re-read `xml` and verify it is well formed.
///
/// Checks tag balance, end-tag names and attribute syntax. Multiple top-level
/// elements are accepted, since template output may be a fragment. Returns the
/// number of elements seen.
///
/// # Errors
///
/// Returns `XmlError` describing the first problem found.
pub fn check_well_formed(xml: &str) -> Result<usize, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut depth: usize = 0;
    let mut elements: usize = 0;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                for attr in e.attributes() {
                    attr?;
                }
                depth += 1;
                elements += 1;
            }
            Event::Empty(e) => {
                for attr in e.attributes() {
                    attr?;
                }
                elements += 1;
            }
            // Mismatched end names are reported by the reader itself.
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(XmlError::Unclosed(depth));
    }
    Ok(elements)
}
