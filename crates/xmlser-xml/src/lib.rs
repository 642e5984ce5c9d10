//! XML text primitives for xmlser.
//!
//! This crate owns everything that knows about XML at the character level, so
//! the template engine never hand-builds markup rules of its own.
//!
//! # Key components
//!
//! - [`escape_text`] and [`escape_attr`] for content and attribute escaping
//! - [`check_tag`] and [`check_attribute`] for validating resolved names
//! - [`write_declaration`] and [`to_document`] for the optional `<?xml?>` prolog
//! - [`check_well_formed`] for re-reading rendered output

pub mod document;
pub mod error;
pub mod escape;
pub mod name;

pub use document::{DEFAULT_ENCODING, check_well_formed, to_document, write_declaration};
pub use error::XmlError;
pub use escape::{escape_attr, escape_text};
pub use name::{NameError, check_attribute, check_name, check_tag};
