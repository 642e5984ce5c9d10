//! Compile a compact format string into a reusable XML serializer.
//!
//! A format string such as `<rivers<river*.items=id.id&.name>>` describes tag
//! nesting, attributes, text content, lookups into a host object and
//! repetition in one line. [`Serializer`] compiles it once and renders it
//! against any object implementing [`Lookup`].
//!
//! # Key components
//!
//! - [`template`]: AST, parser and evaluator for format strings
//! - [`Lookup`]: the capability surface read from host objects, with
//!   adapters for [`xmlser_model::Value`], `serde_json::Value` and std types
//! - [`Serializer`]: compile-once wrapper with prolog support
//! - [`SerializerConfig`]: single-root mode and prolog encoding
//!
//! # Notation
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `<name ...>` | element; closed by the matching `>` |
//! | `=name value` | attribute; value defaults to `?` |
//! | `&text`, `&"text"` | literal text content |
//! | `&?`, `&.a.0` | looked-up text content |
//! | `*?`, `*.items`, `*3` | repeat the element per item, or `N` times |
//! | `<~.map ...>` | repeat per key/value pair; key names the tag |
//! | `{.scope ...}` | rescope the current object without emitting a tag |
//! | `"..."` | quoted token; escapes `\"`, `\\`, `\t`, `\n` |

mod config;
mod error;
pub mod lookup;
mod serializer;
pub mod template;

pub use config::SerializerConfig;
pub use error::{NameKind, XmlSerError, XmlSerResult};
pub use lookup::{Capabilities, Lookup, Pair};
pub use serializer::{Serializer, serialize};
pub use template::{Template, parse, parse_with};
pub use xmlser_model::Value;
