//! Format-string templates.
//!
//! The pipeline is:
//!
//! 1. **Lexing**: split the format string into punctuation, bare and quoted
//!    tokens.
//! 2. **Parsing**: build a [`Template`] tree by recursive descent.
//! 3. **Evaluation**: walk the tree against a root object and write XML.

pub mod ast;
pub mod evaluator;
pub mod parser;

pub use ast::{Accessor, Attribute, Element, Group, Node, Repetition, Template, ValueExpr};
pub use evaluator::resolve;
pub use parser::{MAX_DEPTH, parse, parse_with};
