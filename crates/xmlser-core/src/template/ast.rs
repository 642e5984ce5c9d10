//! AST types for parsed format strings.
//!
//! A [`Template`] owns its whole tree. Nothing in here refers to runtime
//! objects; the evaluator binds those while walking.

use std::fmt;

/// Root of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    /// Top-level nodes in document order.
    pub nodes: Vec<Node>,
}

impl Template {
    /// Returns `true` if the format string was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A node of the template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `<name ...>`: an element, possibly repeated.
    Element(Element),
    /// `&text` / `&"text"`: literal text, escaped at emission time.
    Text(String),
    /// `&?` / `&.path`: a value rendered as text content.
    Lookup(ValueExpr),
    /// `{expr ...}`: rescopes the current object for its children.
    Group(Group),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name expression.
    pub name: ValueExpr,
    /// How often, and under which current object, the element is emitted.
    pub repetition: Option<Repetition>,
    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,
    /// Child nodes. An `&` content specifier is stored as a single
    /// [`Node::Text`] or [`Node::Lookup`] child.
    pub children: Vec<Node>,
}

/// `=name value` inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name expression.
    pub name: ValueExpr,
    /// Attribute value expression; [`ValueExpr::Current`] when omitted.
    pub value: ValueExpr,
}

/// A non-emitting scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Expression that becomes the current object for `children`.
    pub scope: ValueExpr,
    /// Nodes evaluated under the new scope.
    pub children: Vec<Node>,
}

/// An expression resolving to a runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExpr {
    /// A literal string.
    Literal(String),
    /// `?`: the current object.
    Current,
    /// A base followed by at least one accessor.
    Chain {
        /// Expression the accessors are applied to.
        base: Box<ValueExpr>,
        /// Dot segments, applied left to right. Never empty.
        accessors: Vec<Accessor>,
    },
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write_token(f, s),
            Self::Current => write!(f, "?"),
            Self::Chain { base, accessors } => {
                write!(f, "{base}")?;
                for accessor in accessors {
                    write!(f, ".{accessor}")?;
                }
                Ok(())
            }
        }
    }
}

/// One dot segment of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Attribute or key name.
    Key(String),
    /// An all-digit segment. Kept as written so that mappings keyed by the
    /// digit string can still be reached.
    Index(String),
}

impl Accessor {
    /// The segment as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Key(s) | Self::Index(s) => s,
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(s) => write_token(f, s),
            Self::Index(s) => write!(f, "{s}"),
        }
    }
}

/// How an element is repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repetition {
    /// `*expr`: once per item of a sequence (or pair of a mapping).
    List(ValueExpr),
    /// `~expr`: once per key/value pair; tag and attributes see the key,
    /// children see the value.
    DictKey(ValueExpr),
    /// `*N`: `N` times, with the iteration index as current object.
    Count(usize),
}

/// Write `s` as a bare token if possible, quoted otherwise.
fn write_token(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if !s.is_empty() && s.chars().all(is_bare_char) {
        return write!(f, "{s}");
    }
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\t' => f.write_str("\\t")?,
            '\n' => f.write_str("\\n")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

/// Characters allowed in a bare token.
pub(crate) fn is_bare_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '<' | '>' | '&' | '=' | '.' | '?' | '*' | '~' | '{' | '}' | '"' | '\\'
        )
}
