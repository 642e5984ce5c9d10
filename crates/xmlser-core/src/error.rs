//! Error types for template compilation and evaluation.

use std::fmt;

use xmlser_xml::{NameError, XmlError};

/// Which kind of name failed XML name validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// An element tag name.
    Tag,
    /// An attribute name.
    Attribute,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag => write!(f, "tag"),
            Self::Attribute => write!(f, "attribute"),
        }
    }
}

/// Errors produced while parsing a format string or rendering a template.
///
/// `Syntax` is raised at compile time only; `Lookup` and `InvalidName` at
/// render time only. All of them abort the call that raised them.
#[derive(Debug, thiserror::Error)]
pub enum XmlSerError {
    /// The format string is malformed.
    #[error("syntax error at offset {position}: expected {expected}, found {found} (near {near:?})")]
    Syntax {
        /// Zero-based character offset into the format string.
        position: usize,
        /// What the parser expected at this position.
        expected: String,
        /// What was found instead.
        found: String,
        /// Excerpt of the format string around the offset.
        near: String,
    },

    /// An accessor chain could not be resolved against the bound object.
    #[error("lookup of '{segment}' failed after '{path}': {reason}")]
    Lookup {
        /// The part of the expression resolved before the failure.
        path: String,
        /// The failing segment.
        segment: String,
        /// Explanation.
        reason: String,
    },

    /// A resolved tag or attribute name is not a valid XML name.
    #[error("invalid {kind} name {value:?}: {source}")]
    InvalidName {
        /// Whether the name was a tag or an attribute name.
        kind: NameKind,
        /// The offending resolved string.
        value: String,
        /// Why the name was rejected.
        #[source]
        source: NameError,
    },

    /// Writing to a caller-supplied text sink failed.
    #[error("failed to write rendered output")]
    Write(#[from] fmt::Error),

    /// Writing the XML document prolog failed.
    #[error(transparent)]
    Xml(#[from] XmlError),
}

impl XmlSerError {
    /// Build a syntax error with an excerpt of `format` around `position`.
    pub(crate) fn syntax(
        format: &[char],
        position: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        let start = position.saturating_sub(10);
        let end = (position + 10).min(format.len());
        let near = format.get(start..end).unwrap_or_default().iter().collect();
        Self::Syntax {
            position,
            expected: expected.into(),
            found: found.into(),
            near,
        }
    }

    /// Returns `true` for errors raised while parsing the format string.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

/// Convenience result type for xmlser operations.
pub type XmlSerResult<T> = Result<T, XmlSerError>;
