//! Serializer configuration.
//!
//! Defaults suit library use; `from_env` lets hosts flip behavior without
//! touching call sites.

use std::env;

use xmlser_xml::DEFAULT_ENCODING;

/// Options applied when compiling and rendering a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Require exactly one non-repeated root element.
    pub single_root: bool,
    /// Encoding label written into the prolog by `to_document`.
    pub encoding: String,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            single_root: false,
            encoding: DEFAULT_ENCODING.to_owned(),
        }
    }
}

impl SerializerConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `XMLSER_SINGLE_ROOT` | `false` |
    /// | `XMLSER_ENCODING` | `UTF-8` |
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            single_root: env_bool("XMLSER_SINGLE_ROOT", false),
            encoding: env::var("XMLSER_ENCODING").unwrap_or_else(|_| DEFAULT_ENCODING.to_owned()),
        }
    }

    /// Require exactly one non-repeated root element.
    #[must_use]
    pub fn with_single_root(mut self, single_root: bool) -> Self {
        self.single_root = single_root;
        self
    }

    /// Set the prolog encoding label.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}
