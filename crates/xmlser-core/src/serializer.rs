//! Compile-once, render-many wrapper around a [`Template`].

use std::fmt;
use std::str::FromStr;

use crate::config::SerializerConfig;
use crate::error::{XmlSerError, XmlSerResult};
use crate::lookup::Lookup;
use crate::template::{Template, parse_with};

/// A compiled format string plus the options it was compiled with.
///
/// `Serializer` is immutable and `Send + Sync`; share one instance across
/// threads and render different roots concurrently.
///
/// ```
/// use xmlser_core::Serializer;
///
/// let rivers = serde_json::json!(["Nile", "Amazon"]);
/// let serializer = Serializer::new("<rivers<river*?&?>>")?;
/// assert_eq!(
///     serializer.serialize(&rivers)?,
///     "<rivers><river>Nile</river><river>Amazon</river></rivers>"
/// );
/// # Ok::<(), xmlser_core::XmlSerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Serializer {
    template: Template,
    config: SerializerConfig,
}

impl Serializer {
    /// Compile `format` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`XmlSerError::Syntax`] if the format string is malformed.
    pub fn new(format: &str) -> XmlSerResult<Self> {
        Self::with_config(format, SerializerConfig::default())
    }

    /// Compile `format` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`XmlSerError::Syntax`] if the format string is malformed or
    /// violates `config.single_root`.
    pub fn with_config(format: &str, config: SerializerConfig) -> XmlSerResult<Self> {
        let template = parse_with(format, config.single_root).inspect_err(|e| {
            tracing::debug!(error = %e, "failed to compile format string");
        })?;
        Ok(Self { template, config })
    }

    /// The compiled template.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The options this serializer was compiled with.
    #[must_use]
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Render the XML body for `root`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlSerError::Lookup`] or [`XmlSerError::InvalidName`]; no
    /// output is returned on failure.
    pub fn serialize(&self, root: &dyn Lookup) -> XmlSerResult<String> {
        self.template.render(root).inspect_err(log_failure)
    }

    /// Render the XML body for `root` into `out`.
    ///
    /// # Errors
    ///
    /// Same as [`Serializer::serialize`], plus [`XmlSerError::Write`]. Output
    /// written before a failure stays in `out`.
    pub fn serialize_to<W: fmt::Write + ?Sized>(
        &self,
        root: &dyn Lookup,
        out: &mut W,
    ) -> XmlSerResult<()> {
        self.template.render_to(root, out).inspect_err(log_failure)
    }

    /// Render a standalone document: the `<?xml?>` prolog with the configured
    /// encoding label, followed by the body.
    ///
    /// # Errors
    ///
    /// Same as [`Serializer::serialize`], plus [`XmlSerError::Xml`] if the
    /// prolog cannot be written.
    pub fn to_document(&self, root: &dyn Lookup) -> XmlSerResult<Vec<u8>> {
        let body = self.serialize(root)?;
        Ok(xmlser_xml::to_document(&body, &self.config.encoding)?)
    }
}

impl FromStr for Serializer {
    type Err = XmlSerError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        Self::new(format)
    }
}

fn log_failure(error: &XmlSerError) {
    tracing::debug!(error = %error, "serialization failed");
}

/// Compile `format` and render it against `root` in one call.
///
/// # Errors
///
/// Any error of [`Serializer::new`] or [`Serializer::serialize`].
pub fn serialize(format: &str, root: &dyn Lookup) -> XmlSerResult<String> {
    Serializer::new(format)?.serialize(root)
}
