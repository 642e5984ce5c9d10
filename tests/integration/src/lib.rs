//! Integration tests for xmlser.
//!
//! These exercise the public API end to end: compile a format string, render
//! it against host objects and re-read the output as XML.
//!
//! Run them with:
//! ```text
//! cargo test -p xmlser-integration
//! ```

use std::borrow::Cow;
use std::sync::Once;

use serde::Deserialize;
use xmlser_core::{Capabilities, Lookup};

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A host type with struct-like fields, exposed through attribute access.
#[derive(Debug, Clone, Deserialize)]
pub struct River {
    /// River name.
    pub name: String,
    /// Length in kilometres.
    pub length_km: u32,
    /// Countries the river flows through.
    pub countries: Vec<String>,
}

impl Lookup for River {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RECORD
    }

    fn attr(&self, name: &str) -> Option<&dyn Lookup> {
        match name {
            "name" => Some(&self.name),
            "length_km" => Some(&self.length_km),
            "countries" => Some(&self.countries),
            _ => None,
        }
    }

    fn pairs(&self) -> xmlser_core::lookup::Pairs<'_> {
        static NAMES: [&str; 3] = ["name", "length_km", "countries"];
        Box::new(
            NAMES
                .iter()
                .filter_map(|n| self.attr(n).map(|v| (n as &dyn Lookup, v))),
        )
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// Rivers loaded from a JSON fixture.
#[must_use]
pub fn rivers() -> Vec<River> {
    serde_json::from_str(
        r#"[
            {"name": "Nile", "length_km": 6650, "countries": ["Egypt", "Sudan"]},
            {"name": "Amazon", "length_km": 6400, "countries": ["Brazil", "Peru"]},
            {"name": "Yangtze", "length_km": 6300, "countries": ["China"]}
        ]"#,
    )
    .unwrap_or_else(|e| panic!("invalid river fixture: {e}"))
}

mod test_concurrency;
mod test_document;
mod test_host;
mod test_properties;
mod test_scenarios;
