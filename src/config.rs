//! Engine configuration.
//!
//! Everything the host decides lives here: breakpoint pixel thresholds, the
//! selector-strengthening table, which properties are unitless, the names of
//! the wire fields and where compiled stylesheets are written.
//!
//! # Example
//!
//! ```
//! use costered::Config;
//!
//! let config = Config::from_json_str(r#"{ "breakpoints": { "mobile": 600 } }"#).unwrap();
//! assert_eq!(config.breakpoints.mobile, 600);
//! assert_eq!(config.breakpoints.tablet, 1024);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::property_key;

/// Pixel thresholds for the responsive tiers.
///
/// `mobile` and `tablet` are inclusive upper bounds. `desktop` is informational;
/// desktop declarations are emitted without a media query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub mobile: u32,
    pub tablet: u32,
    pub desktop: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 782,
            tablet: 1024,
            desktop: 1440,
        }
    }
}

impl Breakpoints {
    /// Media query for the tablet tier.
    pub fn tablet_query(&self) -> String {
        format!(
            "@media (min-width: {}px) and (max-width: {}px)",
            self.mobile.saturating_add(1),
            self.tablet
        )
    }

    /// Media query for the mobile tier.
    pub fn mobile_query(&self) -> String {
        format!("@media (max-width: {}px)", self.mobile)
    }
}

/// Configuration for the style engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub breakpoints: Breakpoints,
    /// Node type -> descendant selectors that replace the bare wrapper.
    pub strengthen: BTreeMap<String, Vec<String>>,
    /// Properties stored as bare numbers (matched camelCase-agnostically).
    pub unitless: BTreeSet<String>,
    /// Attribute used in the generated selector, without the `data-` prefix.
    pub selector_attribute: String,
    /// Attribute record field holding the scope id.
    pub scope_id_field: String,
    /// Attribute record field holding the breakpoint buckets.
    pub styles_field: String,
    /// Directory that receives the `costered/` output folder. Must exist.
    pub uploads_dir: PathBuf,
    /// Public URL of `uploads_dir`.
    pub uploads_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let strengthen = BTreeMap::from([(
            "core/button".to_string(),
            vec![
                ".wp-block-button__link".to_string(),
                ".wp-element-button".to_string(),
            ],
        )]);

        let unitless = [
            "opacity",
            "z-index",
            "order",
            "flex-grow",
            "flex-shrink",
            "font-weight",
            "column-count",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            breakpoints: Breakpoints::default(),
            strengthen,
            unitless,
            selector_attribute: "costered-id".to_string(),
            scope_id_field: "costeredId".to_string(),
            styles_field: "costered".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            uploads_url: "/uploads".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_uploads(mut self, dir: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        self.uploads_dir = dir.into();
        self.uploads_url = url.into();
        self
    }

    pub fn with_strengthened(
        mut self,
        node_type: impl Into<String>,
        selectors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.strengthen.insert(
            node_type.into(),
            selectors.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_unitless(mut self, property: impl Into<String>) -> Self {
        self.unitless.insert(property.into());
        self
    }

    /// Whether a property is stored as a bare number.
    pub fn is_unitless(&self, property: &str) -> bool {
        let key = property_key(property);
        self.unitless.iter().any(|p| property_key(p) == key)
    }

    /// Descendant selectors for a node type, if it needs strengthening.
    pub fn strengthened_selectors(&self, node_type: &str) -> Option<&[String]> {
        self.strengthen
            .get(node_type)
            .map(Vec::as_slice)
            .filter(|s| !s.is_empty())
    }

    /// Output directory for compiled stylesheets.
    pub fn output_dir(&self) -> PathBuf {
        self.uploads_dir.join("costered")
    }

    /// Public URL of [`Config::output_dir`].
    pub fn output_url(&self) -> String {
        format!("{}/costered", self.uploads_url.trim_end_matches('/'))
    }
}
