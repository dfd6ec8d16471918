//! Facet definitions as consumed by the combined multi-facet control.

use serde::{Deserialize, Serialize};

/// A facet definition.
///
/// Facet entries in the effective configuration are untyped JSON; the
/// rendering layer decodes the ones it needs into this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Facet name, unique within the configuration.
    pub name: String,
    /// Display title (often a localization key).
    #[serde(default)]
    pub title: Option<String>,
    /// Icon class.
    #[serde(default)]
    pub icon: Option<String>,
    /// Facet kind (`"list"`, `"tree"`, `"date"`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Aggregation backing the facet.
    #[serde(default)]
    pub aggregation: Option<String>,
}

impl FacetConfig {
    /// Create a facet with a name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            icon: None,
            kind: None,
            aggregation: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Decode a configuration entry, if it has the facet shape.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
