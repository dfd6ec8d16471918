//! Effective configuration: server override or compiled-in defaults.
//!
//! Each category (facets, features, metadata) is resolved on its own. If the
//! server app-data defines a non-empty list for the category, that list wins
//! as a whole; otherwise the compiled-in default list is used. Lists are never
//! merged element-wise, and override entries are not validated.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ===== ConfigCategory =====

/// A configuration category resolvable from app-data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigCategory {
    /// Facet definitions.
    Facets,
    /// Enabled feature names.
    Features,
    /// Metadata field names shown on results.
    Metadata,
}

impl ConfigCategory {
    /// All categories.
    pub const ALL: [ConfigCategory; 3] = [
        ConfigCategory::Facets,
        ConfigCategory::Features,
        ConfigCategory::Metadata,
    ];

    /// Field name in the app-data object.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigCategory::Facets => "facets",
            ConfigCategory::Features => "features",
            ConfigCategory::Metadata => "metadata",
        }
    }
}

impl fmt::Display for ConfigCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownCategory(s.to_string()))
    }
}

// ===== AppData =====

/// Server-supplied application data.
///
/// Any field may be missing or null. Unknown fields are ignored; the server
/// sends much more than the three lists read here. A field that is present
/// but not an array is kept as a one-entry override rather than rejected, so
/// one malformed category never hides the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    /// Facet definitions override.
    #[serde(default, deserialize_with = "deserialize_override")]
    pub facets: Option<Vec<Value>>,
    /// Feature list override.
    #[serde(default, deserialize_with = "deserialize_override")]
    pub features: Option<Vec<Value>>,
    /// Metadata field list override.
    #[serde(default, deserialize_with = "deserialize_override")]
    pub metadata: Option<Vec<Value>>,
}

/// Read an override field without a schema check.
///
/// `null` is no override, an array is the list itself, anything else is
/// taken as given as the single entry of the list.
fn deserialize_override<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Array(list)) => Some(list),
        Some(other) => {
            debug!(value = %other, "Non-list app-data override kept as-is");
            Some(vec![other])
        }
    })
}

impl AppData {
    /// The override list for `category`, if defined and non-empty.
    pub fn list(&self, category: ConfigCategory) -> Option<&[Value]> {
        let list = match category {
            ConfigCategory::Facets => self.facets.as_deref(),
            ConfigCategory::Features => self.features.as_deref(),
            ConfigCategory::Metadata => self.metadata.as_deref(),
        };
        list.filter(|l| !l.is_empty())
    }

    /// Parse app-data from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AppDataParse`] if the text is not a JSON object
    /// of the expected shape.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::AppDataParse {
            path: None,
            reason: e.to_string(),
        })
    }
}

// ===== Defaults =====

/// Compiled-in configuration lists.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultConfig {
    /// Default facet definitions.
    pub facets: Vec<Value>,
    /// Default feature names.
    pub features: Vec<Value>,
    /// Default metadata fields.
    pub metadata: Vec<Value>,
}

impl DefaultConfig {
    fn list(&self, category: ConfigCategory) -> &[Value] {
        match category {
            ConfigCategory::Facets => &self.facets,
            ConfigCategory::Features => &self.features,
            ConfigCategory::Metadata => &self.metadata,
        }
    }
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            facets: vec![
                json!({
                    "name": "geo",
                    "title": "msg#facet.sources.title",
                    "type": "tree",
                    "aggregation": "Treepath",
                    "icon": "fas fa-sitemap"
                }),
                json!({
                    "name": "authors",
                    "title": "msg#facet.authors.title",
                    "type": "list",
                    "aggregation": "Authors",
                    "icon": "fas fa-user-edit"
                }),
                json!({
                    "name": "modified",
                    "title": "msg#facet.modified.title",
                    "type": "date",
                    "aggregation": "Modified",
                    "icon": "fas fa-calendar-day"
                }),
                json!({
                    "name": "docformat",
                    "title": "msg#facet.docformat.title",
                    "type": "list",
                    "aggregation": "DocFormat",
                    "icon": "far fa-file-word"
                }),
            ],
            features: ["SavedQueries", "Baskets", "Labels", "Alerts", "UserSettings"]
                .into_iter()
                .map(Value::from)
                .collect(),
            metadata: ["authors", "docformat", "modified", "size", "treepath"]
                .into_iter()
                .map(Value::from)
                .collect(),
        }
    }
}

// ===== ConfigResolver =====

/// Where a resolved list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Server app-data.
    Override,
    /// Compiled-in defaults.
    Default,
}

/// Resolves effective configuration against the current app-data snapshot.
///
/// Nothing is cached: every call looks at the snapshot as it is now, so a
/// refresh through [`ConfigResolver::set_app_data`] is visible immediately.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    defaults: DefaultConfig,
    app_data: Option<AppData>,
}

impl ConfigResolver {
    /// Resolver over the compiled-in defaults.
    pub fn new(app_data: Option<AppData>) -> Self {
        Self::with_defaults(DefaultConfig::default(), app_data)
    }

    /// Resolver over custom defaults.
    pub fn with_defaults(defaults: DefaultConfig, app_data: Option<AppData>) -> Self {
        Self { defaults, app_data }
    }

    /// Replace the app-data snapshot.
    pub fn set_app_data(&mut self, app_data: Option<AppData>) {
        debug!(present = app_data.is_some(), "App-data snapshot replaced");
        self.app_data = app_data;
    }

    /// Current app-data snapshot.
    pub fn app_data(&self) -> Option<&AppData> {
        self.app_data.as_ref()
    }

    /// The effective list for `category`.
    pub fn resolve(&self, category: ConfigCategory) -> &[Value] {
        self.override_list(category)
            .unwrap_or_else(|| self.defaults.list(category))
    }

    /// Where the effective list for `category` comes from.
    pub fn source(&self, category: ConfigCategory) -> ConfigSource {
        if self.override_list(category).is_some() {
            ConfigSource::Override
        } else {
            ConfigSource::Default
        }
    }

    /// Effective facet definitions.
    pub fn facets(&self) -> &[Value] {
        self.resolve(ConfigCategory::Facets)
    }

    /// Effective feature list.
    pub fn features(&self) -> &[Value] {
        self.resolve(ConfigCategory::Features)
    }

    /// Effective metadata field list.
    pub fn metadata(&self) -> &[Value] {
        self.resolve(ConfigCategory::Metadata)
    }

    fn override_list(&self, category: ConfigCategory) -> Option<&[Value]> {
        self.app_data.as_ref().and_then(|data| data.list(category))
    }
}
