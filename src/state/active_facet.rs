//! Active facet tracking for the combined multi-facet control.

use crate::model::FacetConfig;
use serde::Serialize;
use tracing::debug;

/// Icon shown when no facet is expanded.
pub const DEFAULT_FACET_ICON: &str = "fas fa-filter";

/// Title shown when no facet is expanded.
pub const DEFAULT_FACET_TITLE: &str = "msg#facet.filters.title";

/// What the facet control header displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetDisplay {
    /// Icon class, as provided by the facet.
    pub icon: Option<String>,
    /// Title, as provided by the facet.
    pub title: Option<String>,
}

impl Default for FacetDisplay {
    fn default() -> Self {
        Self {
            icon: Some(DEFAULT_FACET_ICON.to_string()),
            title: Some(DEFAULT_FACET_TITLE.to_string()),
        }
    }
}

/// Tracks which facet is expanded and what its header shows.
///
/// The defaults apply only when no facet is active. A present facet without
/// a title displays no title; it does not fall back to the default.
#[derive(Debug, Clone, Default)]
pub struct ActiveFacetTracker {
    active: Option<FacetConfig>,
    display: FacetDisplay,
}

impl ActiveFacetTracker {
    /// Tracker with no active facet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The expanded facet changed (or collapsed, when `None`).
    pub fn on_facet_changed(&mut self, facet: Option<FacetConfig>) {
        self.display = match &facet {
            Some(f) => FacetDisplay {
                icon: f.icon.clone(),
                title: f.title.clone(),
            },
            None => FacetDisplay::default(),
        };
        debug!(
            facet = facet.as_ref().map(|f| f.name.as_str()),
            "Active facet changed"
        );
        self.active = facet;
    }

    /// The expanded facet.
    pub fn active(&self) -> Option<&FacetConfig> {
        self.active.as_ref()
    }

    /// Header icon and title.
    pub fn display(&self) -> &FacetDisplay {
        &self.display
    }

    /// Header icon.
    pub fn icon(&self) -> Option<&str> {
        self.display.icon.as_deref()
    }

    /// Header title.
    pub fn title(&self) -> Option<&str> {
        self.display.title.as_deref()
    }
}
