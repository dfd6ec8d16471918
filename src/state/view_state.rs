//! Responsive visibility state machine.
//!
//! Three inputs decide what the results page shows: the viewport size
//! category (owned by a [`ScreenSizeOracle`]), two user-toggled flags, and
//! whether a document is opened for preview. The flags and the document live
//! in [`ViewState`]; the visibility predicates are derived from state plus a
//! fresh oracle read every time they are asked for, never stored.
//!
//! # Visibility rules
//!
//! | predicate | rule |
//! |-----------|------|
//! | filters   | `screen >= lg` or `filters_toggled` |
//! | menu      | `screen >= sm` or (`menu_toggled` and not `filters_toggled`) |
//! | results   | `screen <= sm`: not filters and no document; otherwise always |
//! | form      | `screen >= sm` or filters |

use crate::model::{DocumentRef, Record, ScreenSizeCategory, ScreenSizeOracle, ViewError};
use serde::Serialize;
use tracing::{debug, warn};

// ===== ViewState =====

/// Mutable view state. Only [`ViewStateMachine`] writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    filters_toggled: bool,
    menu_toggled: bool,
    opened_document: Option<DocumentRef>,
}

impl ViewState {
    /// Whether the user toggled the filter panel on.
    pub fn filters_toggled(&self) -> bool {
        self.filters_toggled
    }

    /// Whether the user toggled the navigation menu on.
    pub fn menu_toggled(&self) -> bool {
        self.menu_toggled
    }

    /// The document currently opened for preview.
    pub fn opened_document(&self) -> Option<&DocumentRef> {
        self.opened_document.as_ref()
    }
}

// ===== Visibility =====

/// The four visibility predicates, all derived from a single screen reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    /// Category the predicates were computed against.
    pub screen: ScreenSizeCategory,
    /// Filter panel visible.
    pub filters: bool,
    /// Navigation menu visible.
    pub menu: bool,
    /// Result list visible.
    pub results: bool,
    /// Search form visible.
    pub form: bool,
}

impl Visibility {
    /// Derive visibility for `state` on a `screen` of the given category.
    pub fn compute(screen: ScreenSizeCategory, state: &ViewState) -> Self {
        let filters = screen >= ScreenSizeCategory::Lg || state.filters_toggled;
        let menu = screen >= ScreenSizeCategory::Sm
            || (state.menu_toggled && !state.filters_toggled);
        let results = if screen <= ScreenSizeCategory::Sm {
            !filters && state.opened_document.is_none()
        } else {
            true
        };
        let form = screen >= ScreenSizeCategory::Sm || filters;

        Self {
            screen,
            filters,
            menu,
            results,
            form,
        }
    }
}

/// Which pane occupies a constrained layout.
///
/// On wide screens results are always visible and this is `Results`; on
/// narrow screens filters and preview replace the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// Result list.
    Results,
    /// Filter panel in place of the result list.
    Filters,
    /// Document preview in place of the result list.
    Preview,
}

impl Pane {
    fn classify(visibility: &Visibility, state: &ViewState) -> Self {
        if visibility.results {
            Pane::Results
        } else if state.opened_document.is_some() {
            Pane::Preview
        } else {
            Pane::Filters
        }
    }
}

// ===== ViewStateMachine =====

/// Owns the [`ViewState`] and exposes its transitions.
///
/// All transitions are synchronous and infallible under their contracts.
/// The only fallible entry point is [`ViewStateMachine::open_record`], which
/// rejects records without a usable identifier.
#[derive(Debug, Clone)]
pub struct ViewStateMachine<O> {
    screen: O,
    state: ViewState,
}

impl<O: ScreenSizeOracle> ViewStateMachine<O> {
    /// Start a view session.
    ///
    /// Filters start toggled exactly when the initial screen is medium; the
    /// menu starts collapsed and no document is open.
    pub fn new(screen: O) -> Self {
        let filters_toggled = screen.is_equal(ScreenSizeCategory::Md);
        debug!(
            screen = %screen.current(),
            filters_toggled,
            "View state initialised"
        );
        Self {
            screen,
            state: ViewState {
                filters_toggled,
                menu_toggled: false,
                opened_document: None,
            },
        }
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The screen oracle.
    pub fn screen(&self) -> &O {
        &self.screen
    }

    // ----- Derived predicates -----

    /// All four predicates from one screen reading.
    pub fn visibility(&self) -> Visibility {
        Visibility::compute(self.screen.current(), &self.state)
    }

    /// Filter panel visible.
    pub fn show_filters(&self) -> bool {
        self.visibility().filters
    }

    /// Navigation menu visible.
    pub fn show_menu(&self) -> bool {
        self.visibility().menu
    }

    /// Result list visible.
    pub fn show_results(&self) -> bool {
        self.visibility().results
    }

    /// Search form visible.
    pub fn show_form(&self) -> bool {
        self.visibility().form
    }

    /// Named pane the layout is in.
    pub fn primary_pane(&self) -> Pane {
        let visibility = self.visibility();
        Pane::classify(&visibility, &self.state)
    }

    // ----- Transitions -----

    /// A new result set arrived (including an empty one).
    ///
    /// When results are hidden, drop the preview and the filter panel so the
    /// user lands back on the list.
    pub fn on_new_results(&mut self) {
        if !self.show_results() {
            debug!(
                closed_document = ?self.state.opened_document,
                "New results while results hidden: returning to result list"
            );
            self.state.opened_document = None;
            self.state.filters_toggled = false;
        }
    }

    /// Open `doc` for preview. Collapses filters on screens up to medium.
    pub fn open_document(&mut self, doc: DocumentRef) {
        if self.screen.is_less_or_equal(ScreenSizeCategory::Md) {
            self.state.filters_toggled = false;
        }
        debug!(document = %doc, "Document opened");
        self.state.opened_document = Some(doc);
    }

    /// Open the document behind `record`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidArgument`] when the record has no
    /// identifier. The state is left unchanged.
    pub fn open_record(&mut self, record: &Record) -> Result<(), ViewError> {
        let doc = DocumentRef::from_record(record).map_err(|err| {
            warn!(error = %err, "Rejected open_document without a document reference");
            ViewError::from(err)
        })?;
        self.open_document(doc);
        Ok(())
    }

    /// Close the preview.
    ///
    /// Returns whether a document was open. On medium screens closing the
    /// preview brings the filter panel back. No-op when nothing is open.
    pub fn close_document(&mut self) -> bool {
        let Some(doc) = self.state.opened_document.take() else {
            return false;
        };
        if self.screen.is_equal(ScreenSizeCategory::Md) {
            self.state.filters_toggled = true;
        }
        debug!(document = %doc, filters_toggled = self.state.filters_toggled, "Document closed");
        true
    }

    /// Flip the filter panel. Turning it on closes the preview.
    pub fn toggle_filters(&mut self) {
        self.state.filters_toggled = !self.state.filters_toggled;
        if self.state.filters_toggled {
            self.state.opened_document = None;
        }
        debug!(filters_toggled = self.state.filters_toggled, "Filters toggled");
    }

    /// Flip the navigation menu.
    pub fn toggle_menu(&mut self) {
        self.state.menu_toggled = !self.state.menu_toggled;
        debug!(menu_toggled = self.state.menu_toggled, "Menu toggled");
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "view_state_tests.rs"]
mod tests;
