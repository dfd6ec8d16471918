//! Search view wiring.
//!
//! [`SearchView`] owns one view session: the [`ViewStateMachine`], the
//! [`ConfigResolver`], the [`ActiveFacetTracker`], the click classifier and
//! the result-stream subscription. External collaborators (page title,
//! preview surface) are reached through the [`TitleService`] and
//! [`PreviewService`] traits.
//!
//! Lifecycle: created with a live subscription, torn down exactly once.
//! After teardown every result delivery is a silent no-op.

use crate::config::{AppData, ConfigCategory, ConfigResolver};
use crate::model::{FacetConfig, Record, ScreenSizeOracle, UiEvent, ViewError};
use crate::source::{ResultsEvent, Subscription};
use crate::state::{
    ActiveFacetTracker, ClickClassifier, FacetDisplay, Pane, ViewState, ViewStateMachine,
    Visibility,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Page title / localization service.
pub trait TitleService {
    /// Publish the page title for a search on `query_text`.
    fn set_search_title(&mut self, query_text: &str);
}

/// Document preview surface.
pub trait PreviewService {
    /// Open a preview of `record` highlighted for `query_text`.
    fn open_preview(&mut self, record: &Record, query_text: &str);
}

/// Title service that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTitle;

impl TitleService for NoTitle {
    fn set_search_title(&mut self, _query_text: &str) {}
}

/// Preview service that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPreview;

impl PreviewService for NoPreview {
    fn open_preview(&mut self, _record: &Record, _query_text: &str) {}
}

/// One search results view session.
pub struct SearchView<O, T, P> {
    machine: ViewStateMachine<O>,
    resolver: ConfigResolver,
    facets: ActiveFacetTracker,
    classifier: ClickClassifier,
    subscription: Option<Subscription>,
    title: T,
    preview: P,
    query_text: String,
}

impl<O, T, P> SearchView<O, T, P>
where
    O: ScreenSizeOracle,
    T: TitleService,
    P: PreviewService,
{
    /// Start a view session subscribed to `subscription`.
    pub fn new(
        screen: O,
        subscription: Subscription,
        app_data: Option<AppData>,
        title: T,
        preview: P,
    ) -> Self {
        info!(screen = %screen.current(), app_data = app_data.is_some(), "Search view started");
        Self {
            machine: ViewStateMachine::new(screen),
            resolver: ConfigResolver::new(app_data),
            facets: ActiveFacetTracker::new(),
            classifier: ClickClassifier::default(),
            subscription: Some(subscription),
            title,
            preview,
            query_text: String::new(),
        }
    }

    /// Replace the click classifier.
    pub fn with_classifier(mut self, classifier: ClickClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    // ----- Result stream -----

    /// Apply every pending result event, in delivery order.
    ///
    /// Returns how many were applied. Always zero after teardown.
    pub fn pump(&mut self) -> usize {
        let Some(subscription) = &self.subscription else {
            return 0;
        };
        let pending = subscription.drain();
        let count = pending.len();
        for event in pending {
            self.apply_results(&event);
        }
        count
    }

    /// Apply one result event synchronously.
    ///
    /// Returns whether it was applied; after teardown it is dropped.
    pub fn deliver(&mut self, event: &ResultsEvent) -> bool {
        if self.subscription.is_none() {
            debug!(query = %event.query_text, "Ignoring result event after teardown");
            return false;
        }
        self.apply_results(event);
        true
    }

    fn apply_results(&mut self, event: &ResultsEvent) {
        self.title.set_search_title(&event.query_text);
        self.query_text.clone_from(&event.query_text);
        self.machine.on_new_results();
        debug!(
            query = %event.query_text,
            total = event.total_count,
            pane = ?self.machine.primary_pane(),
            "Results applied"
        );
    }

    /// Release the subscription.
    ///
    /// Returns `true` the first time, `false` on every later call.
    pub fn teardown(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                drop(subscription);
                info!("Search view torn down");
                true
            }
            None => false,
        }
    }

    /// Whether the view has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.subscription.is_none()
    }

    // ----- Document interaction -----

    /// The user clicked a result.
    ///
    /// Action clicks (links, inputs, interactive regions, non-primary
    /// events) are ignored and return `Ok(false)`. Otherwise the record is
    /// opened and `Ok(true)` returned.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidArgument`] when the click would open a
    /// document but `record` is absent or has no identifier.
    pub fn on_document_clicked(
        &mut self,
        record: Option<&Record>,
        event: &UiEvent,
    ) -> Result<bool, ViewError> {
        if self.classifier.is_action_click(event) {
            return Ok(false);
        }
        let Some(record) = record else {
            warn!("Document click without a record");
            return Err(ViewError::missing_document("on_document_clicked"));
        };
        self.machine.open_record(record)?;
        Ok(true)
    }

    /// Ask the preview surface to open `record` unless the click was a link.
    ///
    /// Returns whether a preview was requested.
    pub fn open_preview_if_no_url(&mut self, record: &Record, is_link: bool) -> bool {
        if is_link {
            return false;
        }
        self.preview.open_preview(record, &self.query_text);
        true
    }

    /// Close the preview. Returns whether a document was open.
    pub fn close_document(&mut self) -> bool {
        self.machine.close_document()
    }

    /// Flip the filter panel.
    pub fn toggle_filters(&mut self) {
        self.machine.toggle_filters();
    }

    /// Flip the navigation menu.
    pub fn toggle_menu(&mut self) {
        self.machine.toggle_menu();
    }

    // ----- Read side -----

    /// Visibility predicates from one screen reading.
    pub fn visibility(&self) -> Visibility {
        self.machine.visibility()
    }

    /// Named pane of the layout.
    pub fn primary_pane(&self) -> Pane {
        self.machine.primary_pane()
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        self.machine.state()
    }

    /// The screen oracle.
    pub fn screen(&self) -> &O {
        self.machine.screen()
    }

    /// Query text of the last applied result set.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    // ----- Configuration & facets -----

    /// Effective list for `category`.
    pub fn resolve_config(&self, category: ConfigCategory) -> &[Value] {
        self.resolver.resolve(category)
    }

    /// The configuration resolver.
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Server app-data refreshed.
    pub fn set_app_data(&mut self, app_data: Option<AppData>) {
        self.resolver.set_app_data(app_data);
    }

    /// The expanded facet changed.
    pub fn on_facet_changed(&mut self, facet: Option<FacetConfig>) {
        self.facets.on_facet_changed(facet);
    }

    /// Header of the combined facet control.
    pub fn active_facet_display(&self) -> &FacetDisplay {
        self.facets.display()
    }

    /// The title service.
    pub fn title_service(&self) -> &T {
        &self.title
    }

    /// The preview service.
    pub fn preview_service(&self) -> &P {
        &self.preview
    }

    /// Mutable access to the title service.
    pub fn title_service_mut(&mut self) -> &mut T {
        &mut self.title
    }

    /// Mutable access to the preview service.
    pub fn preview_service_mut(&mut self) -> &mut P {
        &mut self.preview
    }
}

#[cfg(test)]
#[path = "integration_tests.rs"]
mod tests;
