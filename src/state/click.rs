//! Click classification.
//!
//! Decides whether a click on a result should open the document preview,
//! or whether it landed on something interactive (a link, an input, a
//! selection checkbox region) that handles the click itself.

use crate::model::{ElementNode, InvalidSelector, Selector, UiEvent};
use tracing::trace;

/// CSS classes of the result sub-regions that own their clicks.
pub const INTERACTIVE_REGIONS: [&str; 3] =
    ["sq-result-selector", "sq-result-title", "sq-result-source"];

/// Tags that are interactive on their own.
pub const INTERACTIVE_TAGS: [&str; 2] = ["a", "input"];

/// Classifies UI events as "action" clicks that must not open a document.
#[derive(Debug, Clone)]
pub struct ClickClassifier {
    element_selectors: Vec<Selector>,
    region_selectors: Vec<Selector>,
}

impl Default for ClickClassifier {
    fn default() -> Self {
        Self {
            element_selectors: INTERACTIVE_TAGS.iter().map(|t| Selector::tag(*t)).collect(),
            region_selectors: INTERACTIVE_REGIONS
                .iter()
                .map(|c| Selector::class(*c))
                .collect(),
        }
    }
}

impl ClickClassifier {
    /// Build a classifier from selector strings.
    ///
    /// `elements` are matched against the target only; `regions` are matched
    /// against the target and all its ancestors.
    ///
    /// # Errors
    ///
    /// Returns the first selector that fails to parse.
    pub fn with_selectors<'a>(
        elements: impl IntoIterator<Item = &'a str>,
        regions: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, InvalidSelector> {
        Ok(Self {
            element_selectors: elements
                .into_iter()
                .map(str::parse::<Selector>)
                .collect::<Result<_, _>>()?,
            region_selectors: regions
                .into_iter()
                .map(str::parse::<Selector>)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Whether `event` is an action click, i.e. must NOT open a document.
    ///
    /// - Any non-primary event kind is an action.
    /// - A primary click without a resolvable target is not an action: an
    ///   unreachable target cannot be a real widget, so it falls through to
    ///   the open path.
    /// - A primary click on a link, an input, or inside one of the
    ///   interactive regions is an action.
    pub fn is_action_click(&self, event: &UiEvent) -> bool {
        if !event.kind.is_primary() {
            trace!(kind = ?event.kind, "Non-primary event classified as action");
            return true;
        }

        let Some(target) = &event.target else {
            return false;
        };

        let is_action = self.element_selectors.iter().any(|s| target.matches(s))
            || self.region_selectors.iter().any(|s| target.closest(s));
        trace!(
            path = %describe_path(&target.path()),
            is_action,
            "Click classified"
        );
        is_action
    }
}

/// `span < div.sq-result < li`, innermost first.
fn describe_path(path: &[ElementNode]) -> String {
    path.iter()
        .map(|node| {
            std::iter::once(node.tag.as_str())
                .chain(node.classes.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(".")
        })
        .collect::<Vec<_>>()
        .join(" < ")
}
