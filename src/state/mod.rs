//! View state (pure).
//!
//! All state transitions are synchronous and testable without a renderer.

pub mod active_facet;
pub mod click;
pub mod view_state;

// Re-export for convenience
pub use active_facet::{ActiveFacetTracker, FacetDisplay, DEFAULT_FACET_ICON, DEFAULT_FACET_TITLE};
pub use click::ClickClassifier;
pub use view_state::{Pane, ViewState, ViewStateMachine, Visibility};
