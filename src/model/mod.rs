//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod document;
pub mod error;
pub mod facet;
pub mod screen_size;
pub mod ui_event;

// Re-export for convenience
pub use document::{DocumentRef, InvalidDocumentRef, Record};
pub use error::{AppError, ScriptError, ViewError};
pub use facet::FacetConfig;
pub use screen_size::{
    FixedScreen, InvalidScreenSize, ScreenSizeCategory, ScreenSizeOracle, WidthScreen,
};
pub use ui_event::{ElementNode, EventKind, InvalidSelector, Selector, TargetElement, UiEvent};
