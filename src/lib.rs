//! serp-view
//!
//! Responsive view-state coordinator for a search results page: which panels
//! (filters, menu, results, search form, preview) are visible at each screen
//! size, how clicks on results open a preview, and how configuration lists
//! fall back to defaults when server app-data has none.
//!
//! Pure core ([`model`], [`state`], [`config::resolver`]) with an impure
//! shell ([`config::loader`], [`logging`], [`source`], [`runner`]) around it.
//! [`integration::SearchView`] wires one view session together.

pub mod config;
pub mod integration;
pub mod logging;
pub mod model;
pub mod runner;
pub mod source;
pub mod state;
