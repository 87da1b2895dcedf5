//! Display-layer projections.
//!
//! The presenter computes pure view models from aggregates and selection
//! state; the filter narrows what those models display without touching the
//! underlying data. Only the imperative rendering step (CLI printing, the
//! served front end) consumes these, which keeps everything here
//! unit-testable headlessly.

pub mod filter;
pub mod presenter;

pub use filter::{apply_filter, FilterOutcome, NO_RESULTS_MARKER};
pub use presenter::{render_details, render_list, show_button_enabled, DetailsView, ListItem};
