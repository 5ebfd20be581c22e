//! View model layer.
//!
//! Pure computation from registry state to renderable structures. No drawing
//! happens here; the embedding frontend owns presentation.
//!
//! # Architecture
//!
//! - `rows`: per-host row renderer
//! - `viewmodel`: device-list view model with Saved and Discovered sections

pub mod rows;
pub mod viewmodel;

pub use rows::{render_row, HostRow};
pub use viewmodel::{compute_viewmodel, DeviceListViewModel};
