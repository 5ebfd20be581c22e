//! Application state machine.
//!
//! This module contains the registry's unidirectional state-update loop:
//! events flow into [`handle_event`], which mutates [`AppState`] and returns
//! the [`Action`]s for the embedding runtime to execute.
//!
//! # Architecture
//!
//! - `state`: [`AppState`] container and list/selection maintenance
//! - `handler`: [`Event`] types and the transition function
//! - `actions`: [`Action`] side-effect descriptions
//! - `scan`: [`ScanState`] discovery lifecycle

pub mod actions;
pub mod handler;
pub mod scan;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use scan::ScanState;
pub use state::{AppState, PendingOperation};
