//! The transformation side panel.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Panel state and derived phase
//! - `intent.rs` - User/system actions
//! - `reducer.rs` - State transitions
//! - `controller.rs` - Side effects and intent dispatch
//! - `poller.rs` - Periodic selection reads

mod controller;
mod error;
mod intent;
mod poller;
mod reducer;
mod state;

pub use controller::PanelController;
pub use error::PanelError;
pub use intent::PanelIntent;
pub use poller::{PollerHandle, SelectionPoller, DEFAULT_POLL_INTERVAL};
pub use reducer::PanelReducer;
pub use state::{PanelPhase, PanelState, BUSY_LABEL};
