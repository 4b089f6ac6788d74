//! Intents for the transformation panel.

use crate::mvi::Intent;
use crate::transform::Operation;

#[derive(Debug, Clone)]
pub enum PanelIntent {
    /// Poll tick read the host selection. Overwrites unconditionally.
    SelectionObserved { text: String },

    /// A request was issued for this operation.
    RequestStarted { operation: Operation },

    /// The service answered.
    TransformSucceeded { text: String },

    /// The request failed (network, status, body, timeout, cancellation).
    TransformFailed { message: String },

    /// A request was refused before being issued.
    RequestRejected { message: String },

    /// The transformation was written back into the host.
    Accepted,

    /// Writing back into the host failed.
    AcceptFailed { message: String },

    /// The user threw the transformation away.
    Discarded,

    /// The user closed the error message.
    ErrorDismissed,
}

impl Intent for PanelIntent {}
