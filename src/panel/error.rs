//! Errors surfaced by the panel controller.

use thiserror::Error;

use crate::host::HostError;
use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum PanelError {
    /// Precondition failure or failed request to the service.
    #[error(transparent)]
    Transformation(#[from] TransformError),

    /// Writing the transformation back into the host failed.
    #[error("Failed to replace the selection: {0}")]
    SelectionWrite(#[source] HostError),

    /// Another request is still outstanding.
    #[error("A transformation is already in progress")]
    Busy,

    /// A result is waiting to be accepted or discarded.
    #[error("Accept or discard the current transformation first")]
    ResultPending,

    #[error("There is no transformation to accept")]
    NothingToAccept,
}

impl PanelError {
    /// Message shown in the panel.
    pub fn user_message(&self) -> String {
        match self {
            PanelError::Transformation(e) => e.user_message(),
            PanelError::SelectionWrite(_) => {
                "Could not replace the selection, try accepting again".to_string()
            }
            other => other.to_string(),
        }
    }
}
