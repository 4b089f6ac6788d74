//! Error types for the transformation request cycle.

use thiserror::Error;

/// Errors that can occur while turning a selection into a transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Operation/parameter mismatch, rejected before any outbound call.
    #[error("Invalid operation parameter: {0}")]
    InvalidOperationParameter(String),

    /// Nothing is selected, rejected before any outbound call.
    #[error("Nothing is selected")]
    EmptySelection,

    /// The service has no usable credential or endpoint.
    #[error("Text-generation service not configured: {0}")]
    NotConfigured(String),

    /// Failed to reach the service.
    #[error("Connection to text-generation service failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// The service did not answer in time.
    #[error("Text-generation request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The service answered with a non-2xx status.
    #[error("Text-generation service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The body did not contain `choices[0].message.content`.
    #[error("Malformed response from text-generation service: {0}")]
    MalformedResponse(String),
}

impl TransformError {
    /// True for failures caught before a request was issued.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            TransformError::InvalidOperationParameter(_) | TransformError::EmptySelection
        )
    }

    /// Short message for the panel, with a hint on what to do next.
    pub fn user_message(&self) -> String {
        match self {
            TransformError::InvalidOperationParameter(reason) => {
                format!("Pick a valid option: {}", reason)
            }
            TransformError::EmptySelection => "Select some text first".to_string(),
            TransformError::NotConfigured(_) => {
                "The text-generation service is not configured".to_string()
            }
            TransformError::Connection(_) => {
                "Could not reach the text-generation service, try again".to_string()
            }
            TransformError::Timeout { seconds } => {
                format!("No answer after {}s, try again", seconds)
            }
            TransformError::Api { status, .. } => {
                format!("The text-generation service returned {}, try again", status)
            }
            TransformError::MalformedResponse(_) => {
                "The text-generation service sent an unreadable answer, try again".to_string()
            }
        }
    }
}
