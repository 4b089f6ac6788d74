//! Chat-completion wire format.
//!
//! ```json
//! { "model": "...", "messages": [
//!     { "role": "system", "content": "<instruction>" },
//!     { "role": "user", "content": "<selection>" } ] }
//! ```
//!
//! The result is read from `choices[0].message.content`.

use serde::{Deserialize, Serialize};

use super::error::TransformError;

/// Path of the completion endpoint, relative to a service base URL.
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Empty when a proxy is expected to fill in its configured model.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Instruction as the system message, selection as the user message.
    pub fn for_selection(model: &str, instruction: &str, selection: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::system(instruction), ChatMessage::user(selection)],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Parse a response body and pull out the first completion.
    pub fn parse_completion(body: &str) -> Result<String, TransformError> {
        let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
            TransformError::MalformedResponse(format!("Failed to parse response JSON: {}", e))
        })?;
        response.into_completion()
    }

    /// `choices[0].message.content`.
    pub fn into_completion(self) -> Result<String, TransformError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                TransformError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}
