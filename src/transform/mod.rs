//! Selection transformation: operations, instructions, and the completion client.

mod client;
mod error;
mod operation;
mod wire;

pub use client::{ChatCompletionClient, TransformService};
pub use error::TransformError;
pub use operation::{build_instruction, Operation, OperationKind, LANGUAGES, SENTIMENTS};
pub use wire::{ChatMessage, ChatRequest, ChatResponse, Choice, ChoiceMessage, COMPLETIONS_PATH};
