//! Host document collaborators.
//!
//! The panel needs two capabilities from whatever document it is attached
//! to: read the current selection as plain text, and replace the selection
//! with new text. Both are async because real hosts answer through a
//! callback or IPC round trip.

mod clipboard;

use async_trait::async_trait;
use thiserror::Error;

pub use clipboard::{ClipboardHost, SelectionKind};

/// Errors reported by a host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host cannot be reached at all.
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read selection: {0}")]
    Read(String),

    #[error("Failed to write selection: {0}")]
    Write(String),
}

/// Reads the text currently selected in the host document.
#[async_trait]
pub trait SelectionSource: Send + Sync {
    /// `Ok(None)` means the host reported no data (nothing selected).
    async fn read_selection(&self) -> Result<Option<String>, HostError>;
}

/// Replaces the current selection in the host document.
#[async_trait]
pub trait SelectionSink: Send + Sync {
    async fn write_selection(&self, text: &str) -> Result<(), HostError>;
}
