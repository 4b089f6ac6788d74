//! State for the transformation side panel.

use crate::mvi::UiState;
use crate::transform::Operation;

/// Label shown next to the spinner while a request is outstanding.
pub const BUSY_LABEL: &str = "Querying ChatGPT...";

/// Observable phase, derived from the busy flag and the transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    /// Not busy and no result waiting.
    Idle,
    /// One request is outstanding.
    Pending,
    /// A result is waiting to be accepted or discarded.
    Ready,
}

/// Everything the view needs to render the panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    /// Latest text read from the host selection; empty when nothing is selected.
    pub selection: String,
    /// Latest result from the service; empty when there is none.
    pub transformation: String,
    /// True while a request is outstanding.
    pub busy: bool,
    /// Operation of the most recent request.
    pub last_operation: Option<Operation>,
    /// User-facing message for the most recent failure.
    pub error: Option<String>,
}

impl UiState for PanelState {}

impl PanelState {
    pub fn phase(&self) -> PanelPhase {
        if self.busy {
            PanelPhase::Pending
        } else if !self.transformation.is_empty() {
            PanelPhase::Ready
        } else {
            PanelPhase::Idle
        }
    }

    /// Operation buttons are enabled.
    pub fn can_request(&self) -> bool {
        self.phase() == PanelPhase::Idle && !self.selection.is_empty()
    }

    /// The accept button is shown.
    pub fn can_accept(&self) -> bool {
        self.phase() == PanelPhase::Ready
    }

    /// Transformation when there is one, otherwise the selection.
    pub fn displayed_text(&self) -> &str {
        if self.transformation.is_empty() {
            &self.selection
        } else {
            &self.transformation
        }
    }

    /// Field label for `displayed_text`.
    pub fn displayed_label(&self) -> &'static str {
        if self.transformation.is_empty() {
            "Selection"
        } else {
            "Transformation"
        }
    }

    pub fn status_label(&self) -> Option<&'static str> {
        self.busy.then_some(BUSY_LABEL)
    }
}
