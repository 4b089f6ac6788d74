//! Panel controller: the single owner of the panel state.
//!
//! Views read snapshots (or subscribe to changes); every mutation goes
//! through an intent dispatched here, which keeps the state machine in
//! the reducer and the side effects (host calls, service requests) in
//! one place.

use std::sync::Arc;

use scopeguard::ScopeGuard;
use tokio::sync::watch;

use crate::host::SelectionSink;
use crate::mvi::{self, Reducer};
use crate::transform::{Operation, OperationKind, TransformError, TransformService};

use super::error::PanelError;
use super::intent::PanelIntent;
use super::reducer::PanelReducer;
use super::state::{PanelPhase, PanelState};

const CANCELLED_MESSAGE: &str = "The request was cancelled, try again";

#[derive(Clone)]
pub struct PanelController {
    state: Arc<watch::Sender<PanelState>>,
    service: Arc<dyn TransformService>,
    sink: Arc<dyn SelectionSink>,
}

impl PanelController {
    pub fn new(service: Arc<dyn TransformService>, sink: Arc<dyn SelectionSink>) -> Self {
        let (state, _) = watch::channel(PanelState::default());
        Self {
            state: Arc::new(state),
            service,
            sink,
        }
    }

    /// Current state as a read-only copy.
    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state.subscribe()
    }

    /// Record the selection read by a poll tick. `None` means nothing selected.
    pub fn observe_selection(&self, text: Option<String>) {
        self.dispatch(PanelIntent::SelectionObserved {
            text: text.unwrap_or_default(),
        });
    }

    /// Transform the current selection.
    pub async fn transform_selection(
        &self,
        kind: OperationKind,
        parameter: Option<&str>,
    ) -> Result<String, PanelError> {
        let selection = self.state.borrow().selection.clone();
        self.request_transformation(kind, &selection, parameter).await
    }

    /// Run one request cycle for `selection_text`.
    ///
    /// Preconditions are checked before anything is sent: a valid
    /// operation/parameter pair, a non-empty selection, no outstanding
    /// request and no result waiting to be accepted. Once issued, the busy
    /// flag is cleared on every path, including when this future is dropped.
    pub async fn request_transformation(
        &self,
        kind: OperationKind,
        selection_text: &str,
        parameter: Option<&str>,
    ) -> Result<String, PanelError> {
        let operation = Operation::new(kind, parameter).map_err(|e| self.reject(e.into()))?;

        if selection_text.is_empty() {
            return Err(self.reject(TransformError::EmptySelection.into()));
        }

        self.begin(&operation).map_err(|e| self.reject(e))?;

        let pending = scopeguard::guard(self.state.clone(), |state| {
            tracing::warn!("Transformation request dropped before completion");
            mvi::dispatch::<PanelReducer>(
                &state,
                PanelIntent::TransformFailed {
                    message: CANCELLED_MESSAGE.to_string(),
                },
            );
        });

        let instruction = operation.instruction();
        // Snapshot by value: later poll ticks must not affect this request.
        let text = selection_text.to_string();

        tracing::info!(
            operation = %operation.kind(),
            parameter = operation.parameter().unwrap_or(""),
            selection_len = text.len(),
            "Requesting transformation"
        );

        let result = self.service.complete(&instruction, &text).await;
        ScopeGuard::into_inner(pending);

        match result {
            Ok(transformation) => {
                tracing::info!(result_len = transformation.len(), "Transformation ready");
                self.dispatch(PanelIntent::TransformSucceeded {
                    text: transformation.clone(),
                });
                Ok(transformation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Transformation request failed");
                self.dispatch(PanelIntent::TransformFailed {
                    message: e.user_message(),
                });
                Err(PanelError::Transformation(e))
            }
        }
    }

    /// Write the transformation into the host and reset both texts.
    ///
    /// On a write failure nothing is cleared so the user can retry.
    pub async fn accept_transformation(&self) -> Result<(), PanelError> {
        let transformation = {
            let state = self.state.borrow();
            if state.phase() != PanelPhase::Ready {
                None
            } else {
                Some(state.transformation.clone())
            }
        };
        let Some(transformation) = transformation else {
            return Err(self.reject(PanelError::NothingToAccept));
        };

        match self.sink.write_selection(&transformation).await {
            Ok(()) => {
                tracing::info!(len = transformation.len(), "Transformation accepted");
                self.dispatch(PanelIntent::Accepted);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write transformation into host");
                let err = PanelError::SelectionWrite(e);
                self.dispatch(PanelIntent::AcceptFailed {
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    /// Throw away a waiting result so a new request can be made.
    pub fn discard_transformation(&self) {
        self.dispatch(PanelIntent::Discarded);
    }

    pub fn dismiss_error(&self) {
        self.dispatch(PanelIntent::ErrorDismissed);
    }

    /// Atomically check the phase and mark the request as started.
    fn begin(&self, operation: &Operation) -> Result<(), PanelError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|state| match state.phase() {
            PanelPhase::Pending => {
                outcome = Err(PanelError::Busy);
                false
            }
            PanelPhase::Ready => {
                outcome = Err(PanelError::ResultPending);
                false
            }
            PanelPhase::Idle => {
                *state = PanelReducer::reduce(
                    std::mem::take(state),
                    PanelIntent::RequestStarted {
                        operation: operation.clone(),
                    },
                );
                true
            }
        });
        outcome
    }

    fn reject(&self, err: PanelError) -> PanelError {
        tracing::debug!(error = %err, "Request rejected");
        self.dispatch(PanelIntent::RequestRejected {
            message: err.user_message(),
        });
        err
    }

    fn dispatch(&self, intent: PanelIntent) {
        mvi::dispatch::<PanelReducer>(&self.state, intent);
    }
}
