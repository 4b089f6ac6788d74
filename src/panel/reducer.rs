//! Reducer for the transformation panel.

use crate::mvi::Reducer;

use super::intent::PanelIntent;
use super::state::PanelState;

pub struct PanelReducer;

impl Reducer for PanelReducer {
    type State = PanelState;
    type Intent = PanelIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PanelIntent::SelectionObserved { text } => PanelState {
                selection: text,
                ..state
            },

            PanelIntent::RequestStarted { operation } => PanelState {
                busy: true,
                last_operation: Some(operation),
                error: None,
                ..state
            },

            // A late answer for a request that was already failed or
            // cancelled is dropped.
            PanelIntent::TransformSucceeded { text } => {
                if !state.busy {
                    return state;
                }
                PanelState {
                    transformation: text,
                    busy: false,
                    error: None,
                    ..state
                }
            }

            PanelIntent::TransformFailed { message } => {
                if !state.busy {
                    return state;
                }
                PanelState {
                    busy: false,
                    error: Some(message),
                    ..state
                }
            }

            PanelIntent::RequestRejected { message } | PanelIntent::AcceptFailed { message } => {
                PanelState {
                    error: Some(message),
                    ..state
                }
            }

            PanelIntent::Accepted => PanelState {
                selection: String::new(),
                transformation: String::new(),
                error: None,
                ..state
            },

            PanelIntent::Discarded => PanelState {
                transformation: String::new(),
                error: None,
                ..state
            },

            PanelIntent::ErrorDismissed => PanelState {
                error: None,
                ..state
            },
        }
    }
}
