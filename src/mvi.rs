//! Model-View-Intent primitives for the panel.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ watch channel ──→ View
//!    ↑                                                │
//!    └────────────────────────────────────────────────┘
//! ```
//!
//! State lives in a `tokio::sync::watch` channel: the sender is the single
//! owner, views hold receivers or take snapshots.

use tokio::sync::watch;

/// Panel state. Cloned out as snapshots, compared to skip no-op updates.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// A user action (operation picked, accept pressed) or a system event
/// (poll tick, service answer).
pub trait Intent: Send + 'static {}

/// Pure state transition: (State, Intent) -> State.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Reduce `intent` into the channel's state.
///
/// Receivers are only woken when the state actually changed. Returns
/// whether it did.
pub fn dispatch<R: Reducer>(state: &watch::Sender<R::State>, intent: R::Intent) -> bool {
    state.send_if_modified(|current| {
        let next = R::reduce(current.clone(), intent);
        if next == *current {
            false
        } else {
            *current = next;
            true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u32);
    impl UiState for Counter {}

    enum Step {
        Add(u32),
        Keep,
    }
    impl Intent for Step {}

    struct CounterReducer;
    impl Reducer for CounterReducer {
        type State = Counter;
        type Intent = Step;

        fn reduce(state: Counter, intent: Step) -> Counter {
            match intent {
                Step::Add(n) => Counter(state.0 + n),
                Step::Keep => state,
            }
        }
    }

    #[test]
    fn dispatch_publishes_changes() {
        let (tx, rx) = watch::channel(Counter::default());
        assert!(dispatch::<CounterReducer>(&tx, Step::Add(2)));
        assert_eq!(*rx.borrow(), Counter(2));
    }

    #[test]
    fn unchanged_state_does_not_wake_receivers() {
        let (tx, rx) = watch::channel(Counter::default());
        assert!(!dispatch::<CounterReducer>(&tx, Step::Keep));
        assert!(!rx.has_changed().unwrap());
    }
}
