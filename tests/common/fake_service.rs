//! Scripted text-generation service.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;

use hammock::transform::{TransformError, TransformService};

/// Records every (instruction, text) pair and answers from a queue.
///
/// When gated, each call waits for `release()` before answering, which
/// lets a test observe the panel while a request is outstanding.
pub struct FakeService {
    calls: Mutex<Vec<(String, String)>>,
    answers: Mutex<VecDeque<Result<String, TransformError>>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            answers: Mutex::new(VecDeque::new()),
            gate: None,
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    pub fn answer(self, text: &str) -> Self {
        self.answers.lock().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, error: TransformError) -> Self {
        self.answers.lock().push_back(Err(error));
        self
    }

    pub fn push_answer(&self, text: &str) {
        self.answers.lock().push_back(Ok(text.to_string()));
    }

    /// Let one gated call answer.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TransformService for FakeService {
    async fn complete(&self, instruction: &str, text: &str) -> Result<String, TransformError> {
        self.calls
            .lock()
            .push((instruction.to_string(), text.to_string()));

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        self.answers
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok("fake completion".to_string()))
    }
}
