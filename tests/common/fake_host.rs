//! In-memory host document.

use async_trait::async_trait;
use parking_lot::Mutex;

use hammock::host::{HostError, SelectionSink, SelectionSource};

/// Host whose selection is set by the test, with switchable failures.
#[derive(Default)]
pub struct FakeHost {
    selection: Mutex<Option<String>>,
    writes: Mutex<Vec<String>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
    reads: Mutex<usize>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(text: &str) -> Self {
        let host = Self::default();
        host.select(text);
        host
    }

    pub fn select(&self, text: &str) {
        *self.selection.lock() = Some(text.to_string());
    }

    pub fn clear_selection(&self) {
        *self.selection.lock() = None;
    }

    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock() = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    pub fn read_count(&self) -> usize {
        *self.reads.lock()
    }
}

#[async_trait]
impl SelectionSource for FakeHost {
    async fn read_selection(&self) -> Result<Option<String>, HostError> {
        *self.reads.lock() += 1;
        if *self.fail_reads.lock() {
            return Err(HostError::Read("document busy".to_string()));
        }
        Ok(self.selection.lock().clone())
    }
}

#[async_trait]
impl SelectionSink for FakeHost {
    async fn write_selection(&self, text: &str) -> Result<(), HostError> {
        if *self.fail_writes.lock() {
            return Err(HostError::Write("document is read-only".to_string()));
        }
        self.writes.lock().push(text.to_string());
        *self.selection.lock() = Some(text.to_string());
        Ok(())
    }
}
