//! Recording command executor for tests.

use super::invoker::{CommandExecutor, ProcessSpec, StageResult};
use crate::error::{Result, YomiageError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock command executor for testing.
///
/// Records all command executions and returns configured responses in order.
/// Once the queue is empty every call succeeds with empty captured output
/// (or a streamed success for uncaptured specs).
#[derive(Debug, Default)]
pub struct MockCommandExecutor {
    calls: Mutex<Vec<ProcessSpec>>,
    responses: Mutex<VecDeque<Result<String>>>,
}

impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successful response to the queue.
    pub fn with_response(self, response: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    /// Add an error response to the queue.
    pub fn with_error(self, error: YomiageError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Add a non-zero exit for `command` to the queue.
    pub fn with_exit(self, command: &str, code: i32) -> Self {
        self.with_error(YomiageError::Exit {
            command: command.to_string(),
            code,
        })
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<ProcessSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Get a specific call by index.
    pub fn call(&self, index: usize) -> Option<ProcessSpec> {
        self.calls.lock().unwrap().get(index).cloned()
    }
}

#[async_trait]
impl CommandExecutor for MockCommandExecutor {
    async fn execute(&self, spec: &ProcessSpec) -> Result<StageResult> {
        self.calls.lock().unwrap().push(spec.clone());

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))?;

        if spec.capture_stdout {
            Ok(StageResult::captured(response))
        } else {
            Ok(StageResult::streamed())
        }
    }
}
