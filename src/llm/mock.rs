use std::sync::Mutex;

use async_trait::async_trait;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::types::Message;

/// Test double that replays scripted assistant messages in order.
/// Running past the end of the script returns an Err, which the loop
/// treats as a fatal model-service failure.
pub struct MockLlmClient {
    responses: Mutex<Vec<Message>>,
    call_log:  Mutex<Vec<(String, usize)>>,  // (model, history length at call time)
}

impl MockLlmClient {
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_log:  Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of times complete() was invoked.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Returns the history length the Nth call saw (0-indexed).
    pub fn history_len_for_call(&self, n: usize) -> Option<usize> {
        self.call_log.lock().unwrap().get(n).map(|(_, len)| *len)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        memory: &AgentMemory,
        _tools: &ToolRegistry,
    ) -> Result<Message, String> {
        self.call_log.lock().unwrap()
            .push((memory.config.model.clone(), memory.messages().len()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err("MockLlmClient: no more scripted responses".to_string());
        }
        Ok(responses.remove(0))
    }
}
