use crate::events::Event;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::states::AgentState;
use crate::tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

/// Terminal state for unrecoverable failures (LLM errors, iteration
/// limit). Tool failures never land here — they stay in the loop as
/// tool-result messages.
pub struct ErrorState;

#[async_trait]
impl AgentState for ErrorState {
    fn name(&self) -> &'static str { "Error" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        _tools: &Arc<ToolRegistry>,
        _llm:   &dyn LlmClient,
    ) -> Event {
        let error_msg = memory.error.clone()
            .unwrap_or_else(|| "Unknown error".to_string());
        memory.log("Error", "RUN_FAILED", &error_msg);
        Event::halt()  // Never consumed — the engine exits on terminal states
    }
}
