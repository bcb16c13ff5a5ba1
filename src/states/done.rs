use crate::events::Event;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::states::AgentState;
use crate::tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

/// Terminal state: the last assistant message is the run's answer.
pub struct DoneState;

#[async_trait]
impl AgentState for DoneState {
    fn name(&self) -> &'static str { "Done" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        _tools: &Arc<ToolRegistry>,
        _llm:   &dyn LlmClient,
    ) -> Event {
        let preview: String = memory.final_answer()
            .unwrap_or("[no answer]")
            .chars()
            .take(100)
            .collect();
        memory.log("Done", "RUN_COMPLETE", &preview);
        Event::halt()  // Never consumed — the engine exits on terminal states
    }
}
