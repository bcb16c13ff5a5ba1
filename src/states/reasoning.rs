use crate::events::Event;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::routing::{route, Route};
use crate::states::AgentState;
use crate::tools::ToolRegistry;
use crate::types::Message;
use async_trait::async_trait;
use std::sync::Arc;

/// Calls the LLM with the full history plus the tool catalog and
/// appends exactly one assistant message. A model-service failure here
/// is fatal to the run; the core performs no retries.
pub struct ReasoningState;

#[async_trait]
impl AgentState for ReasoningState {
    fn name(&self) -> &'static str { "Reasoning" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &Arc<ToolRegistry>,
        llm:    &dyn LlmClient,
    ) -> Event {
        // Optional guard: by default max_iterations is None and the
        // loop is unbounded, matching the observed ReAct behavior.
        if let Some(limit) = memory.config.max_iterations {
            if memory.step >= limit {
                memory.error = Some(format!("Iteration limit of {} reasoning steps reached", limit));
                memory.log("Reasoning", "ITERATION_LIMIT", &format!("limit={}", limit));
                return Event::iteration_limit();
            }
        }

        memory.step += 1;
        memory.log("Reasoning", "STEP_START", &format!(
            "step={} history_len={}", memory.step, memory.messages().len()
        ));

        let response = match llm.complete(memory, tools).await {
            Ok(message) => message,
            Err(err) => {
                memory.error = Some(format!("LLM call failed: {}", err));
                memory.log("Reasoning", "LLM_ERROR", &err);
                return Event::llm_error();
            }
        };

        // The LlmClient contract promises an assistant turn; anything
        // else means the provider adapter is broken.
        if !matches!(response, Message::Assistant { .. }) {
            let msg = format!("LLM returned a non-assistant message: role={}", response.role());
            memory.error = Some(msg.clone());
            memory.log("Reasoning", "LLM_ERROR", &msg);
            return Event::llm_error();
        }

        let requested: Vec<String> = response.tool_calls()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        memory.push(response);

        match route(memory) {
            Route::Continue => {
                memory.log("Reasoning", "TOOL_CALLS", &format!("tools={:?}", requested));
                Event::tool_calls()
            }
            Route::Stop => {
                let preview: String = memory.final_answer()
                    .unwrap_or_default()
                    .chars()
                    .take(100)
                    .collect();
                memory.log("Reasoning", "FINAL_ANSWER", &preview);
                Event::final_answer()
            }
        }
    }
}
