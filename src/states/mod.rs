use crate::events::Event;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

mod reasoning;
mod acting;
mod done;
mod error;

pub use reasoning::ReasoningState;
pub use acting::ActingState;
pub use done::DoneState;
pub use error::ErrorState;

/// The contract every state must fulfill.
///
/// # Implementing a State
///
/// 1. `handle()` performs the state's work using only `memory`, `tools`, and `llm`.
/// 2. `handle()` MUST return an Event — never panic, never return nothing.
/// 3. If work fails non-fatally (a tool error), append the error text as
///    a tool-result message and carry on. Failure is data, not an abort.
/// 4. Only set `memory.error` and return an error Event for situations
///    the loop cannot recover from (LLM failure, iteration limit).
/// 5. Always call `memory.log()` at least once per handle() call.
#[async_trait]
pub trait AgentState: Send + Sync {
    /// Returns the unique string name of this state.
    /// Must match the key used in the engine's handler map.
    fn name(&self) -> &'static str;

    /// Execute this state's logic. Returns the Event that drives
    /// the next transition lookup in the transition table.
    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &Arc<ToolRegistry>,
        llm:    &dyn LlmClient,
    ) -> Event;
}
