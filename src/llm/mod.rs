use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::types::Message;
use async_trait::async_trait;
use std::sync::Arc;

mod gemini;
mod mock;
mod retry;

pub use gemini::GeminiClient;
pub use mock::MockLlmClient;
pub use retry::RetryingClient;

/// The single interface between the loop and any LLM provider.
///
/// # Contract
/// - Must be Send + Sync (used behind Box<dyn LlmClient>)
/// - Input is the full ordered message history plus the tool catalog's
///   name/description/schema triples; the model and system prompt come
///   from `memory.config`
/// - Returns Ok with exactly one `Message::Assistant` carrying text,
///   tool-call requests, or both — never neither
/// - Returns Err(String) ONLY for unrecoverable failures (network,
///   authentication, unparseable response); such a failure is fatal to
///   the run — the core performs no retries (wrap with
///   [`RetryingClient`] to add a retry policy)
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        memory: &AgentMemory,
        tools:  &ToolRegistry,
    ) -> Result<Message, String>;
}

// Lets callers keep a handle on a shared client (tests inspect the
// mock's call log after handing the agent an Arc of it).
#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(
        &self,
        memory: &AgentMemory,
        tools:  &ToolRegistry,
    ) -> Result<Message, String> {
        (**self).complete(memory, tools).await
    }
}
