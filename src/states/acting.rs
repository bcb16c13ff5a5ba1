use crate::events::Event;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::states::AgentState;
use crate::tools::ToolRegistry;
use crate::types::Message;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Executes every tool call requested by the latest assistant message
/// and appends one tool-result message per request, in request order,
/// each carrying the correlation id of the request it answers.
///
/// Tool failures — bad arguments, unknown tool name, domain errors —
/// become error text in the result message so the model can react;
/// they never abort the run.
pub struct ActingState;

#[async_trait]
impl AgentState for ActingState {
    fn name(&self) -> &'static str { "Acting" }

    async fn handle(
        &self,
        memory: &mut AgentMemory,
        tools:  &Arc<ToolRegistry>,
        _llm:   &dyn LlmClient,
    ) -> Event {
        let requests = match memory.last_message() {
            Some(msg) if !msg.tool_calls().is_empty() => msg.tool_calls().to_vec(),
            _ => {
                memory.error = Some("Acting entered with no pending tool calls".to_string());
                memory.log("Acting", "FATAL_ERROR", "no pending tool calls");
                return Event::fatal_error();
            }
        };

        memory.log("Acting", "TOOLS_START", &format!("count={}", requests.len()));

        // Tools share no mutable state, so the calls may run
        // concurrently; join_all preserves input order, which keeps the
        // appended results aligned with their requests.
        let tasks: Vec<_> = requests.iter().map(|call| {
            let registry = Arc::clone(tools);
            let call = call.clone();
            tokio::task::spawn_blocking(move || registry.execute(&call.name, &call.args))
        }).collect();

        for (call, joined) in requests.iter().zip(join_all(tasks).await) {
            // A panicking tool still gets a result message — every
            // request must be answered, and the run must not die.
            let outcome = joined.unwrap_or_else(|e| {
                Err(format!("tool '{}' execution panicked: {}", call.name, e))
            });

            let (content, success) = match outcome {
                Ok(text) => (text, true),
                Err(err) => (format!("Error: {}", err), false),
            };

            memory.log("Acting", if success { "TOOL_SUCCESS" } else { "TOOL_FAILURE" }, &format!(
                "tool='{}' id={} result='{}'",
                call.name,
                call.id,
                content.chars().take(80).collect::<String>()
            ));
            memory.push(Message::tool_result(call.id.clone(), content));
        }

        Event::tools_executed()
    }
}
