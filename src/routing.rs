use crate::memory::AgentMemory;

/// The two possible outcomes of the routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The latest assistant message requests tool calls — keep looping.
    Continue,
    /// The latest message is a final answer — terminate the run.
    Stop,
}

/// Decide whether the loop continues into the acting step or stops.
///
/// Pure and deterministic: inspects only the most recent message, never
/// executes a tool, never mutates state. `Continue` iff that message is
/// an assistant turn carrying one or more tool-call requests; `Stop`
/// otherwise. An empty history routes to `Stop` as a defensive default.
pub fn route(memory: &AgentMemory) -> Route {
    match memory.last_message() {
        Some(msg) if !msg.tool_calls().is_empty() => Route::Continue,
        _ => Route::Stop,
    }
}
