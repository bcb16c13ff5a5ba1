use serde::{Deserialize, Serialize};

/// A named event emitted by a state handler to drive transitions.
///
/// Events are identified by their string name. The library ships with
/// well-known constants for all built-in events, but users can define
/// custom events for their own state graphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event(pub String);

impl Event {
    /// Create a new event with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string name of this event.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // ── Well-known built-in event constructors ──────────────────────────

    // Reasoning outcomes
    pub fn tool_calls()      -> Self { Self::new("ToolCalls") }
    pub fn final_answer()    -> Self { Self::new("FinalAnswer") }
    pub fn iteration_limit() -> Self { Self::new("IterationLimit") }
    pub fn llm_error()       -> Self { Self::new("LlmError") }

    // Engine-defect escape hatch — a handler entered with impossible state
    pub fn fatal_error()     -> Self { Self::new("FatalError") }

    // Acting outcomes
    pub fn tools_executed()  -> Self { Self::new("ToolsExecuted") }

    // Terminal-state placeholder — never consumed by the engine
    pub fn halt()            -> Self { Self::new("Halt") }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
