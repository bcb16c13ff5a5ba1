use thiserror::Error;
use crate::events::Event;
use crate::types::State;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Build error: {0}")]
    Build(String),

    #[error("LLM call failed: {0}")]
    Llm(String),

    #[error("Iteration limit of {0} reasoning steps reached")]
    IterationLimit(usize),

    #[error("Agent failed: {0}")]
    AgentFailed(String),

    #[error("Invalid transition: {from} + {event} not in transition table")]
    InvalidTransition { from: State, event: Event },

    #[error("No handler registered for state: {0}")]
    NoHandlerForState(String),
}
