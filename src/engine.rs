use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;
use crate::events::Event;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::states::AgentState;
use crate::tools::ToolRegistry;
use crate::trace::Trace;
use crate::transitions::TransitionTable;
use crate::types::{AgentConfig, Message, State};

/// Outcome of a completed run: the final answer plus the full message
/// history and trace for inspection. The conversation state does not
/// outlive the report — nothing is persisted across runs.
#[derive(Debug)]
pub struct RunReport {
    pub answer:          String,
    pub messages:        Vec<Message>,
    pub trace:           Trace,
    pub reasoning_steps: usize,
}

/// Drives the ReAct state machine: reasoning, then routing, then
/// acting, strictly sequential, until a terminal state is reached.
pub struct AgentEngine {
    tools:       Arc<ToolRegistry>,
    llm:         Box<dyn LlmClient>,
    config:      AgentConfig,
    transitions: TransitionTable,
    handlers:    HashMap<&'static str, Box<dyn AgentState>>,
}

impl AgentEngine {
    /// Creates a new engine. Prefer using AgentBuilder for ergonomic construction.
    pub fn new(
        tools:       Arc<ToolRegistry>,
        llm:         Box<dyn LlmClient>,
        config:      AgentConfig,
        transitions: TransitionTable,
        handlers:    HashMap<&'static str, Box<dyn AgentState>>,
    ) -> Self {
        Self { tools, llm, config, transitions, handlers }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run one question to completion.
    ///
    /// Seeds a fresh conversation state with the user's message and
    /// loops `Reasoning → {Acting → Reasoning}* → Done` until the model
    /// stops requesting tools. Each run owns its state exclusively;
    /// the engine itself is immutable here and can serve many runs.
    pub async fn run(&self, question: impl Into<String>) -> Result<RunReport, AgentError> {
        let mut memory = AgentMemory::new(question, self.config.clone());
        let mut state = State::reasoning();
        let mut last_event = Event::halt();

        loop {
            let event = self.dispatch(&state, &mut memory).await?;

            let key = (state.clone(), event.clone());
            let next = self.transitions.get(&key)
                .cloned()
                .ok_or_else(|| AgentError::InvalidTransition {
                    from:  state.clone(),
                    event: event.clone(),
                })?;

            tracing::info!(from = %state, event = %event, to = %next, "transition");
            last_event = event;
            state = next;

            if state.is_terminal() {
                // Terminal handlers only log; their event is discarded.
                self.dispatch(&state, &mut memory).await?;
                break;
            }
        }

        if state == State::done() {
            let answer = memory.final_answer()
                .map(str::to_string)
                .ok_or_else(|| AgentError::AgentFailed(
                    "Run finished without a final assistant message".to_string()
                ))?;
            let reasoning_steps = memory.step;
            let (messages, trace) = memory.into_parts();
            Ok(RunReport { answer, messages, trace, reasoning_steps })
        } else {
            let message = memory.error
                .unwrap_or_else(|| "Unknown error".to_string());
            if last_event == Event::iteration_limit() {
                Err(AgentError::IterationLimit(self.config.max_iterations.unwrap_or(0)))
            } else if last_event == Event::llm_error() {
                Err(AgentError::Llm(message))
            } else {
                Err(AgentError::AgentFailed(message))
            }
        }
    }

    async fn dispatch(&self, state: &State, memory: &mut AgentMemory) -> Result<Event, AgentError> {
        tracing::debug!(state = %state, step = memory.step, "agent step");
        let handler = self.handlers.get(state.as_str())
            .ok_or_else(|| AgentError::NoHandlerForState(state.as_str().to_string()))?;
        Ok(handler.handle(memory, &self.tools, self.llm.as_ref()).await)
    }
}
