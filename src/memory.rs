use crate::trace::{Trace, TraceEntry};
use crate::types::{AgentConfig, Message};
use chrono::Utc;

/// Per-run conversation state.
///
/// Owns the ordered message history threaded through every step of a
/// single run. The history is append-only: steps may `push` new
/// messages but never rewrite or drop earlier ones. A fresh memory is
/// built at run start and discarded at run end — there is no cross-run
/// lifecycle and no persistence.
#[derive(Debug)]
pub struct AgentMemory {
    messages: Vec<Message>,

    /// Number of reasoning steps taken so far in this run.
    pub step: usize,

    /// Config snapshot for this run.
    pub config: AgentConfig,

    /// Set when the run hits an unrecoverable error (LLM failure,
    /// iteration limit). Tool failures never land here — they are
    /// surfaced as tool-result messages instead.
    pub error: Option<String>,

    /// Event log for this run — every state handler records here.
    pub trace: Trace,
}

impl AgentMemory {
    /// Seed a fresh memory with the user's initial message.
    pub fn new(question: impl Into<String>, config: AgentConfig) -> Self {
        Self {
            messages: vec![Message::human(question)],
            step:     0,
            config,
            error:    None,
            trace:    Trace::new(),
        }
    }

    /// Append one message to the history. The only mutation the
    /// message list supports.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The run's answer: the content of the last assistant message,
    /// if the history ends with one.
    pub fn final_answer(&self) -> Option<&str> {
        match self.messages.last() {
            Some(Message::Assistant { content, .. }) => Some(content.as_str()),
            _ => None,
        }
    }

    /// Consume the run's memory into its message history and trace.
    /// Called once by the engine when a run terminates.
    pub fn into_parts(self) -> (Vec<Message>, Trace) {
        (self.messages, self.trace)
    }

    /// Records an event into the trace log. Called by all state handlers.
    pub fn log(&mut self, state: &str, event: &str, data: &str) {
        tracing::debug!(state, event, data, step = self.step, "agent trace");
        self.trace.record(TraceEntry {
            step:      self.step,
            state:     state.to_string(),
            event:     event.to_string(),
            data:      data.to_string(),
            timestamp: Utc::now(),
        });
    }
}
