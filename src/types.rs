use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named state in the agent's ReAct state machine.
///
/// States are identified by their string name. The library ships with
/// four well-known constants (`State::reasoning()`, `State::acting()`,
/// `State::done()`, `State::error()`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(pub String);

impl State {
    /// Create a new state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string name of this state.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is one of the terminal states
    /// (`"Done"` or `"Error"`).
    pub fn is_terminal(&self) -> bool {
        self.0 == "Done" || self.0 == "Error"
    }

    // ── Well-known built-in state constructors ──────────────────────────
    pub fn reasoning() -> Self { Self::new("Reasoning") }
    pub fn acting()    -> Self { Self::new("Acting") }
    pub fn done()      -> Self { Self::new("Done") }
    pub fn error()     -> Self { Self::new("Error") }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tool invocation requested by the LLM.
///
/// `id` is the correlation identifier that ties the eventual
/// tool-result message back to this request. Providers that do not
/// supply ids (Gemini) synthesize one at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub args: HashMap<String, serde_json::Value>,
    pub id:   String,
}

/// A single turn in the conversation.
///
/// An assistant turn may carry text, tool-call requests, or both —
/// but never neither. A tool-result turn answers exactly one request,
/// identified by `tool_call_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    Human {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    ToolResult {
        tool_call_id: String,
        content:      String,
    },
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human { content: content.into() }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant { content: content.into(), tool_calls }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            content:      content.into(),
        }
    }

    /// The tool-call requests carried by this message. Empty for
    /// non-assistant turns and for plain final answers.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Human { content }
            | Self::Assistant { content, .. }
            | Self::ToolResult { content, .. } => content,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Self::Human { .. }      => "human",
            Self::Assistant { .. }  => "assistant",
            Self::ToolResult { .. } => "tool_result",
        }
    }
}

/// Configuration for a single agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model name passed to the LLM client on every reasoning step.
    pub model: String,

    /// System prompt prepended to every LLM call. Empty = none.
    pub system_prompt: String,

    /// Optional cap on reasoning steps per run. `None` means unbounded,
    /// which matches the observed ReAct behavior; integrators who want a
    /// safety margin should set a limit.
    pub max_iterations: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model:          "gemini-1.5-flash".to_string(),
            system_prompt:  String::new(),
            max_iterations: None,
        }
    }
}
