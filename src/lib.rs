pub mod types;
pub mod memory;
pub mod routing;
pub mod events;
pub mod transitions;
pub mod tools;
pub mod engine;
pub mod trace;
pub mod error;
pub mod builder;
pub mod states;
pub mod llm;

// Convenience re-exports at crate root
pub use builder::AgentBuilder;
pub use engine::{AgentEngine, RunReport};
pub use memory::AgentMemory;
pub use types::{AgentConfig, Message, State, ToolCall};
pub use events::Event;
pub use routing::{route, Route};
pub use tools::{ToolFn, ToolRegistry, ToolSchema};
pub use llm::{GeminiClient, LlmClient, MockLlmClient, RetryingClient};
pub use trace::{Trace, TraceEntry};
pub use error::AgentError;
