use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::AgentEngine;
use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::states::{ActingState, AgentState, DoneState, ErrorState, ReasoningState};
use crate::tools::{ToolFn, ToolRegistry};
use crate::transitions::build_transition_table;
use crate::types::AgentConfig;

/// Ergonomic construction of an [`AgentEngine`].
///
/// ```no_run
/// # use reagent::{AgentBuilder, ToolRegistry};
/// # use reagent::llm::GeminiClient;
/// # fn demo() -> Result<(), reagent::AgentError> {
/// let engine = AgentBuilder::new()
///     .llm(Box::new(GeminiClient::from_env()?))
///     .tools(ToolRegistry::builtin())
///     .max_iterations(10)
///     .build()?;
/// # Ok(()) }
/// ```
pub struct AgentBuilder {
    tools:  ToolRegistry,
    llm:    Option<Box<dyn LlmClient>>,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            tools:  ToolRegistry::new(),
            llm:    None,
            config: AgentConfig::default(),
        }
    }

    pub fn llm(mut self, llm: Box<dyn LlmClient>) -> Self {
        self.llm = Some(llm); self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config; self
    }

    /// Model name passed through to the LLM client on every reasoning step.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into(); self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into(); self
    }

    /// Cap reasoning steps per run. Unset = unbounded (the default).
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.config.max_iterations = Some(n); self
    }

    /// Replace the whole tool registry, e.g. with `ToolRegistry::builtin()`.
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools; self
    }

    /// Register a single tool.
    pub fn tool(
        mut self,
        name:        impl Into<String>,
        description: impl Into<String>,
        schema:      serde_json::Value,
        func:        ToolFn,
    ) -> Self {
        self.tools.register(name, description, schema, func);
        self
    }

    /// Builds the AgentEngine with the default ReAct state handlers.
    pub fn build(self) -> Result<AgentEngine, AgentError> {
        let llm = self.llm
            .ok_or_else(|| AgentError::Build("LLM client is required".to_string()))?;

        let mut handlers: HashMap<&'static str, Box<dyn AgentState>> = HashMap::new();
        handlers.insert("Reasoning", Box::new(ReasoningState));
        handlers.insert("Acting",    Box::new(ActingState));
        handlers.insert("Done",      Box::new(DoneState));
        handlers.insert("Error",     Box::new(ErrorState));

        Ok(AgentEngine::new(
            Arc::new(self.tools),
            llm,
            self.config,
            build_transition_table(),
            handlers,
        ))
    }
}

impl Default for AgentBuilder {
    fn default() -> Self { Self::new() }
}
