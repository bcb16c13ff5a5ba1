use std::collections::HashMap;
use serde_json::Value;

mod calculator;
mod search;

pub use calculator::register_calculator;
pub use search::register_search_web;

/// A tool function: takes JSON args, returns result text or error text.
/// Box<dyn Fn> — heap-allocated, Send + Sync for thread safety.
pub type ToolFn = Box<dyn Fn(&HashMap<String, Value>) -> Result<String, String> + Send + Sync>;

/// Tool schema for sending to the LLM (name/description/argument schema).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolSchema {
    pub name:         String,
    pub description:  String,
    pub input_schema: Value,   // JSON Schema object
}

struct ToolEntry {
    schema: ToolSchema,
    func:   ToolFn,
}

/// Registry mapping tool name to a capability: description, argument
/// schema, and an executable. New tools are added by registering more
/// entries; no dynamic loading.
pub struct ToolRegistry {
    tools: HashMap<String, ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// A registry pre-loaded with the built-in `search_web` and
    /// `calculator` tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        register_search_web(&mut registry);
        register_calculator(&mut registry);
        registry
    }

    /// Register a tool with its schema and implementation.
    ///
    /// # Arguments
    /// * `name`        - Unique tool name (must match schema name)
    /// * `description` - What this tool does and when the model should pick it
    /// * `schema`      - JSON Schema for the input parameters
    /// * `func`        - The actual implementation
    pub fn register(
        &mut self,
        name:        impl Into<String>,
        description: impl Into<String>,
        schema:      Value,
        func:        ToolFn,
    ) {
        let name = name.into();
        self.tools.insert(name.clone(), ToolEntry {
            schema: ToolSchema {
                name:         name.clone(),
                description:  description.into(),
                input_schema: schema,
            },
            func,
        });
    }

    /// Execute a named tool with given arguments.
    /// Returns Ok(result_text) or Err(error_text) — including for an
    /// unknown tool name. Never panics.
    pub fn execute(&self, name: &str, args: &HashMap<String, Value>) -> Result<String, String> {
        match self.tools.get(name) {
            Some(entry) => (entry.func)(args),
            None        => Err(format!("Unknown tool '{}': not found in registry", name)),
        }
    }

    /// Returns true if a tool with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns all tool schemas — used to build the tools array for LLM calls.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|e| e.schema.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn execute_unknown_tool_returns_err() {
        let registry = ToolRegistry::new();
        let result = registry.execute("time_machine", &HashMap::new());
        assert!(result.is_err(), "unknown tool must be an Err, not a panic");
        assert!(result.unwrap_err().contains("Unknown tool"));
    }

    #[test]
    fn builtin_registry_has_both_tools() {
        let registry = ToolRegistry::builtin();
        assert!(registry.has("search_web"));
        assert!(registry.has("calculator"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn schemas_expose_registered_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(
            "echo",
            "Echo the input back",
            json!({ "type": "object", "properties": { "text": { "type": "string" } } }),
            Box::new(|args| {
                Ok(args.get("text").and_then(|v| v.as_str()).unwrap_or("").to_string())
            }),
        );

        let schemas = registry.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name, "echo");
        assert_eq!(schemas[0].description, "Echo the input back");
    }
}
