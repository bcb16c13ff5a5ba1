use serde_json::json;
use super::ToolRegistry;

// Canned corpus keyed by lowercase substring match. Deterministic by
// construction — no network access.
const CANNED_RESULTS: &[(&str, &str)] = &[
    (
        "react",
        "ReAct (Reasoning and Acting) is an agent pattern that interleaves \
         model-driven reasoning with tool invocations until the model stops \
         requesting tools.",
    ),
    (
        "rust",
        "Rust is a systems programming language focused on safety, speed and \
         concurrency, without a garbage collector.",
    ),
    (
        "tokio",
        "Tokio is an asynchronous runtime for Rust providing an event loop, \
         timers and non-blocking network primitives.",
    ),
];

/// Register the `search_web` tool: a deterministic mock search over a
/// small canned corpus. An empty query returns a defined "no results"
/// text rather than failing.
pub fn register_search_web(registry: &mut ToolRegistry) {
    registry.register(
        "search_web",
        "Search the web for information. Use for factual queries. \
         Input is a free-text query string.",
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to look up"
                }
            },
            "required": ["query"]
        }),
        Box::new(|args| {
            let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
            Ok(search(query))
        }),
    );
}

fn search(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return "No results: the search query was empty.".to_string();
    }

    let lowered = query.to_lowercase();
    for (keyword, result) in CANNED_RESULTS {
        if lowered.contains(keyword) {
            return format!("Search results for '{}': {}", query, result);
        }
    }

    format!(
        "Search results for '{}': no specific results found. \
         This is a mock search tool with a fixed corpus.",
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use serde_json::json;

    fn run(query: &str) -> String {
        let registry = ToolRegistry::builtin();
        let args = HashMap::from([("query".to_string(), json!(query))]);
        registry.execute("search_web", &args).expect("search_web never fails")
    }

    #[test]
    fn empty_query_returns_defined_no_results_text() {
        let out = run("");
        assert!(out.contains("No results"), "got: {}", out);
    }

    #[test]
    fn whitespace_query_is_treated_as_empty() {
        assert!(run("   ").contains("No results"));
    }

    #[test]
    fn keyword_hit_returns_canned_summary() {
        let out = run("what is the ReAct agent pattern?");
        assert!(out.contains("Reasoning and Acting"), "got: {}", out);
    }

    #[test]
    fn miss_returns_generic_fallback() {
        let out = run("population of Lisbon");
        assert!(out.contains("no specific results found"), "got: {}", out);
    }

    #[test]
    fn missing_query_argument_behaves_like_empty() {
        let registry = ToolRegistry::builtin();
        let out = registry.execute("search_web", &HashMap::new()).unwrap();
        assert!(out.contains("No results"));
    }
}
