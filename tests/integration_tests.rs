//! Integration tests for reagent-rs.
//!
//! All tests use `MockLlmClient` — no network calls are made.
//! Run with: `cargo test`

use reagent::llm::MockLlmClient;
use reagent::{
    AgentBuilder, AgentEngine, AgentError, Message, ToolCall, ToolRegistry,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Test helpers
// ─────────────────────────────────────────────────────────────────────────────

fn tool_call(name: &str, args: &[(&str, serde_json::Value)], id: &str) -> ToolCall {
    ToolCall {
        name: name.to_string(),
        args: args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        id:   id.to_string(),
    }
}

fn assistant_with_calls(calls: Vec<ToolCall>) -> Message {
    Message::assistant("", calls)
}

fn final_answer(content: &str) -> Message {
    Message::assistant(content, vec![])
}

/// Build an engine around scripted responses, with the built-in
/// search_web and calculator tools registered.
fn make_engine(responses: Vec<Message>) -> AgentEngine {
    AgentBuilder::new()
        .llm(Box::new(MockLlmClient::new(responses)))
        .tools(ToolRegistry::builtin())
        .build()
        .expect("builder should succeed")
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: a direct answer terminates after exactly one reasoning step
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn direct_answer_terminates_after_one_reasoning_step() {
    let engine = make_engine(vec![final_answer("The capital of France is Paris.")]);

    let report = engine.run("What is the capital of France?").await
        .expect("run should complete");

    assert_eq!(report.answer, "The capital of France is Paris.");
    assert_eq!(report.reasoning_steps, 1, "no tool calls means one reasoning step");
    assert_eq!(report.messages.len(), 2, "user message + final assistant message");
    assert!(
        report.trace.for_state("Acting").is_empty(),
        "acting must never run for a direct answer"
    );
    assert!(!report.trace.for_state("Done").is_empty(), "Done state must be traced");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: one calculator round trip — two reasoning steps, one acting step
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn calculator_round_trip() {
    let engine = make_engine(vec![
        assistant_with_calls(vec![tool_call(
            "calculator",
            &[("expression", json!("2 + 3 * 4"))],
            "call-1",
        )]),
        final_answer("2 + 3 * 4 equals 14."),
    ]);

    let report = engine.run("Calculate 2 + 3 * 4").await.expect("run should complete");

    assert_eq!(report.answer, "2 + 3 * 4 equals 14.");
    assert_eq!(report.reasoning_steps, 2);
    // user, assistant+call, tool result, final assistant
    assert_eq!(report.messages.len(), 4);

    match &report.messages[2] {
        Message::ToolResult { tool_call_id, content } => {
            assert_eq!(tool_call_id, "call-1", "correlation id must match the request");
            assert_eq!(content, "14");
        }
        other => panic!("expected a tool result at position 2, got: {:?}", other),
    }

    let acting_starts = report.trace.for_state("Acting").iter()
        .filter(|e| e.event == "TOOLS_START")
        .count();
    assert_eq!(acting_starts, 1, "exactly one acting step");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: N tool-call requests yield exactly N results, in request order
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn n_requests_yield_n_ordered_results() {
    let engine = make_engine(vec![
        assistant_with_calls(vec![
            tool_call("calculator", &[("expression", json!("10 / 4"))], "call-a"),
            tool_call("search_web", &[("query", json!("rust language"))], "call-b"),
            tool_call("calculator", &[("expression", json!("1 / 0"))], "call-c"),
        ]),
        final_answer("All three tools have reported back."),
    ]);

    let report = engine.run("run three tools").await.expect("run should complete");

    // user, assistant with 3 calls, 3 results, final answer
    assert_eq!(report.messages.len(), 6);

    let expected_ids = ["call-a", "call-b", "call-c"];
    for (i, expected_id) in expected_ids.iter().enumerate() {
        match &report.messages[2 + i] {
            Message::ToolResult { tool_call_id, .. } => {
                assert_eq!(tool_call_id, expected_id, "results must follow request order");
            }
            other => panic!("expected tool result at position {}, got: {:?}", 2 + i, other),
        }
    }

    assert_eq!(report.messages[2].content(), "2.5");
    assert!(report.messages[3].content().contains("Rust is a systems programming language"));
    assert!(
        report.messages[4].content().contains("division by zero"),
        "a failing tool call becomes error text, got: {}",
        report.messages[4].content()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: an unknown tool name produces error text and the loop continues
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_tool_is_surfaced_not_fatal() {
    let engine = make_engine(vec![
        assistant_with_calls(vec![tool_call("time_machine", &[], "call-1")]),
        final_answer("That tool does not exist, so I answered from memory."),
    ]);

    let report = engine.run("use the time machine").await
        .expect("an unknown tool must not abort the run");

    match &report.messages[2] {
        Message::ToolResult { tool_call_id, content } => {
            assert_eq!(tool_call_id, "call-1");
            assert!(content.contains("Unknown tool"), "got: {}", content);
        }
        other => panic!("expected tool result, got: {:?}", other),
    }
    assert_eq!(report.reasoning_steps, 2, "the model got to react to the error");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: an assistant turn with both text and tool calls keeps looping
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn text_plus_tool_calls_routes_to_acting() {
    let engine = make_engine(vec![
        Message::assistant(
            "Let me check that.",
            vec![tool_call("search_web", &[("query", json!("tokio runtime"))], "call-1")],
        ),
        final_answer("Tokio is an async runtime for Rust."),
    ]);

    let report = engine.run("what is tokio?").await.expect("run should complete");
    assert_eq!(report.reasoning_steps, 2, "tool calls take priority over text");
    assert!(report.messages[2].content().contains("Tokio"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: the optional iteration limit converts a runaway loop into an error
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn iteration_limit_guard_stops_runaway_loops() {
    let looping_call = || assistant_with_calls(vec![tool_call(
        "search_web",
        &[("query", json!("more"))],
        "call-x",
    )]);

    let engine = AgentBuilder::new()
        .llm(Box::new(MockLlmClient::new(vec![
            looping_call(), looping_call(), looping_call(),
        ])))
        .tools(ToolRegistry::builtin())
        .max_iterations(2)
        .build()
        .expect("builder should succeed");

    let err = engine.run("loop forever").await
        .expect_err("the guard must trip");
    assert!(
        matches!(err, AgentError::IterationLimit(2)),
        "expected IterationLimit(2), got: {:?}", err
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: a model-service failure is fatal and propagated
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn llm_failure_is_fatal() {
    // Empty script: the very first reasoning step fails.
    let engine = make_engine(vec![]);

    let err = engine.run("anything").await.expect_err("LLM failure must propagate");
    assert!(matches!(err, AgentError::Llm(_)), "expected Llm error, got: {:?}", err);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: the builder refuses to build without an LLM client
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn builder_requires_llm() {
    let result = AgentBuilder::new().tools(ToolRegistry::builtin()).build();
    let err = result.err().expect("building without an LLM should fail");
    match err {
        AgentError::Build(msg) => assert!(msg.contains("LLM"), "got: {}", msg),
        other => panic!("expected Build error, got: {:?}", other),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: LLM call count and per-call history growth
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn llm_sees_growing_append_only_history() {
    let mock = Arc::new(MockLlmClient::new(vec![
        assistant_with_calls(vec![tool_call(
            "calculator",
            &[("expression", json!("6 * 7"))],
            "call-1",
        )]),
        final_answer("The answer is 42."),
    ]));

    let engine = AgentBuilder::new()
        .llm(Box::new(Arc::clone(&mock)))
        .tools(ToolRegistry::builtin())
        .build()
        .expect("builder should succeed");

    engine.run("what is 6 * 7?").await.expect("run should complete");

    assert_eq!(mock.call_count(), 2, "one LLM call per reasoning step");
    assert_eq!(mock.history_len_for_call(0), Some(1), "first call sees only the user message");
    assert_eq!(
        mock.history_len_for_call(1), Some(3),
        "second call sees user + assistant + tool result"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: each run gets a fresh conversation — nothing leaks across runs
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn runs_do_not_share_state() {
    let engine = make_engine(vec![
        final_answer("first answer"),
        final_answer("second answer"),
    ]);

    let first = engine.run("first question").await.expect("first run");
    let second = engine.run("second question").await.expect("second run");

    assert_eq!(first.messages.len(), 2);
    assert_eq!(second.messages.len(), 2, "second run must start from scratch");
    assert_eq!(second.messages[0], Message::human("second question"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 11: the trace records every visited state
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn trace_records_all_states() {
    let engine = make_engine(vec![
        assistant_with_calls(vec![tool_call(
            "search_web",
            &[("query", json!("react agent"))],
            "call-1",
        )]),
        final_answer("ReAct interleaves reasoning and acting."),
    ]);

    let report = engine.run("explain react agents").await.expect("run should complete");

    assert!(!report.trace.is_empty());
    assert_eq!(
        report.trace.for_state("Reasoning").iter().filter(|e| e.event == "STEP_START").count(),
        2
    );
    assert!(!report.trace.for_state("Acting").is_empty());
    assert!(!report.trace.for_state("Done").is_empty());
}
