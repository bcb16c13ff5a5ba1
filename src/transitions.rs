use std::collections::HashMap;
use crate::events::Event;
use crate::types::State;

pub type TransitionTable = HashMap<(State, Event), State>;

/// Builds the complete transition table for the ReAct cycle.
/// Any (State, Event) pair not in this table is illegal and
/// will cause `AgentEngine::run()` to return `AgentError::InvalidTransition`.
pub fn build_transition_table() -> TransitionTable {
    let mut t = HashMap::new();

    // ── REASONING ────────────────────────────────────────
    t.insert((State::reasoning(), Event::tool_calls()),      State::acting());
    t.insert((State::reasoning(), Event::final_answer()),    State::done());
    t.insert((State::reasoning(), Event::iteration_limit()), State::error());
    t.insert((State::reasoning(), Event::llm_error()),       State::error());

    // ── ACTING ───────────────────────────────────────────
    t.insert((State::acting(),    Event::tools_executed()),  State::reasoning());
    t.insert((State::acting(),    Event::fatal_error()),     State::error());

    // Note: DONE and ERROR are terminal — no outgoing transitions.
    // Engine checks State::is_terminal() and exits before table lookup.

    t
}

/// Validates that a given (state, event) pair is legal.
pub fn is_valid_transition(table: &TransitionTable, state: &State, event: &Event) -> bool {
    table.contains_key(&(state.clone(), event.clone()))
}
