use std::io::Write;

use anyhow::Context;
use reagent::llm::GeminiClient;
use reagent::{AgentBuilder, ToolRegistry};

/// Query comes from the program arguments, or from an interactive
/// prompt when none are given.
fn read_query() -> anyhow::Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    print!("Query: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let query = line.trim().to_string();
    anyhow::ensure!(!query.is_empty(), "no query given");
    Ok(query)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up GOOGLE_API_KEY from a .env file if present.
    let _ = dotenvy::dotenv();

    // Structured logging — set RUST_LOG=debug|info|warn
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let query = read_query()?;

    // Missing credential is a fatal configuration error, reported
    // before any loop step runs.
    let llm = GeminiClient::from_env()
        .context("configuration error")?;

    let engine = AgentBuilder::new()
        .llm(Box::new(llm))
        .tools(ToolRegistry::builtin())
        .build()
        .context("failed to build agent")?;

    let report = engine.run(query).await
        .context("agent run failed")?;

    println!("{}", report.answer);
    Ok(())
}
