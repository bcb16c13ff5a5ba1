use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::types::Message;
use async_trait::async_trait;
use std::sync::Arc;

/// Opt-in wrapper around any `LlmClient` that retries transient
/// failures with exponential back-off. The core loop never retries on
/// its own; install this wrapper to add a retry policy at the caller's
/// boundary. Authentication failures are never retried.
pub struct RetryingClient {
    inner:       Arc<dyn LlmClient>,
    max_retries: u32,
}

impl RetryingClient {
    pub fn new(inner: Arc<dyn LlmClient>, max_retries: u32) -> Self {
        Self { inner, max_retries }
    }

    fn is_auth_error(err: &str) -> bool {
        let lower = err.to_lowercase();
        lower.contains("401")
            || lower.contains("403")
            || lower.contains("authentication")
            || lower.contains("unauthorized")
            || lower.contains("forbidden")
            || lower.contains("invalid api key")
    }
}

#[async_trait]
impl LlmClient for RetryingClient {
    async fn complete(
        &self,
        memory: &AgentMemory,
        tools:  &ToolRegistry,
    ) -> Result<Message, String> {
        let mut last_err = String::new();

        for attempt in 0..=self.max_retries {
            match self.inner.complete(memory, tools).await {
                Ok(message) => return Ok(message),
                Err(e) if Self::is_auth_error(&e) => {
                    tracing::error!(error = %e, "LLM auth error — not retrying");
                    return Err(e);
                }
                Err(e) => {
                    last_err = e;
                    if attempt < self.max_retries {
                        let wait_secs = std::cmp::min(1u64 << attempt, 30);
                        tracing::warn!(
                            attempt = attempt + 1,
                            max     = self.max_retries,
                            wait_s  = wait_secs,
                            error   = %last_err,
                            "LLM transient error — retrying"
                        );
                        tokio::time::sleep(std::time::Duration::from_secs(wait_secs)).await;
                    }
                }
            }
        }

        Err(format!(
            "LLM failed after {} retries — last error: {}",
            self.max_retries, last_err
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use crate::types::AgentConfig;

    #[test]
    fn auth_errors_are_recognized() {
        assert!(RetryingClient::is_auth_error("Gemini API error 401 Unauthorized: bad key"));
        assert!(!RetryingClient::is_auth_error("Network error: connection reset"));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_are_retried_until_exhausted() {
        let inner = Arc::new(MockLlmClient::new(vec![]));
        let retrying = RetryingClient::new(inner.clone(), 2);

        let memory = AgentMemory::new("q", AgentConfig::default());
        let tools  = ToolRegistry::new();

        let err = retrying.complete(&memory, &tools).await.unwrap_err();
        assert!(err.contains("after 2 retries"), "got: {}", err);
        assert_eq!(inner.call_count(), 3, "initial attempt plus two retries");
    }
}
