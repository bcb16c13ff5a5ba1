use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::memory::AgentMemory;
use crate::tools::ToolRegistry;
use crate::types::{Message, ToolCall};

// ── Gemini request types ─────────────────────────────────

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDeclarations>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role:  Option<String>,
    parts: Vec<Part>,
}

// Gemini parts are a union; exactly one field is set per part.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    function_response: Option<FunctionResponse>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: serde_json::Value,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
struct FunctionResponse {
    name:     String,
    response: serde_json::Value,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDeclarations {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(serde::Serialize)]
struct FunctionDeclaration {
    name:        String,
    description: String,
    parameters:  serde_json::Value,
}

// ── Gemini response types ────────────────────────────────

#[derive(serde::Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize, Debug)]
struct Candidate {
    content: Content,
}

// ── Client ───────────────────────────────────────────────

/// LLM client for the Gemini `generateContent` REST API.
///
/// Gemini does not tag tool calls with correlation ids, so this client
/// synthesizes a UUID per parsed call and matches ids back to function
/// names when serializing tool results.
pub struct GeminiClient {
    client:   reqwest::Client,
    api_key:  String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client:   reqwest::Client::new(),
            api_key:  api_key.into(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Reads the credential from `GOOGLE_API_KEY`. Absence is a fatal
    /// configuration error, detected before any loop step runs.
    pub fn from_env() -> Result<Self, AgentError> {
        let key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| AgentError::MissingCredential("GOOGLE_API_KEY"))?;
        Ok(Self::new(key))
    }

    /// Custom base URL — for proxies or a local stub server.
    pub fn with_base_url(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn build_tool_declarations(tools: &ToolRegistry) -> Vec<ToolDeclarations> {
        if tools.is_empty() {
            return Vec::new();
        }
        let declarations = tools.schemas().into_iter().map(|s| FunctionDeclaration {
            name:        s.name,
            description: s.description,
            parameters:  s.input_schema,
        }).collect();
        vec![ToolDeclarations { function_declarations: declarations }]
    }

    /// Convert the message history into Gemini `contents`.
    ///
    /// Human turns map to `user`, assistant turns to `model`, and runs
    /// of consecutive tool results collapse into a single `user`
    /// content of `functionResponse` parts, with each correlation id
    /// resolved back to the function name it answered.
    fn build_contents(messages: &[Message]) -> Result<Vec<Content>, String> {
        let mut id_to_name: HashMap<&str, &str> = HashMap::new();
        let mut contents: Vec<Content> = Vec::new();

        for message in messages {
            match message {
                Message::Human { content } => {
                    contents.push(Content {
                        role:  Some("user".to_string()),
                        parts: vec![Part { text: Some(content.clone()), ..Default::default() }],
                    });
                }
                Message::Assistant { content, tool_calls } => {
                    let mut parts = Vec::new();
                    if !content.is_empty() {
                        parts.push(Part { text: Some(content.clone()), ..Default::default() });
                    }
                    for call in tool_calls {
                        id_to_name.insert(call.id.as_str(), call.name.as_str());
                        parts.push(Part {
                            function_call: Some(FunctionCall {
                                name: call.name.clone(),
                                args: serde_json::to_value(&call.args)
                                    .map_err(|e| format!("Failed to serialize tool args: {}", e))?,
                            }),
                            ..Default::default()
                        });
                    }
                    contents.push(Content { role: Some("model".to_string()), parts });
                }
                Message::ToolResult { tool_call_id, content } => {
                    let name = id_to_name.get(tool_call_id.as_str())
                        .ok_or_else(|| format!(
                            "Tool result '{}' has no matching tool call in history", tool_call_id
                        ))?;
                    let part = Part {
                        function_response: Some(FunctionResponse {
                            name:     name.to_string(),
                            response: serde_json::json!({ "result": content }),
                        }),
                        ..Default::default()
                    };
                    // Append to a trailing function-response content if one
                    // exists, so one acting step stays one Gemini turn.
                    match contents.last_mut() {
                        Some(last) if last.parts.iter().all(|p| p.function_response.is_some()) => {
                            last.parts.push(part);
                        }
                        _ => contents.push(Content {
                            role:  Some("user".to_string()),
                            parts: vec![part],
                        }),
                    }
                }
            }
        }

        Ok(contents)
    }

    fn parse_response(response: GenerateContentResponse) -> Result<Message, String> {
        let candidate = response.candidates.into_iter().next()
            .ok_or("Gemini returned no candidates")?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for part in candidate.content.parts {
            if let Some(text) = part.text {
                content.push_str(&text);
            }
            if let Some(call) = part.function_call {
                let args: HashMap<String, serde_json::Value> =
                    serde_json::from_value(call.args)
                        .map_err(|e| format!("Invalid tool args from Gemini: {}", e))?;
                tool_calls.push(ToolCall {
                    name: call.name,
                    args,
                    id:   Uuid::new_v4().to_string(),
                });
            }
        }

        if content.is_empty() && tool_calls.is_empty() {
            return Err("Gemini returned neither text nor tool calls".to_string());
        }

        Ok(Message::assistant(content, tool_calls))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(
        &self,
        memory: &AgentMemory,
        tools:  &ToolRegistry,
    ) -> Result<Message, String> {
        let system_instruction = if memory.config.system_prompt.is_empty() {
            None
        } else {
            Some(Content {
                role:  None,
                parts: vec![Part {
                    text: Some(memory.config.system_prompt.clone()),
                    ..Default::default()
                }],
            })
        };

        let body = GenerateContentRequest {
            system_instruction,
            contents: Self::build_contents(memory.messages())?,
            tools:    Self::build_tool_declarations(tools),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, memory.config.model
        );

        let response = self.client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body   = response.text().await.unwrap_or_default();
            return Err(format!("Gemini API error {}: {}", status, body));
        }

        let parsed: GenerateContentResponse = response.json()
            .await
            .map_err(|e| format!("Failed to parse Gemini response: {}", e))?;

        Self::parse_response(parsed)
    }
}
