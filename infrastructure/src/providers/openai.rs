//! OpenAI-compatible chat completions gateway
//!
//! Speaks the `/chat/completions` wire format, which most hosted and local
//! providers accept. One stateless HTTP request per [`ChatRequest`]; tool
//! calls are carried in both directions.

use async_trait::async_trait;
use roundtable_application::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use roundtable_domain::{
    ContentBlock, LlmResponse, Message, Role, StopReason, ToolDefinition,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::file_config::FileProviderConfig;

/// Gateway for OpenAI-compatible chat completion APIs
pub struct OpenAiCompatGateway {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl OpenAiCompatGateway {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a gateway from the `[provider]` config section, reading the
    /// API key from the configured environment variable.
    ///
    /// `ROUNDTABLE_API_BASE` overrides the configured base URL when set.
    pub fn from_config(provider: &FileProviderConfig) -> Result<Self, GatewayError> {
        let api_key = std::env::var(&provider.api_key_env).map_err(|_| {
            GatewayError::AuthError(format!(
                "environment variable {} is not set",
                provider.api_key_env
            ))
        })?;
        let api_base =
            std::env::var("ROUNDTABLE_API_BASE").unwrap_or_else(|_| provider.api_base.clone());
        Ok(Self::new(api_base, api_key))
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn chat(&self, request: ChatRequest) -> Result<LlmResponse, GatewayError> {
        let url = format!(
            "{}/chat/completions",
            self.api_base.trim_end_matches('/')
        );
        let body = WireRequest {
            model: request.model.as_str(),
            messages: wire_messages(&request.messages),
            tools: wire_tools(&request.tools),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %request.model, messages = request.messages.len(), "chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(match status.as_u16() {
                401 | 403 => GatewayError::AuthError(snippet),
                429 => GatewayError::RateLimited(snippet),
                _ => GatewayError::RequestFailed(format!("HTTP {status}: {snippet}")),
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        parse_response(wire)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

// ==================== Wire types ====================

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object
    arguments: String,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionDef,
}

#[derive(Serialize)]
struct WireFunctionDef {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

// ==================== Conversions ====================

fn wire_messages(messages: &[Message]) -> Vec<WireMessage> {
    messages
        .iter()
        .map(|message| {
            let role = match message.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::Tool => "tool",
            };
            let tool_calls = if message.tool_calls.is_empty() {
                None
            } else {
                Some(
                    message
                        .tool_calls
                        .iter()
                        .map(|call| WireToolCall {
                            id: call
                                .native_id
                                .clone()
                                .unwrap_or_else(|| call.tool_name.clone()),
                            kind: "function".to_string(),
                            function: WireFunctionCall {
                                name: call.tool_name.clone(),
                                arguments: serde_json::to_string(&call.arguments)
                                    .unwrap_or_else(|_| "{}".to_string()),
                            },
                        })
                        .collect(),
                )
            };
            WireMessage {
                role,
                // Assistant tool-call messages may carry empty content
                content: (!message.content.is_empty() || tool_calls.is_none())
                    .then(|| message.content.clone()),
                tool_call_id: message.tool_call_id.clone(),
                tool_calls,
            }
        })
        .collect()
}

fn wire_tools(tools: &[ToolDefinition]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|tool| WireTool {
            kind: "function",
            function: WireFunctionDef {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool_schema(tool),
            },
        })
        .collect()
}

/// Build the JSON Schema object for a tool's parameters.
fn tool_schema(tool: &ToolDefinition) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for param in &tool.parameters {
        let json_type = match param.param_type.as_str() {
            "number" => "number",
            "boolean" => "boolean",
            // "path" and friends travel as plain strings
            _ => "string",
        };
        properties.insert(
            param.name.clone(),
            serde_json::json!({
                "type": json_type,
                "description": param.description,
            }),
        );
        if param.required {
            required.push(serde_json::Value::String(param.name.clone()));
        }
    }

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn parse_response(wire: WireResponse) -> Result<LlmResponse, GatewayError> {
    let choice = wire
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedResponse("response has no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text));
    }
    for call in choice.message.tool_calls.unwrap_or_default() {
        let input: HashMap<String, serde_json::Value> =
            match serde_json::from_str(&call.function.arguments) {
                Ok(input) => input,
                Err(e) => {
                    warn!(tool = %call.function.name, error = %e, "unparsable tool arguments");
                    HashMap::new()
                }
            };
        content.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
    }

    let stop_reason = choice.finish_reason.map(|reason| match reason.as_str() {
        "stop" => StopReason::EndTurn,
        "tool_calls" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        _ => StopReason::Other(reason),
    });

    Ok(LlmResponse {
        content,
        stop_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{RiskLevel, ToolCall, ToolParameter};

    #[test]
    fn test_wire_messages_map_roles_and_tool_ids() {
        let messages = vec![
            Message::system("be brief"),
            Message::user("hello"),
            Message::assistant_with_tool_calls(
                "",
                vec![ToolCall::from_native(
                    "call_9",
                    "read_file",
                    HashMap::new(),
                )],
            ),
            Message::tool("call_9", "file body"),
        ];

        let wire = wire_messages(&messages);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[2].role, "assistant");
        assert!(wire[2].content.is_none());
        assert_eq!(wire[2].tool_calls.as_ref().unwrap()[0].id, "call_9");
        assert_eq!(wire[3].role, "tool");
        assert_eq!(wire[3].tool_call_id.as_deref(), Some("call_9"));
    }

    #[test]
    fn test_tool_schema_shape() {
        let tool = ToolDefinition::new("read_file", "Read a file", RiskLevel::Low)
            .with_parameter(ToolParameter::new("path", "File path", true).with_type("path"))
            .with_parameter(ToolParameter::new("limit", "Line limit", false).with_type("number"));

        let schema = tool_schema(&tool);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["path"]["type"], "string");
        assert_eq!(schema["properties"]["limit"]["type"], "number");
        assert_eq!(schema["required"], serde_json::json!(["path"]));
    }

    #[test]
    fn test_parse_text_response() {
        let wire: WireResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"hello"},"finish_reason":"stop"}]}"#,
        )
        .unwrap();

        let response = parse_response(wire).unwrap();
        assert_eq!(response.text_content(), "hello");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn test_parse_tool_call_response() {
        let wire: WireResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":null,"tool_calls":[
                {"id":"call_1","type":"function",
                 "function":{"name":"read_file","arguments":"{\"path\":\"a.rs\"}"}}
            ]},"finish_reason":"tool_calls"}]}"#,
        )
        .unwrap();

        let response = parse_response(wire).unwrap();
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "read_file");
        assert_eq!(calls[0].native_id.as_deref(), Some("call_1"));
        assert_eq!(calls[0].get_string("path"), Some("a.rs"));
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let wire: WireResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            parse_response(wire),
            Err(GatewayError::MalformedResponse(_))
        ));
    }
}
