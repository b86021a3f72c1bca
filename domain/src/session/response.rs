//! Structured LLM responses
//!
//! A provider reply mixes text content with tool-use requests. The persona
//! runner branches on [`LlmResponse::has_tool_calls`]: execute the requested
//! tools and loop, or take the text as the persona's contribution.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within an LLM response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model
    Text(String),

    /// A tool use request from the model
    ToolUse {
        /// Provider-assigned ID for correlating with tool results
        id: String,
        /// Tool name as requested by the model
        name: String,
        /// Structured arguments
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Reason the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response
    EndTurn,
    /// The model wants to call tools
    ToolUse,
    /// Hit the token limit; response may be truncated
    MaxTokens,
    /// Provider-specific stop reason
    Other(String),
}

/// A structured response from an LLM, supporting both text and tool use
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use)
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating
    pub stop_reason: Option<StopReason>,
}

impl LlmResponse {
    /// Create a text-only response
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
        }
    }

    /// Concatenate all text content blocks into a single string
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all tool-use content blocks as `Vec<ToolCall>`
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_creates_text_only_response() {
        let response = LlmResponse::from_text("Hello!");
        assert_eq!(response.text_content(), "Hello!");
        assert!(!response.has_tool_calls());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn tool_calls_extraction() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::Text("Let me check.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "grep_search".to_string(),
                    input: [("pattern".to_string(), serde_json::json!("async fn"))]
                        .into_iter()
                        .collect(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
        };

        assert!(response.has_tool_calls());
        assert_eq!(response.text_content(), "Let me check.");

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "grep_search");
        assert_eq!(calls[0].native_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn empty_response() {
        let response = LlmResponse {
            content: vec![],
            stop_reason: None,
        };
        assert_eq!(response.text_content(), "");
        assert!(response.tool_calls().is_empty());
    }
}
