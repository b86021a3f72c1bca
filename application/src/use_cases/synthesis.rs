//! Synthesis
//!
//! Reduces the full transcript to one answer. Unlike persona turns and the
//! convergence check, synthesis failure is terminal: a debate without a
//! final answer has no value to return.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use roundtable_domain::{DebatePrompts, Message, Model, Synthesis};
use std::time::Duration;
use tracing::info;

const SYNTHESIS_TEMPERATURE: f32 = 0.5;

/// Placeholder when the moderator answers with empty content.
const EMPTY_SYNTHESIS: &str = "[Synthesis produced no output]";

/// Produce the final synthesis of a finished debate.
pub async fn synthesize<G: LlmGateway>(
    gateway: &G,
    model: &Model,
    instructions: &str,
    question: &str,
    transcript: &str,
    max_tokens: u32,
    timeout: Option<Duration>,
) -> Result<Synthesis, GatewayError> {
    info!(model = %model, "synthesizing debate");

    let request = ChatRequest::new(
        model.clone(),
        vec![
            Message::system(DebatePrompts::synthesis_system()),
            Message::user(DebatePrompts::synthesis_prompt(
                instructions,
                question,
                transcript,
            )),
        ],
    )
    .with_temperature(SYNTHESIS_TEMPERATURE)
    .with_max_tokens(max_tokens);

    let response = match timeout {
        Some(timeout) => tokio::time::timeout(timeout, gateway.chat(request))
            .await
            .map_err(|_| GatewayError::Timeout)??,
        None => gateway.chat(request).await?,
    };

    let text = response.text_content();
    let text = if text.trim().is_empty() {
        EMPTY_SYNTHESIS.to_string()
    } else {
        text
    };

    Ok(Synthesis::new(model.clone(), text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::ScriptedGateway;
    use roundtable_domain::LlmResponse;

    #[tokio::test]
    async fn test_synthesis_carries_model_and_text() {
        let gateway = ScriptedGateway::new();
        gateway.script("moderator", LlmResponse::from_text("do the thing"));

        let synthesis = synthesize(
            &gateway,
            &Model::new("moderator"),
            "Summarize.",
            "why?",
            "transcript",
            4096,
            None,
        )
        .await
        .unwrap();

        assert_eq!(synthesis.model.as_str(), "moderator");
        assert_eq!(synthesis.text, "do the thing");

        let requests = gateway.requests();
        assert_eq!(requests[0].temperature, SYNTHESIS_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_empty_synthesis_gets_placeholder() {
        let gateway = ScriptedGateway::new();
        gateway.script("moderator", LlmResponse::from_text("  "));

        let synthesis = synthesize(
            &gateway,
            &Model::new("moderator"),
            "Summarize.",
            "why?",
            "transcript",
            4096,
            None,
        )
        .await
        .unwrap();

        assert_eq!(synthesis.text, EMPTY_SYNTHESIS);
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_an_error() {
        let gateway = ScriptedGateway::new();
        gateway.script_err("moderator", GatewayError::RequestFailed("boom".into()));

        let result = synthesize(
            &gateway,
            &Model::new("moderator"),
            "Summarize.",
            "why?",
            "transcript",
            4096,
            None,
        )
        .await;

        assert!(result.is_err());
    }
}
