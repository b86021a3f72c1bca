//! Convergence check
//!
//! Asks a judge model whether the debate has settled. The judge is
//! advisory: any failure, timeout, or unparsable verdict means the debate
//! simply continues, so a flaky judge can cost extra rounds but never an
//! answer.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use roundtable_domain::{ConvergenceDecision, DebatePrompts, Message, Model};
use std::time::Duration;
use tracing::{debug, warn};

/// The verdict only needs one word, keep the judge short and cold.
const JUDGE_TEMPERATURE: f32 = 0.3;
const JUDGE_MAX_TOKENS: u32 = 50;

/// Ask `model` whether the debate transcript has converged.
pub async fn judge_convergence<G: LlmGateway>(
    gateway: &G,
    model: &Model,
    question: &str,
    transcript: &str,
    timeout: Option<Duration>,
) -> ConvergenceDecision {
    let request = ChatRequest::new(
        model.clone(),
        vec![
            Message::system(DebatePrompts::convergence_system()),
            Message::user(DebatePrompts::convergence_prompt(question, transcript)),
        ],
    )
    .with_temperature(JUDGE_TEMPERATURE)
    .with_max_tokens(JUDGE_MAX_TOKENS);

    let response = match send(gateway, request, timeout).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "convergence check failed, continuing debate");
            return ConvergenceDecision::not_converged(format!("judge unavailable: {e}"));
        }
    };

    let verdict = response.text_content();
    parse_verdict(&verdict)
}

fn parse_verdict(verdict: &str) -> ConvergenceDecision {
    // Substring match: judges often wrap the verdict in prose, and
    // CONVERGED is checked first when a reply mentions both words
    let normalized = verdict.trim().to_uppercase();
    if normalized.contains("CONVERGED") {
        debug!("judge ruled the debate converged");
        ConvergenceDecision::new(true, verdict.trim())
    } else if normalized.contains("CONTINUE") {
        ConvergenceDecision::not_converged(verdict.trim())
    } else {
        warn!(verdict = %verdict, "unparsable convergence verdict, continuing debate");
        ConvergenceDecision::not_converged(format!("unparsable verdict: {verdict}"))
    }
}

async fn send<G: LlmGateway>(
    gateway: &G,
    request: ChatRequest,
    timeout: Option<Duration>,
) -> Result<roundtable_domain::LlmResponse, GatewayError> {
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, gateway.chat(request))
            .await
            .map_err(|_| GatewayError::Timeout)?,
        None => gateway.chat(request).await,
    }
}
