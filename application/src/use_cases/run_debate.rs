//! Run Debate use case
//!
//! Orchestrates the full debate flow: validate the roundtable, run
//! personas in parallel rounds, consult the convergence judge between
//! rounds, and synthesize the transcript into one answer.

use crate::config::SessionDefaults;
use crate::ports::debate_logger::{DebateEvent, DebateLogger, NoopDebateLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{DebateProgress, NoProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::convergence::judge_convergence;
use crate::use_cases::persona_turn::PersonaTurnRunner;
use crate::use_cases::synthesis::synthesize;
use roundtable_domain::{
    DebateSession, DomainError, FinalResult, Model, PersonaContribution, Question, Round,
    RoundtableDefinition,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while running a debate
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error(transparent)]
    InvalidDefinition(#[from] DomainError),

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(GatewayError),
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    /// The question under debate
    pub question: Question,
    /// The roundtable to run it through
    pub definition: RoundtableDefinition,
}

impl RunDebateInput {
    pub fn new(question: impl Into<Question>, definition: RoundtableDefinition) -> Self {
        Self {
            question: question.into(),
            definition,
        }
    }
}

/// Use case for running one debate
pub struct RunDebateUseCase<G, T>
where
    G: LlmGateway + 'static,
    T: ToolExecutorPort + 'static,
{
    gateway: Arc<G>,
    tools: Arc<T>,
    defaults: SessionDefaults,
    logger: Arc<dyn DebateLogger>,
}

impl<G, T> RunDebateUseCase<G, T>
where
    G: LlmGateway + 'static,
    T: ToolExecutorPort + 'static,
{
    pub fn new(gateway: Arc<G>, tools: Arc<T>) -> Self {
        Self {
            gateway,
            tools,
            defaults: SessionDefaults::default(),
            logger: Arc::new(NoopDebateLogger),
        }
    }

    pub fn with_defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DebateLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<FinalResult, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgress,
    ) -> Result<FinalResult, RunDebateError> {
        // Nothing runs, and nothing is billed, on a bad definition
        input.definition.validate()?;

        let definition = input.definition;
        let personas = definition.personas.clone();
        let rounds = definition.rounds;
        let convergence_active = definition.convergence_active();
        let moderator = self.moderator_model(&definition);

        info!(
            roundtable = %definition.name,
            personas = personas.len(),
            max_rounds = rounds.max,
            "starting debate"
        );
        progress.on_debate_start(&definition.name, personas.len(), rounds.max);
        self.logger.log(DebateEvent::new(
            "debate_start",
            json!({
                "roundtable": definition.name,
                "question": input.question.content(),
                "personas": definition.persona_names(),
                "rounds": { "min": rounds.min, "max": rounds.max },
            }),
        ));

        let runner = Arc::new(PersonaTurnRunner::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.tools),
            self.defaults.clone(),
        ));

        let mut session = DebateSession::new(input.question, definition);

        for round_index in 0..rounds.max {
            let number = round_index + 1;
            progress.on_round_start(number, personas.len());
            self.logger.log(DebateEvent::new(
                "round_start",
                json!({ "round": number }),
            ));

            // Later rounds see everything said so far
            let snapshot = if round_index == 0 {
                None
            } else {
                Some(session.transcript().render())
            };

            let mut handles = Vec::with_capacity(personas.len());
            for persona in &personas {
                let runner = Arc::clone(&runner);
                let persona = persona.clone();
                let question = session.question().content().to_string();
                let transcript = snapshot.clone();
                handles.push(tokio::spawn(async move {
                    runner.run(persona, question, transcript, number).await
                }));
            }

            // Join barrier. Awaiting in declaration order keeps the
            // transcript stable no matter which task finishes first.
            let mut contributions = Vec::with_capacity(personas.len());
            for (persona, handle) in personas.iter().zip(handles) {
                let contribution = match handle.await {
                    Ok(contribution) => contribution,
                    Err(e) => {
                        warn!(persona = %persona.name, error = %e, "persona task aborted");
                        PersonaContribution::failed(&persona.name, format!("task aborted: {e}"))
                    }
                };
                progress.on_persona_complete(number, &contribution.persona, contribution.status);
                self.logger.log(DebateEvent::new(
                    "contribution",
                    json!({
                        "round": number,
                        "persona": contribution.persona,
                        "status": contribution.status.as_str(),
                        "content": contribution.content,
                        "tools": contribution.tool_invocations.len(),
                    }),
                ));
                contributions.push(contribution);
            }

            let round = Round::new(round_index, contributions);
            if round.all_failed() {
                warn!(round = number, "every persona failed this round");
            }
            session.close_round(round);
            progress.on_round_complete(number);

            // The judge only rules between min and max; the final round
            // ends the debate on its own.
            if convergence_active && number >= rounds.min && number < rounds.max {
                let decision = judge_convergence(
                    self.gateway.as_ref(),
                    &moderator,
                    session.question().content(),
                    &session.transcript().render(),
                    self.defaults.request_timeout,
                )
                .await;
                progress.on_convergence(number, &decision);
                self.logger.log(DebateEvent::new(
                    "convergence",
                    json!({
                        "round": number,
                        "converged": decision.converged,
                        "rationale": decision.rationale,
                    }),
                ));

                let converged = decision.converged;
                session.record_convergence(decision);
                if converged {
                    info!(round = number, "debate converged early");
                    break;
                }
            }
        }

        progress.on_synthesis_start(&moderator);
        let synthesis = synthesize(
            self.gateway.as_ref(),
            &moderator,
            session.definition().orchestrator.synthesis_prompt.as_str(),
            session.question().content(),
            &session.transcript().render(),
            self.defaults.max_tokens,
            self.defaults.request_timeout,
        )
        .await
        .map_err(RunDebateError::SynthesisFailed)?;

        self.logger.log(DebateEvent::new(
            "synthesis",
            json!({ "model": synthesis.model.as_str(), "text": synthesis.text }),
        ));

        let result = session.complete(synthesis);
        info!(
            roundtable = %result.roundtable,
            rounds = result.rounds_run,
            converged_early = result.converged_early,
            "debate complete"
        );
        Ok(result)
    }

    fn moderator_model(&self, definition: &RoundtableDefinition) -> Model {
        definition
            .orchestrator
            .model
            .clone()
            .unwrap_or_else(|| self.defaults.model.clone())
    }
}
