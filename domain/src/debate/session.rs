//! Debate session state and final result types

use crate::core::model::Model;
use crate::core::question::Question;
use crate::debate::roundtable::RoundtableDefinition;
use crate::debate::transcript::{ConvergenceDecision, Round, Transcript};
use serde::{Deserialize, Serialize};

/// The single final answer reducing the whole transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synthesis {
    /// Model that produced the synthesis
    pub model: Model,
    /// The synthesized answer
    pub text: String,
}

impl Synthesis {
    pub fn new(model: Model, text: impl Into<String>) -> Self {
        Self {
            model,
            text: text.into(),
        }
    }
}

/// Result of a completed debate, returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResult {
    /// Name of the roundtable that ran
    pub roundtable: String,
    /// The original question
    pub question: String,
    /// The complete transcript
    pub transcript: Transcript,
    /// The final synthesis
    pub synthesis: Synthesis,
    /// Number of rounds that ran
    pub rounds_run: u32,
    /// Whether the convergence judge ended the debate before `rounds.max`
    pub converged_early: bool,
}

/// Mutable state of one debate, owned exclusively by the round coordinator
///
/// Created at debate start and discarded once the caller has consumed the
/// final result. Persona runners, the judge and the synthesizer only ever
/// see read-only snapshots of the transcript.
#[derive(Debug, Clone)]
pub struct DebateSession {
    question: Question,
    definition: RoundtableDefinition,
    transcript: Transcript,
    converged_early: bool,
}

impl DebateSession {
    pub fn new(question: Question, definition: RoundtableDefinition) -> Self {
        Self {
            question,
            definition,
            transcript: Transcript::new(),
            converged_early: false,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn definition(&self) -> &RoundtableDefinition {
        &self.definition
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// 0-based index the next round will get
    pub fn next_round_index(&self) -> u32 {
        self.transcript.len() as u32
    }

    /// Close a round: append it to the transcript
    pub fn close_round(&mut self, round: Round) {
        debug_assert_eq!(round.index, self.next_round_index());
        self.transcript.push_round(round);
    }

    /// Record the convergence decision for the round just closed
    pub fn record_convergence(&mut self, decision: ConvergenceDecision) {
        let converged = decision.converged;
        self.transcript.record_convergence(decision);
        if converged {
            self.converged_early = true;
        }
    }

    pub fn converged_early(&self) -> bool {
        self.converged_early
    }

    /// Consume the session into the caller-facing result.
    ///
    /// A session only completes once a synthesis exists, so completion
    /// and the final result are the same step.
    pub fn complete(self, synthesis: Synthesis) -> FinalResult {
        let rounds_run = self.transcript.len() as u32;
        FinalResult {
            roundtable: self.definition.name,
            question: self.question.into_content(),
            transcript: self.transcript,
            synthesis,
            rounds_run,
            converged_early: self.converged_early,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::roundtable::PersonaDefinition;
    use crate::debate::transcript::PersonaContribution;

    fn session() -> DebateSession {
        let definition = RoundtableDefinition::new("rt")
            .with_personas(vec![PersonaDefinition::new("Solo", "prompt")]);
        DebateSession::new(Question::new("why?"), definition)
    }

    #[test]
    fn test_session_lifecycle() {
        let mut s = session();
        assert_eq!(s.next_round_index(), 0);

        s.close_round(Round::new(0, vec![PersonaContribution::ok("Solo", "because")]));
        assert_eq!(s.next_round_index(), 1);
        assert!(!s.converged_early());

        let result = s.complete(Synthesis::new(Model::new("gpt-4.1"), "the answer"));
        assert_eq!(result.roundtable, "rt");
        assert_eq!(result.rounds_run, 1);
        assert!(!result.converged_early);
        assert_eq!(result.synthesis.text, "the answer");
    }

    #[test]
    fn test_convergence_marks_early_stop() {
        let mut s = session();
        s.close_round(Round::new(0, vec![PersonaContribution::ok("Solo", "a")]));
        s.record_convergence(ConvergenceDecision::new(true, "aligned"));
        assert!(s.converged_early());
    }

    #[test]
    fn test_complete_reports_rounds_run() {
        let mut s = session();
        s.close_round(Round::new(0, vec![PersonaContribution::ok("Solo", "a")]));
        s.close_round(Round::new(1, vec![PersonaContribution::ok("Solo", "b")]));
        s.record_convergence(ConvergenceDecision::new(true, "aligned"));

        let result = s.complete(Synthesis::new(Model::new("gpt-4.1"), "done"));
        assert_eq!(result.rounds_run, 2);
        assert!(result.converged_early);
    }
}
