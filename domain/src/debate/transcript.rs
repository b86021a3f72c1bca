//! Transcript: the append-only record of the debate
//!
//! Contributions are ordered by round, then by persona declaration order
//! within each round. The rendered text form is what personas, the
//! convergence judge and the synthesizer observe.

use serde::{Deserialize, Serialize};

/// Outcome of one persona's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    /// The persona produced a response
    Ok,
    /// Provider error or tool-loop exhaustion
    Failed,
    /// The turn exceeded its time budget
    Timeout,
}

impl ContributionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ContributionStatus::Ok => "ok",
            ContributionStatus::Failed => "failed",
            ContributionStatus::Timeout => "timeout",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ContributionStatus::Ok)
    }
}

impl std::fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of one tool invocation performed during a persona's turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the invoked tool
    pub tool_name: String,
    /// One-line summary of the result
    pub summary: String,
    /// Whether the invocation succeeded
    pub success: bool,
}

impl ToolInvocation {
    pub fn new(tool_name: impl Into<String>, summary: impl Into<String>, success: bool) -> Self {
        Self {
            tool_name: tool_name.into(),
            summary: summary.into(),
            success,
        }
    }
}

/// One persona's contribution to one round; immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaContribution {
    /// Name of the contributing persona
    pub persona: String,
    /// Outcome of the turn
    pub status: ContributionStatus,
    /// Response text (diagnostic text on failure)
    pub content: String,
    /// Tool invocations performed during the turn, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_invocations: Vec<ToolInvocation>,
}

impl PersonaContribution {
    /// A successful contribution
    pub fn ok(persona: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            status: ContributionStatus::Ok,
            content: content.into(),
            tool_invocations: Vec::new(),
        }
    }

    /// A failed contribution carrying a short diagnostic instead of content
    pub fn failed(persona: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            status: ContributionStatus::Failed,
            content: diagnostic.into(),
            tool_invocations: Vec::new(),
        }
    }

    /// A timed-out contribution
    pub fn timeout(persona: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            status: ContributionStatus::Timeout,
            content: diagnostic.into(),
            tool_invocations: Vec::new(),
        }
    }

    pub fn with_tool_invocations(mut self, invocations: Vec<ToolInvocation>) -> Self {
        self.tool_invocations = invocations;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Judged convergence state after a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceDecision {
    /// Whether the personas have materially aligned
    pub converged: bool,
    /// The judge's rationale (or failure note)
    pub rationale: String,
}

impl ConvergenceDecision {
    pub fn new(converged: bool, rationale: impl Into<String>) -> Self {
        Self {
            converged,
            rationale: rationale.into(),
        }
    }

    /// The fail-open decision used when the judge call itself fails
    pub fn not_converged(rationale: impl Into<String>) -> Self {
        Self::new(false, rationale)
    }
}

/// One synchronized wave of contributions, one per persona
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// 0-based round index
    pub index: u32,
    /// Contributions in persona declaration order
    pub contributions: Vec<PersonaContribution>,
    /// Convergence decision computed after this round, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convergence: Option<ConvergenceDecision>,
}

impl Round {
    pub fn new(index: u32, contributions: Vec<PersonaContribution>) -> Self {
        Self {
            index,
            contributions,
            convergence: None,
        }
    }

    /// 1-based round number for display
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn all_failed(&self) -> bool {
        self.contributions.iter().all(|c| !c.is_ok())
    }
}

/// The append-only ordered record of all contributions across all rounds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    rounds: Vec<Round>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    /// Append a completed round. Rounds are never rewritten.
    pub fn push_round(&mut self, round: Round) {
        self.rounds.push(round);
    }

    /// Attach the convergence decision to the most recent round.
    ///
    /// Each round's decision is produced at most once and never revised.
    pub fn record_convergence(&mut self, decision: ConvergenceDecision) {
        if let Some(round) = self.rounds.last_mut() {
            debug_assert!(round.convergence.is_none());
            round.convergence = Some(decision);
        }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// All contributions in round order, then declaration order within a round
    pub fn contributions(&self) -> impl Iterator<Item = &PersonaContribution> {
        self.rounds.iter().flat_map(|r| r.contributions.iter())
    }

    /// Render the transcript as the text every participant observes.
    ///
    /// Round headers use 1-based numbers; failed contributions render their
    /// diagnostic bracketed so downstream readers can tell them apart.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for round in &self.rounds {
            lines.push(format!("\n--- Round {} ---\n", round.number()));
            for contribution in &round.contributions {
                let body = match contribution.status {
                    ContributionStatus::Ok => contribution.content.clone(),
                    _ => format!("[{}: {}]", contribution.status, contribution.content),
                };
                lines.push(format!("**{}:**\n{}\n", contribution.persona, body));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(index: u32, personas: &[&str]) -> Round {
        Round::new(
            index,
            personas
                .iter()
                .map(|p| PersonaContribution::ok(*p, format!("{} says round {}", p, index + 1)))
                .collect(),
        )
    }

    #[test]
    fn test_contribution_order_is_round_then_declaration() {
        let mut transcript = Transcript::new();
        transcript.push_round(round(0, &["Optimist", "Pessimist"]));
        transcript.push_round(round(1, &["Optimist", "Pessimist"]));

        let order: Vec<&str> = transcript
            .contributions()
            .map(|c| c.persona.as_str())
            .collect();
        assert_eq!(order, vec!["Optimist", "Pessimist", "Optimist", "Pessimist"]);
    }

    #[test]
    fn test_render_has_round_headers_and_persona_markers() {
        let mut transcript = Transcript::new();
        transcript.push_round(round(0, &["Optimist"]));
        transcript.push_round(round(1, &["Optimist"]));

        let text = transcript.render();
        assert!(text.contains("--- Round 1 ---"));
        assert!(text.contains("--- Round 2 ---"));
        assert!(text.contains("**Optimist:**"));
        assert!(text.contains("Optimist says round 2"));
    }

    #[test]
    fn test_render_marks_failed_contributions() {
        let mut transcript = Transcript::new();
        transcript.push_round(Round::new(
            0,
            vec![
                PersonaContribution::ok("A", "fine"),
                PersonaContribution::timeout("B", "turn exceeded 120s"),
            ],
        ));

        let text = transcript.render();
        assert!(text.contains("[timeout: turn exceeded 120s]"));
        assert!(text.contains("fine"));
    }

    #[test]
    fn test_record_convergence_attaches_to_last_round() {
        let mut transcript = Transcript::new();
        transcript.push_round(round(0, &["A"]));
        transcript.push_round(round(1, &["A"]));
        transcript.record_convergence(ConvergenceDecision::new(true, "aligned"));

        assert!(transcript.rounds()[0].convergence.is_none());
        let decision = transcript.rounds()[1].convergence.as_ref().unwrap();
        assert!(decision.converged);
    }

    #[test]
    fn test_all_failed_round() {
        let r = Round::new(
            0,
            vec![
                PersonaContribution::failed("A", "provider error"),
                PersonaContribution::timeout("B", "timed out"),
            ],
        );
        assert!(r.all_failed());
        assert!(!round(0, &["A"]).all_failed());
    }
}
