//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate.

use roundtable_domain::{ContributionStatus, ConvergenceDecision, Model};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait DebateProgress: Send + Sync {
    /// Called once when the debate starts
    fn on_debate_start(&self, roundtable: &str, personas: usize, max_rounds: u32);

    /// Called when a round starts (1-based round number)
    fn on_round_start(&self, round: u32, personas: usize);

    /// Called when a persona's contribution lands
    fn on_persona_complete(&self, round: u32, persona: &str, status: ContributionStatus);

    /// Called when a round closes
    fn on_round_complete(&self, round: u32);

    /// Called after the convergence judge rules
    fn on_convergence(&self, round: u32, decision: &ConvergenceDecision) {
        let _ = (round, decision);
    }

    /// Called when synthesis begins
    fn on_synthesis_start(&self, model: &Model) {
        let _ = model;
    }
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgress for NoProgress {
    fn on_debate_start(&self, _roundtable: &str, _personas: usize, _max_rounds: u32) {}
    fn on_round_start(&self, _round: u32, _personas: usize) {}
    fn on_persona_complete(&self, _round: u32, _persona: &str, _status: ContributionStatus) {}
    fn on_round_complete(&self, _round: u32) {}
}
