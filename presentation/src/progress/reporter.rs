//! Console progress reporting during a debate

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roundtable_application::DebateProgress;
use roundtable_domain::{ContributionStatus, ConvergenceDecision, Model};
use std::sync::Mutex;

/// Progress reporter backed by indicatif progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn status_marker(status: ContributionStatus) -> String {
        match status {
            ContributionStatus::Ok => "✓".green().to_string(),
            ContributionStatus::Failed => "✗".red().to_string(),
            ContributionStatus::Timeout => "⏱".red().to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgress for ProgressReporter {
    fn on_debate_start(&self, roundtable: &str, personas: usize, max_rounds: u32) {
        let _ = self.multi.println(format!(
            "{} {} ({} personas, up to {} rounds)",
            "Debating with".cyan().bold(),
            roundtable.bold(),
            personas,
            max_rounds
        ));
    }

    fn on_round_start(&self, round: u32, personas: usize) {
        let bar = self.multi.add(ProgressBar::new(personas as u64));
        bar.set_style(Self::round_style());
        bar.set_prefix(format!("Round {}", round));
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        if let Ok(mut slot) = self.round_bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_persona_complete(&self, _round: u32, persona: &str, status: ContributionStatus) {
        if let Ok(slot) = self.round_bar.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.inc(1);
                bar.set_message(format!("{} {}", Self::status_marker(status), persona));
            }
        }
    }

    fn on_round_complete(&self, round: u32) {
        if let Ok(mut slot) = self.round_bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_with_message(format!("round {} complete", round));
            }
        }
    }

    fn on_convergence(&self, round: u32, decision: &ConvergenceDecision) {
        let verdict = if decision.converged {
            "converged".green().bold()
        } else {
            "continuing".yellow()
        };
        let _ = self
            .multi
            .println(format!("  judge after round {}: {}", round, verdict));
    }

    fn on_synthesis_start(&self, model: &Model) {
        let _ = self.multi.println(format!(
            "{} ({})",
            "Synthesizing final answer".cyan().bold(),
            model
        ));
    }
}

/// Plain line-per-event progress for terminals where bars are unwanted
pub struct SimpleProgress;

impl DebateProgress for SimpleProgress {
    fn on_debate_start(&self, roundtable: &str, personas: usize, max_rounds: u32) {
        println!(
            "Debating with {} ({} personas, up to {} rounds)",
            roundtable.bold(),
            personas,
            max_rounds
        );
    }

    fn on_round_start(&self, round: u32, personas: usize) {
        println!("Round {} started ({} personas)", round, personas);
    }

    fn on_persona_complete(&self, round: u32, persona: &str, status: ContributionStatus) {
        println!(
            "  [round {}] {} {}",
            round,
            ProgressReporter::status_marker(status),
            persona
        );
    }

    fn on_round_complete(&self, round: u32) {
        println!("Round {} complete", round);
    }

    fn on_convergence(&self, round: u32, decision: &ConvergenceDecision) {
        let verdict = if decision.converged {
            "converged"
        } else {
            "continuing"
        };
        println!("Judge after round {}: {}", round, verdict);
    }

    fn on_synthesis_start(&self, model: &Model) {
        println!("Synthesizing final answer ({})", model);
    }
}
