//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use roundtable_domain::{ContributionStatus, FinalResult};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate result
    pub fn format(result: &FinalResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Debate"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            result.question
        ));
        output.push_str(&format!(
            "{} {} ({} round{}{})\n",
            "Roundtable:".cyan().bold(),
            result.roundtable,
            result.rounds_run,
            if result.rounds_run == 1 { "" } else { "s" },
            if result.converged_early {
                ", converged early"
            } else {
                ""
            }
        ));

        for round in result.transcript.rounds() {
            output.push_str(&Self::section_header(&format!("Round {}", round.number())));
            for contribution in &round.contributions {
                match contribution.status {
                    ContributionStatus::Ok => {
                        output.push_str(&format!(
                            "\n{}\n{}\n",
                            format!("── {} ──", contribution.persona).yellow().bold(),
                            contribution.content
                        ));
                    }
                    status => {
                        output.push_str(&format!(
                            "\n{}\n[{}: {}]\n",
                            format!("── {} ──", contribution.persona).red().bold(),
                            status,
                            contribution.content
                        ));
                    }
                }
            }
            if let Some(decision) = &round.convergence {
                let verdict = if decision.converged {
                    "converged".green().bold()
                } else {
                    "continue".yellow().bold()
                };
                output.push_str(&format!(
                    "\n{} {} ({})\n",
                    "Judge:".cyan().bold(),
                    verdict,
                    decision.rationale
                ));
            }
        }

        output.push_str(&Self::section_header("Synthesis"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Moderator: {}", result.synthesis.model)
                .yellow()
                .bold(),
            result.synthesis.text
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &FinalResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(result: &FinalResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Roundtable Conclusion ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.question));
        output.push_str(&result.synthesis.text);
        output.push('\n');

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &FinalResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &FinalResult) -> String {
        Self::format_json(result)
    }

    fn format_synthesis_only(&self, result: &FinalResult) -> String {
        Self::format_synthesis_only(result)
    }
}
