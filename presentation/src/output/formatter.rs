//! Output formatter trait

use roundtable_domain::FinalResult;

/// Trait for formatting debate results
pub trait OutputFormatter {
    /// Format the complete debate result
    fn format(&self, result: &FinalResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &FinalResult) -> String;

    /// Format synthesis only (concise output)
    fn format_synthesis_only(&self, result: &FinalResult) -> String;
}
