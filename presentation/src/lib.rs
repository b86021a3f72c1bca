//! Presentation layer for roundtable
//!
//! This crate contains the CLI argument definitions, console output
//! formatting, and progress display.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use output::{ConsoleFormatter, OutputFormatter};
pub use progress::{ProgressReporter, SimpleProgress};
