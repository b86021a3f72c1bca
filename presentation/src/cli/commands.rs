//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript plus synthesis
    Full,
    /// Only the final synthesis
    Synthesis,
    /// JSON output
    Json,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Multi-persona debates with a synthesized answer")]
#[command(long_about = r#"
Roundtable runs a question through a panel of personas that debate it over
one or more rounds, then synthesizes the transcript into one answer.

Each round, every persona responds in parallel; from round two on they see
the full transcript so far. Between rounds a judge may rule the debate
converged and stop early. A moderator model writes the final synthesis.

Roundtable definitions are TOML files in the roundtables directory
(./roundtables by default). Configuration files are loaded from
(in priority order):
1. --config <path>       Explicit config file
2. ./roundtable.toml     Project-level config
3. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable "Should we split the billing service?"
  roundtable --roundtable arch-review "Monorepo or polyrepo?"
  roundtable --list
"#)]
pub struct Cli {
    /// The question to debate (omit with --list)
    pub question: Option<String>,

    /// Name of the roundtable to run (default: the first auto-trigger one)
    #[arg(short, long, value_name = "NAME")]
    pub roundtable: Option<String>,

    /// List available roundtables and exit
    #[arg(short, long)]
    pub list: bool,

    /// Output format (defaults to the configured format, or full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write a JSONL debate log to this path
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Let personas modify files and run commands (default: read-only tools)
    #[arg(long)]
    pub allow_write_tools: bool,
}
