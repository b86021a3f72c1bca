//! CLI entrypoint for roundtable
//!
//! Wires the layers together: config loading, the provider gateway,
//! the local tool executor and the debate use case.

use anyhow::{Context, Result, bail};
use clap::Parser;
use roundtable_application::{RunDebateInput, RunDebateUseCase};
use roundtable_domain::TriggerMode;
use roundtable_infrastructure::{
    ConfigLoader, FileOutputFormat, JsonlDebateLogger, LocalToolExecutor, OpenAiCompatGateway,
    RoundtableLoader,
};
use roundtable_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    let loader = match &config.roundtables.dir {
        Some(dir) => RoundtableLoader::new(dir),
        None => RoundtableLoader::from_default_dir(),
    };

    if cli.list {
        let roundtables = loader
            .list()
            .with_context(|| format!("cannot read roundtables from {}", loader.dir().display()))?;
        if roundtables.is_empty() {
            println!("No roundtables found in {}", loader.dir().display());
            return Ok(());
        }
        println!("Available roundtables ({}):", loader.dir().display());
        for rt in roundtables {
            let trigger = match rt.trigger {
                TriggerMode::Auto => "auto",
                TriggerMode::Explicit => "explicit",
            };
            println!(
                "  {:<20} {:>2} personas  [{}]  {}",
                rt.name,
                rt.personas.len(),
                trigger,
                rt.description
            );
        }
        return Ok(());
    }

    let question = match cli.question {
        Some(q) if !q.trim().is_empty() => q,
        Some(_) => bail!("The question cannot be empty."),
        None => bail!("A question is required. Use --list to see available roundtables."),
    };

    let definition = match &cli.roundtable {
        Some(name) => match loader.get(name)? {
            Some(definition) => definition,
            None => bail!(
                "No roundtable named '{}' in {}",
                name,
                loader.dir().display()
            ),
        },
        None => {
            // Explicit-trigger roundtables only run when named with --roundtable.
            let candidate = loader
                .list()?
                .into_iter()
                .find(|rt| rt.trigger == TriggerMode::Auto);
            match candidate {
                Some(definition) => definition,
                None => bail!(
                    "No auto-trigger roundtable found in {}. \
                     Name one with --roundtable.",
                    loader.dir().display()
                ),
            }
        }
    };

    info!(roundtable = %definition.name, "starting debate");

    let gateway = Arc::new(
        OpenAiCompatGateway::from_config(&config.provider)
            .context("failed to set up the model provider")?,
    );

    let executor = Arc::new(if cli.allow_write_tools {
        LocalToolExecutor::new()
    } else {
        LocalToolExecutor::read_only()
    });

    let mut use_case = RunDebateUseCase::new(gateway, executor)
        .with_defaults(config.session_defaults());

    let log_path: Option<PathBuf> = cli
        .log_file
        .clone()
        .or_else(|| config.logging.debate_log.as_ref().map(PathBuf::from));
    if let Some(path) = log_path {
        match JsonlDebateLogger::new(&path) {
            Some(logger) => use_case = use_case.with_logger(Arc::new(logger)),
            None => warn!(path = %path.display(), "cannot open debate log, continuing without it"),
        }
    }

    let input = RunDebateInput::new(question, definition);

    let result = if cli.quiet {
        use_case.execute(input).await?
    } else if cli.verbose > 0 {
        // Progress bars and log lines fight over the terminal.
        let progress = SimpleProgress;
        use_case.execute_with_progress(input, &progress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    let format = cli.output.unwrap_or(match config.output.format {
        FileOutputFormat::Full => OutputFormat::Full,
        FileOutputFormat::Synthesis => OutputFormat::Synthesis,
        FileOutputFormat::Json => OutputFormat::Json,
    });

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);

    Ok(())
}
