use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use selection::ValidationInput;
use tracing::{info, warn};
use validator_agents::{check_endpoint, SelectionOrchestrator, ValidatorConfig};

/// Ensemble reasoning validator: pick the best of several candidate solutions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the selection pipeline and print the result as JSON
    Validate {
        /// Problem statement (ignored when --input is given)
        #[arg(long, required_unless_present = "input")]
        problem: Option<String>,

        /// Candidate reasoning text; repeat once per candidate
        #[arg(long = "thought")]
        thoughts: Vec<String>,

        /// JSON file with `problem`, `thoughts` and optional `func_name`
        #[arg(long, conflicts_with_all = ["problem", "thoughts"])]
        input: Option<PathBuf>,

        /// TOML deployment file (overrides VALIDATOR_* environment)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report (transitions, comparison, vote, run id)
        #[arg(long, default_value_t = false)]
        audit: bool,
    },
    /// Probe the configured judge endpoint
    Check {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => ValidatorConfig::from_file(path),
        None => {
            let config = ValidatorConfig::from_env();
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            Ok(config)
        }
    }
}

fn load_input(
    problem: Option<String>,
    thoughts: Vec<String>,
    input: Option<&Path>,
) -> Result<ValidationInput> {
    if let Some(path) = input {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        return ValidationInput::from_json(&raw)
            .with_context(|| format!("Invalid input file {}", path.display()));
    }
    match problem {
        Some(problem) => Ok(ValidationInput::new(problem, thoughts)),
        None => bail!("either --problem or --input is required"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Validate {
            problem,
            thoughts,
            input,
            config,
            audit,
        } => {
            let config = load_config(config.as_deref())?;
            let input = load_input(problem, thoughts, input.as_deref())?;
            info!(
                endpoint = %config.endpoint.base_url,
                model = %config.endpoint.model,
                candidates = input.thoughts.len(),
                "Validator starting"
            );

            let orchestrator = SelectionOrchestrator::from_config(&config)
                .context("Failed to build judge client")?;
            let report = orchestrator.run(&input).await?;

            let json = if audit {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string_pretty(&report.result)?
            };
            println!("{json}");
        }
        Command::Check { config } => {
            let config = load_config(config.as_deref())?;
            let key = Some(config.endpoint.api_key.as_str()).filter(|k| !k.is_empty());
            if check_endpoint(&config.endpoint.base_url, key).await {
                info!(endpoint = %config.endpoint.base_url, "Judge endpoint reachable");
            } else {
                warn!(endpoint = %config.endpoint.base_url, "Judge endpoint unreachable");
                bail!("judge endpoint {} is unreachable", config.endpoint.base_url);
            }
        }
    }

    Ok(())
}
