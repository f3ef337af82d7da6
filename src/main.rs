use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kv_validator::config::ValidationConfig;
use kv_validator::report::{print_header, print_result, print_summary};
use kv_validator::validator::ValidationResult;

#[derive(Parser, Debug)]
#[command(name = "kv-validator")]
#[command(about = "Checks keys and values against key-value store validation rules")]
#[command(version)]
struct Cli {
    /// TOML file with validation limits (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one or more keys
    CheckKey {
        /// Keys to validate
        #[arg(required = true)]
        keys: Vec<String>,

        /// Print the violations as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Validate a value as it would be stored under a key
    CheckValue(CheckValueArgs),
}

#[derive(Args, Debug)]
struct CheckValueArgs {
    /// Key the value would be stored under
    #[arg(short, long)]
    key: String,

    /// Read the value from a file
    #[arg(short, long, conflicts_with = "data", required_unless_present = "data")]
    file: Option<PathBuf>,

    /// Use this text as the value
    #[arg(short, long)]
    data: Option<String>,

    /// Print the violations as JSON instead of a report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2), // Violations found
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every checked item was valid.
fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => ValidationConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ValidationConfig::default(),
    };

    let (results, json) = match cli.command {
        Command::CheckKey { keys, json } => {
            let mut results = Vec::with_capacity(keys.len());
            for key in keys {
                let result = kv_validator::check_key(&config, &key)?;
                results.push((key, result));
            }
            (results, json)
        }
        Command::CheckValue(args) => {
            let value = match (&args.file, args.data) {
                (Some(path), _) => std::fs::read(path)
                    .with_context(|| format!("reading value from {}", path.display()))?,
                (None, Some(data)) => data.into_bytes(),
                (None, None) => anyhow::bail!("either --file or --data is required"),
            };
            let result = kv_validator::check_entry(&config, &args.key, &value)?;
            (vec![(args.key, result)], args.json)
        }
    };

    if json {
        print_json(&results)?;
    } else {
        print_header("Key-Value Validation Report", &config);
        for (subject, result) in &results {
            print_result(subject, result);
        }
        print_summary(&results);
    }

    Ok(results.iter().all(|(_, result)| !result.has_errors()))
}

fn print_json(results: &[(String, ValidationResult)]) -> Result<()> {
    for (_, result) in results {
        println!("{}", result.to_json().context("serializing validation result")?);
    }
    Ok(())
}
