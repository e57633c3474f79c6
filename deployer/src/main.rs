//! camunda-deploy - Entry Point
//!
//! Deploys the BPMN/DMN models found below the working directory to a
//! Camunda engine. Inputs come from the environment (or CI action inputs),
//! an optional `--config=<file>` and `--key=value` arguments.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use camunda_deploy::app::annotations;
use camunda_deploy::app::options::AppOptions;
use camunda_deploy::app::run::run;
use camunda_deploy::app::settings;
use camunda_deploy::logs::{init_logging, LogLevel, LogOptions};
use camunda_deploy::utils::version_info;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = parse_args(env::args().skip(1));

    // Print version and exit
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(version) => println!("{}", version),
            Err(e) => eprintln!("{}", e),
        }
        return ExitCode::SUCCESS;
    }

    // Initialize logging
    let log_level = cli_args
        .get("log-level")
        .cloned()
        .or_else(|| env::var("LOG_LEVEL").ok())
        .map(|level| level.parse::<LogLevel>())
        .transpose();
    let log_level = match log_level {
        Ok(level) => level.unwrap_or_default(),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let log_options = LogOptions {
        log_level,
        json_format: cli_args.contains_key("json-logs"),
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let annotate = annotations::detect();

    let settings = match settings::load(&cli_args).await {
        Ok(settings) => settings,
        Err(e) => {
            error!("Unable to load settings: {}", e);
            annotations::error(annotate, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let working_dir = match cli_args.get("working-dir") {
        Some(dir) => PathBuf::from(dir),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Unable to determine the working directory: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let options = AppOptions {
        working_dir,
        settings,
        annotate,
    };

    match run(&options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Deployment failed: {}", e);
            annotations::error(annotate, "Deployment Failed, see logs for details.");
            ExitCode::FAILURE
        }
    }
}

/// Collect `--key=value` arguments and bare `--flag`s
fn parse_args(args: impl Iterator<Item = String>) -> HashMap<String, String> {
    let mut cli_args = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    cli_args
}
