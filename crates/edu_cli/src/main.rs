//! EduPilot CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Generation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, CliError, Commands, Context};
use edu_brief::BriefError;
use edu_content::ContentError;
use edu_core::{ConfigError, EduConfig};

/// Script-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const GENERATION_FAILURE: u8 = 3;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "edu=debug,warn"
    } else {
        "edu=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Logs go to stderr so `--json` output stays parseable
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let config = match EduConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            return ExitCode::from(categorize_config_error(&e));
        }
    };
    let ctx = Context::new(config, cli.json);

    let result = match cli.command {
        Commands::Overview(args) => commands::overview::execute(args, &ctx).await,
        Commands::Brief(args) => commands::brief::execute(args, &ctx).await,
        Commands::Generate(args) => commands::generate::execute(args, &ctx).await,
        Commands::Versions(args) => commands::versions::execute(args, &ctx).await,
        Commands::Analytics(args) => commands::analytics::execute(args, &ctx).await,
        Commands::Registry(args) => commands::registry::execute(args, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Map an error to its exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<BriefError>() {
        return match err {
            BriefError::GenerationFailed(_) => ExitCodes::GENERATION_FAILURE,
            BriefError::UnknownField(_) => ExitCodes::INVALID_ARGS,
        };
    }

    if let Some(err) = e.downcast_ref::<ContentError>() {
        return match err {
            ContentError::UnknownDifficulty(_) | ContentError::VersionNotFound(_) => {
                ExitCodes::INVALID_ARGS
            }
            ContentError::InvalidTransition { .. } => ExitCodes::GENERAL_ERROR,
        };
    }

    if e.downcast_ref::<CliError>().is_some() {
        return ExitCodes::INVALID_ARGS;
    }

    ExitCodes::GENERAL_ERROR
}

fn categorize_config_error(e: &ConfigError) -> u8 {
    match e {
        ConfigError::Parse(_) => ExitCodes::INVALID_ARGS,
        ConfigError::Io(_) => ExitCodes::GENERAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failure_exit_code() {
        let err = anyhow::Error::new(BriefError::GenerationFailed("timeout".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::GENERATION_FAILURE);

        let err = err.context("Brief generation did not complete");
        assert_eq!(categorize_error(&err), ExitCodes::GENERATION_FAILURE);
    }

    #[test]
    fn test_invalid_argument_exit_codes() {
        let err = anyhow::Error::new(BriefError::UnknownField("colour".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(ContentError::UnknownDifficulty("expert".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::Error::new(CliError::InvalidFieldAssignment("oops".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_other_errors_are_general() {
        assert_eq!(
            categorize_error(&anyhow::anyhow!("disk full")),
            ExitCodes::GENERAL_ERROR
        );
    }
}
