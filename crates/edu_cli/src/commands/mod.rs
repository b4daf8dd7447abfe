//! CLI command definitions.
//!
//! Each subcommand maps to one tab of the EduPilot dashboard.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use edu_core::{EduConfig, Notification, NotificationLevel, Notifier, OutputFormat};

pub mod analytics;
pub mod brief;
pub mod generate;
pub mod overview;
pub mod registry;
pub mod versions;

/// EduPilot - AI course production dashboard
#[derive(Parser)]
#[command(name = "edu")]
#[command(version, about = "EduPilot - AI course production dashboard")]
#[command(long_about = r#"
EduPilot helps course producers go from a short brief to a reusable,
versioned AI literacy course.

VIEWS:
  overview   → KPI cards and monthly trends
  brief      → Four-step brief wizard and simulated brief generation
  generate   → Content generation pipeline, curriculum, slides, templates
  versions   → Version history, release notes, promotion and rollback
  analytics  → Learner feedback and improvement cards
  registry   → Search the content catalog

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Generation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "EDU_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show KPI cards and trends
    Overview(overview::OverviewArgs),

    /// Fill in the brief wizard and generate a brief
    Brief(brief::BriefArgs),

    /// Show or advance the content generation pipeline
    Generate(generate::GenerateArgs),

    /// Show version history and manage releases
    Versions(versions::VersionsArgs),

    /// Show learner feedback and improvement cards
    Analytics(analytics::AnalyticsArgs),

    /// Search the content catalog
    Registry(registry::RegistryArgs),
}

/// Argument errors detected by the CLI itself.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid field assignment '{0}', expected key=value")]
    InvalidFieldAssignment(String),
}

/// Settings shared by every command.
pub struct Context {
    pub config: EduConfig,
    pub json: bool,
}

impl Context {
    pub fn new(config: EduConfig, json_flag: bool) -> Self {
        let json = json_flag || config.output.format == OutputFormat::Json;
        Self { config, json }
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Shows notifications as toasts on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", toast(&notification));
    }
}

fn toast(notification: &Notification) -> String {
    let icon = match notification.level {
        NotificationLevel::Info => "ℹ️ ",
        NotificationLevel::Success => "✅",
        NotificationLevel::Error => "❌",
    };
    format!("{} {}", icon, notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["edu", "registry", "--json", "--query", "AI"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Registry(_)));
    }

    #[test]
    fn test_config_format_enables_json() {
        let mut config = EduConfig::default();
        assert!(!Context::new(config.clone(), false).json);
        assert!(Context::new(config.clone(), true).json);

        config.output.format = OutputFormat::Json;
        assert!(Context::new(config, false).json);
    }

    #[test]
    fn test_toast_format() {
        let line = toast(&Notification::success("brief-wizard", "Brief generated successfully"));
        assert_eq!(line, "✅ Brief generated successfully");
    }
}
