pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{Day, Value};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "drills")]
#[command(about = "Small exercises: casing, filtering, dispatch and a delayed square")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Square a number after the fixed delay
    Square {
        #[arg(allow_negative_numbers = true)]
        n: f64,
    },

    /// Upper-case text, or lower-case it with --lower
    Format {
        text: String,

        #[arg(long)]
        lower: bool,
    },

    /// Classify a day as weekday or weekend
    Day { day: Day },

    /// Text gives its length, numbers are doubled
    Process {
        #[arg(allow_negative_numbers = true)]
        value: Value,
    },

    /// Run every scenario in a TOML file
    Run {
        /// Path to TOML scenario file
        #[arg(short, long, default_value = "drills.toml")]
        config: String,

        /// Override the report directory from the scenario file
        #[arg(short, long)]
        output: Option<String>,

        /// Show what would run without executing
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Command::Run { config, output, .. } = &self.command {
            validation::validate_path("config", config)?;
            if let Some(output) = output {
                validation::validate_path("output", output)?;
            }
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_with_negative_number() {
        let config = CliConfig::parse_from(["drills", "square", "-3"]);
        assert!(matches!(config.command, Command::Square { n } if n == -3.0));
    }

    #[test]
    fn test_parse_day_and_process() {
        let config = CliConfig::parse_from(["drills", "day", "sunday"]);
        assert!(matches!(config.command, Command::Day { day: Day::Sunday }));

        let config = CliConfig::parse_from(["drills", "-v", "process", "hello"]);
        assert!(config.verbose);
        assert!(matches!(config.command, Command::Process { value: Value::Text(ref t) } if t == "hello"));
    }

    #[test]
    fn test_rejects_unknown_day() {
        assert!(CliConfig::try_parse_from(["drills", "day", "someday"]).is_err());
    }

    #[test]
    fn test_run_defaults_and_validation() {
        let config = CliConfig::parse_from(["drills", "run"]);
        match &config.command {
            Command::Run {
                config: path,
                output,
                dry_run,
            } => {
                assert_eq!(path, "drills.toml");
                assert!(output.is_none());
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(config.validate().is_ok());

        let config = CliConfig::parse_from(["drills", "run", "--config", ""]);
        assert!(config.validate().is_err());
    }
}
