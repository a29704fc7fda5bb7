use crate::utils::error::{FormError, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "leave-form")]
#[command(about = "Fill in and submit a leave request from the terminal")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "leave-form.toml", global = true)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate and submit a leave request
    Submit {
        /// Field value as name=value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,

        /// File to attach (validated for size, not uploaded)
        #[arg(long)]
        attachment: Option<String>,

        /// Validate and print the payload without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show or change the stored theme preference
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeAction {
    Show,
    Dark,
    Light,
}

/// 解析 `name=value`，值可以包含等號
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(FormError::InvalidConfigValueError {
            field: "--set".to_string(),
            value: raw.to_string(),
            reason: "Expected NAME=VALUE".to_string(),
        }),
    }
}
