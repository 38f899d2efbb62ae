//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::audience::Audience;

/// ListenDrift - attention-drop analysis for recorded speech
#[derive(Parser, Debug)]
#[command(name = "listendrift")]
#[command(version)]
#[command(about = "Analyze where a talk loses its listeners")]
#[command(long_about = None)]
pub struct Cli {
    /// Audio file to upload for analysis
    #[arg(value_name = "FILE", conflicts_with = "record")]
    pub file: Option<PathBuf>,

    /// Record from the microphone instead of reading a file
    /// (Ctrl-C stops and uploads, a second Ctrl-C discards)
    #[arg(short, long)]
    pub record: bool,

    /// Audience to score the finished analysis against
    #[arg(short, long, value_name = "AUDIENCE")]
    pub audience: Option<AudienceArg>,

    /// Write the rendered report to this path after analysis
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Override the analysis API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Audience argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AudienceArg {
    General,
    Students,
    Professionals,
    Interviews,
    Marketing,
}

impl From<AudienceArg> for Audience {
    fn from(arg: AudienceArg) -> Self {
        match arg {
            AudienceArg::General => Audience::General,
            AudienceArg::Students => Audience::Students,
            AudienceArg::Professionals => Audience::Professionals,
            AudienceArg::Interviews => Audience::Interviews,
            AudienceArg::Marketing => Audience::Marketing,
        }
    }
}

impl From<Audience> for AudienceArg {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::General => AudienceArg::General,
            Audience::Students => AudienceArg::Students,
            Audience::Professionals => AudienceArg::Professionals,
            Audience::Interviews => AudienceArg::Interviews,
            Audience::Marketing => AudienceArg::Marketing,
        }
    }
}

/// What to analyze
#[derive(Debug, Clone)]
pub enum AnalyzeSource {
    /// Upload an existing audio file
    File(PathBuf),
    /// Record from the microphone, then upload
    Record,
}

/// Parsed analyze options
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub source: AnalyzeSource,
    /// Audience to score against after the analysis, if any
    pub audience: Option<Audience>,
    /// Where to write the rendered report, if requested
    pub report: Option<PathBuf>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_base_url",
    "auth_base_url",
    "access_token",
    "max_upload_mb",
    "poll_interval_ms",
    "max_poll_attempts",
    "audience",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
