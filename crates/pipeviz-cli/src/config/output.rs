//! Output options.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// How the topology is printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The node list as JSON.
    #[default]
    Json,
    /// A plain-text summary.
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Summary => f.write_str("summary"),
        }
    }
}

/// How log events are written to stderr.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct OutputConfig {
    /// Output format.
    #[arg(long, env = "PIPEVIZ_FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, env = "PIPEVIZ_PRETTY")]
    #[serde(default)]
    pub pretty: bool,

    /// Log event format.
    #[arg(long, env = "PIPEVIZ_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,
}
