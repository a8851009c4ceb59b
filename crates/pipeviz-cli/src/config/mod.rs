//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── input: InputConfig       # Spec, status source, platform spec
//! ├── topology: TopologyArgs   # Driver suffix, root scope, group collapse
//! └── output: OutputConfig     # Output and log formats
//! ```
//!
//! Every option can also be set through a `PIPEVIZ_*` environment variable.
//!
//! # Example
//!
//! ```bash
//! pipeviz --spec pipeline.json --run-details run.json --format summary
//! ```

mod input;
mod output;
mod topology;

use anyhow::Context;
use clap::Parser;
pub use input::InputConfig;
pub use output::{LogFormat, OutputConfig, OutputFormat};
use serde::{Deserialize, Serialize};
pub use topology::TopologyArgs;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_CONFIG;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "pipeviz")]
#[command(about = "Prints the run topology of a compiled pipeline")]
#[command(version)]
pub struct Cli {
    /// Input files.
    #[clap(flatten)]
    pub input: InputConfig,

    /// Topology builder options.
    #[clap(flatten)]
    pub topology: TopologyArgs,

    /// Output options.
    #[clap(flatten)]
    pub output: OutputConfig,
}

impl Cli {
    /// Initializes tracing on stderr with environment-based filtering.
    ///
    /// Defaults to `warn` so that only build diagnostics reach the terminal.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let registry = tracing_subscriber::registry().with(filter);

        match self.output.log_format {
            LogFormat::Text => registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init(),
        }
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.topology
            .to_config()
            .context("invalid topology configuration")?;
        Ok(())
    }

    /// Logs configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            spec = %self.input.spec.display(),
            run_details = ?self.input.run_details,
            executions = ?self.input.executions,
            platform_spec = ?self.input.platform_spec,
            format = %self.output.format,
            "cli configuration"
        );
    }
}
