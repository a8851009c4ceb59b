#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod render;

use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::Parser;
use pipeviz_topology::TopologyBuilder;

use crate::config::{Cli, OutputFormat};

// Tracing target constants
pub const TRACING_TARGET_CONFIG: &str = "pipeviz_cli::config";
pub const TRACING_TARGET_INPUT: &str = "pipeviz_cli::input";
pub const TRACING_TARGET_OUTPUT: &str = "pipeviz_cli::output";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_OUTPUT,
            error = %error,
            "pipeviz terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    cli.init_tracing();
    cli.log();

    let config = cli
        .topology
        .to_config()
        .context("invalid topology configuration")?;
    let inputs = cli.input.load()?;

    let mut builder = TopologyBuilder::from_document(&inputs.document).with_config(config);
    if let Some(status) = &inputs.status {
        builder = builder.with_status(status.source());
    }
    let topology = builder.build();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.output.format {
        OutputFormat::Json => render::json(&topology, cli.output.pretty, &mut out)?,
        OutputFormat::Summary => render::summary(&inputs.document, &topology, &mut out)?,
    }
    out.flush().context("failed to flush output")?;

    tracing::debug!(
        target: TRACING_TARGET_OUTPUT,
        node_count = topology.len(),
        format = %cli.output.format,
        "printed topology"
    );

    Ok(())
}
