//! Input files and their loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use pipeviz_core::run::{ExecutionRecord, RunDetails};
use pipeviz_core::spec::{PlatformSpec, SpecDocument};
use pipeviz_topology::StatusSource;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_INPUT;

/// Input file locations.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct InputConfig {
    /// Pipeline spec, bare or wrapped together with its platform spec.
    #[arg(long, env = "PIPEVIZ_SPEC")]
    pub spec: PathBuf,

    /// Run details reported by the pipelines API.
    #[arg(long, env = "PIPEVIZ_RUN_DETAILS", conflicts_with = "executions")]
    pub run_details: Option<PathBuf>,

    /// Execution records read from the metadata store.
    #[arg(long, env = "PIPEVIZ_EXECUTIONS")]
    pub executions: Option<PathBuf>,

    /// Platform spec; replaces one embedded in the pipeline document.
    #[arg(long, env = "PIPEVIZ_PLATFORM_SPEC")]
    pub platform_spec: Option<PathBuf>,
}

/// Loaded and decoded inputs.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// The pipeline document.
    pub document: SpecDocument,
    /// Per-task run state, if any was given.
    pub status: Option<StatusInput>,
}

/// A decoded status source.
#[derive(Debug, Clone)]
pub enum StatusInput {
    /// Run details.
    RunDetails(RunDetails),
    /// Execution records.
    Executions(Vec<ExecutionRecord>),
}

impl StatusInput {
    /// Borrows the status source for the topology builder.
    pub fn source(&self) -> StatusSource<'_> {
        match self {
            Self::RunDetails(details) => StatusSource::RunDetails(details),
            Self::Executions(records) => StatusSource::Executions(records),
        }
    }
}

impl InputConfig {
    /// Reads and decodes every configured input.
    pub fn load(&self) -> anyhow::Result<Inputs> {
        let mut document = SpecDocument::from_json(&read(&self.spec)?)
            .with_context(|| format!("invalid pipeline spec in {}", self.spec.display()))?;

        if let Some(path) = &self.platform_spec {
            let platform: PlatformSpec = serde_json::from_str(&read(path)?)
                .with_context(|| format!("invalid platform spec in {}", path.display()))?;
            document.platform = Some(platform);
        }

        let status = match (&self.run_details, &self.executions) {
            (Some(path), _) => Some(StatusInput::RunDetails(
                RunDetails::from_json(&read(path)?)
                    .with_context(|| format!("invalid run details in {}", path.display()))?,
            )),
            (None, Some(path)) => Some(StatusInput::Executions(
                ExecutionRecord::list_from_json(&read(path)?)
                    .with_context(|| format!("invalid execution records in {}", path.display()))?,
            )),
            (None, None) => None,
        };

        tracing::info!(
            target: TRACING_TARGET_INPUT,
            tasks = document.spec.root.dag.tasks.len(),
            components = document.spec.components.len(),
            has_platform_spec = document.platform.is_some(),
            has_status = status.is_some(),
            "loaded inputs"
        );

        Ok(Inputs { document, status })
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
