//! Consumed outputs per producer task within one DAG scope.

use std::collections::BTreeMap;

use pipeviz_core::spec::{ArtifactSource, TaskDef};

use crate::diagnostic::Diagnostic;

/// Tracing target for artifact relationship parsing.
const TRACING_TARGET: &str = "pipeviz_topology::index";

/// One consumption of a producer's output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactConsumer<'a> {
    /// Output key on the producer's component.
    pub output_artifact_key: &'a str,
    /// Name the consumer gives the artifact.
    pub artifact_id: &'a str,
    /// Id of the consuming task.
    pub consumer_task: &'a str,
}

/// Consumed output artifacts keyed by producer task id.
///
/// Built for the siblings of a single DAG scope; nested scopes get their own index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskArtifactIndex<'a> {
    producers: BTreeMap<&'a str, Vec<ArtifactConsumer<'a>>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TaskArtifactIndex<'a> {
    /// Indexes every artifact input bound to a sibling's output.
    ///
    /// Bindings missing a producer task or an output key are dropped and
    /// reported as [`Diagnostic::MalformedArtifactInput`].
    pub fn build(scope: &str, tasks: &'a BTreeMap<String, TaskDef>) -> Self {
        let mut index = Self::default();

        for (task_id, task) in tasks {
            for (input_key, input) in task.artifact_inputs() {
                match input.source() {
                    ArtifactSource::Task {
                        producer_task,
                        output_artifact_key,
                    } => {
                        index
                            .producers
                            .entry(producer_task)
                            .or_default()
                            .push(ArtifactConsumer {
                                output_artifact_key,
                                artifact_id: input_key,
                                consumer_task: task_id,
                            });
                    }
                    ArtifactSource::Component(_) => {}
                    ArtifactSource::Malformed => {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            scope,
                            task_id = %task_id,
                            input_key,
                            "issue constructing artifact node, dropping input"
                        );
                        index.diagnostics.push(Diagnostic::MalformedArtifactInput {
                            scope: scope.to_owned(),
                            task_id: task_id.clone(),
                            input_key: input_key.to_owned(),
                        });
                    }
                }
            }
        }

        index
    }

    /// Returns the consumptions of a producer's outputs, in task order.
    pub fn consumers(&self, producer_task: &str) -> &[ArtifactConsumer<'a>] {
        self.producers
            .get(producer_task)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the name the first consumer gives to a producer's output.
    pub fn artifact_id(&self, producer_task: &str, output_artifact_key: &str) -> Option<&'a str> {
        self.consumers(producer_task)
            .iter()
            .find(|consumer| consumer.output_artifact_key == output_artifact_key)
            .map(|consumer| consumer.artifact_id)
    }

    /// Returns the number of producers with consumed outputs.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Returns whether no output is consumed in this scope.
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Returns the problems found while indexing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Moves the problems found while indexing out of the index.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
