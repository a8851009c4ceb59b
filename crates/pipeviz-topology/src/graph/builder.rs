//! Recursive construction of the pipeline topology.

use std::collections::BTreeMap;

use pipeviz_core::run::{ExecutionRecord, RunDetails};
use pipeviz_core::spec::{
    ArtifactSource, ArtifactTypeDescriptor, ComponentDef, PipelineSpec, PlatformSpec,
    SpecDocument, TaskDef,
};

use super::details::{TaskDetails, display_name};
use super::id::{IdAllocator, NodeId};
use super::node::{ArtifactDetails, GraphNode, NodeKind};
use super::prune::prune_dangling;
use super::topology::PipelineTopology;
use crate::config::TopologyConfig;
use crate::diagnostic::Diagnostic;
use crate::index::{ComponentArtifactIndex, TaskArtifactIndex};
use crate::status::{StatusResolver, StatusSource};

/// Tracing target for topology construction.
const TRACING_TARGET: &str = "pipeviz_topology::builder";

/// Major IR schema version this builder understands.
const SUPPORTED_SCHEMA_MAJOR: u64 = 2;

/// Builds a [`PipelineTopology`] from a pipeline spec and an optional status source.
///
/// Building never fails. Tasks with unknown components and malformed artifact
/// bindings are left out and reported as [`Diagnostic`]s on the result.
#[derive(Debug, Clone)]
pub struct TopologyBuilder<'a> {
    spec: &'a PipelineSpec,
    platform: Option<&'a PlatformSpec>,
    status: Option<StatusSource<'a>>,
    config: TopologyConfig,
}

impl<'a> TopologyBuilder<'a> {
    /// Creates a builder for a pipeline spec.
    pub fn new(spec: &'a PipelineSpec) -> Self {
        Self {
            spec,
            platform: None,
            status: None,
            config: TopologyConfig::default(),
        }
    }

    /// Creates a builder for a pipeline document, including its platform spec.
    pub fn from_document(document: &'a SpecDocument) -> Self {
        let builder = Self::new(&document.spec);
        match &document.platform {
            Some(platform) => builder.with_platform_spec(platform),
            None => builder,
        }
    }

    /// Sets the platform spec used for volume mounts.
    pub fn with_platform_spec(mut self, platform: &'a PlatformSpec) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the source of per-task run state.
    pub fn with_status(mut self, source: impl Into<StatusSource<'a>>) -> Self {
        self.status = Some(source.into());
        self
    }

    /// Reads run state from run details.
    pub fn with_run_details(self, details: &'a RunDetails) -> Self {
        self.with_status(details)
    }

    /// Reads run state from metadata store execution records.
    pub fn with_executions(self, records: &'a [ExecutionRecord]) -> Self {
        self.with_status(records)
    }

    /// Sets the builder configuration.
    pub fn with_config(mut self, config: TopologyConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the builder configuration.
    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Builds the topology.
    ///
    /// The result is rebuilt from scratch on every call and does not borrow
    /// from the inputs.
    pub fn build(&self) -> PipelineTopology {
        let mut diagnostics = Vec::new();
        if let Some(diagnostic) = self.check_schema_version() {
            diagnostics.push(diagnostic);
        }

        let components = ComponentArtifactIndex::build(&self.spec.components);
        let mut walk = Walk {
            spec: self.spec,
            platform: self.platform,
            components: &components,
            resolver: self
                .status
                .map(|source| StatusResolver::new(source, &self.config.driver_suffix)),
            collapse_groups: self.config.collapse_groups,
            ids: IdAllocator::default(),
            nodes: Vec::new(),
            diagnostics,
        };

        let roots = walk.build_scope(
            &self.config.root_scope,
            None,
            &self.spec.root.dag.tasks,
            &mut Vec::new(),
        );
        let nodes = prune_dangling(walk.nodes);

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = nodes.len(),
            root_count = roots.len(),
            diagnostic_count = walk.diagnostics.len(),
            "built pipeline topology"
        );

        PipelineTopology::new(nodes, roots, walk.diagnostics)
    }

    fn check_schema_version(&self) -> Option<Diagnostic> {
        let version = self.spec.schema_version.as_deref()?;
        match self.spec.schema_version() {
            Ok(Some(parsed)) if parsed.major == SUPPORTED_SCHEMA_MAJOR => None,
            Ok(None) => None,
            Ok(Some(_)) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    version,
                    "unsupported pipeline schema version, building anyway"
                );
                Some(Diagnostic::UnsupportedSchemaVersion {
                    version: version.to_owned(),
                })
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    version,
                    error = %error,
                    "unparsable pipeline schema version, building anyway"
                );
                Some(Diagnostic::UnsupportedSchemaVersion {
                    version: version.to_owned(),
                })
            }
        }
    }
}

/// A task whose component resolved, with its claimed ids.
struct ResolvedTask<'s> {
    task_id: &'s str,
    task: &'s TaskDef,
    component_id: &'s str,
    component: &'s ComponentDef,
    node_id: NodeId,
    artifacts: Vec<PlannedArtifact<'s>>,
}

/// An output artifact node to emit for a resolved task.
struct PlannedArtifact<'s> {
    output_key: &'s str,
    artifact_type: &'s ArtifactTypeDescriptor,
    label: &'s str,
    node_id: NodeId,
}

/// State of one build, threaded through the recursion.
struct Walk<'s> {
    spec: &'s PipelineSpec,
    platform: Option<&'s PlatformSpec>,
    components: &'s ComponentArtifactIndex<'s>,
    resolver: Option<StatusResolver<'s>>,
    collapse_groups: bool,
    ids: IdAllocator,
    nodes: Vec<GraphNode>,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> Walk<'s> {
    /// Emits the nodes of one DAG scope and everything nested in it.
    ///
    /// Returns the ids of the scope's direct children. `ancestors` holds the
    /// group components being expanded above this scope.
    fn build_scope(
        &mut self,
        scope: &str,
        parent: Option<&NodeId>,
        tasks: &'s BTreeMap<String, TaskDef>,
        ancestors: &mut Vec<&'s str>,
    ) -> Vec<NodeId> {
        let mut artifact_index = TaskArtifactIndex::build(scope, tasks);
        self.diagnostics.extend(artifact_index.take_diagnostics());

        let resolved = self.resolve_tasks(scope, tasks, &artifact_index);

        let task_ids: BTreeMap<&'s str, &NodeId> = resolved
            .iter()
            .map(|task| (task.task_id, &task.node_id))
            .collect();
        let artifact_ids: BTreeMap<(&'s str, &'s str), &NodeId> = resolved
            .iter()
            .flat_map(|task| {
                task.artifacts
                    .iter()
                    .map(move |artifact| ((task.task_id, artifact.output_key), &artifact.node_id))
            })
            .collect();

        let mut children = Vec::new();
        for task in &resolved {
            let run_status = self.resolver.as_ref().and_then(|resolver| {
                resolver.resolve(task.task_id, Some(display_name(task.task_id, task.task)))
            });
            let status = run_status.as_ref().and_then(|status| status.state.translate());

            for artifact in &task.artifacts {
                let consumers = artifact_index
                    .consumers(task.task_id)
                    .iter()
                    .filter(|consumer| consumer.output_artifact_key == artifact.output_key)
                    .filter_map(|consumer| task_ids.get(consumer.consumer_task))
                    .map(|id| (*id).clone())
                    .collect();

                self.nodes.push(GraphNode {
                    id: artifact.node_id.clone(),
                    label: artifact.label.to_owned(),
                    run_after: vec![task.node_id.clone()],
                    status,
                    kind: NodeKind::Artifact(ArtifactDetails {
                        producer: task.node_id.clone(),
                        output_key: artifact.output_key.to_owned(),
                        artifact_type: artifact.artifact_type.to_string(),
                        consumers,
                    }),
                });
                children.push(artifact.node_id.clone());
            }

            let run_after = run_after(
                scope,
                task,
                parent,
                &task_ids,
                &artifact_ids,
                &mut self.diagnostics,
            );
            let details = TaskDetails::collect(
                task.task_id,
                task.task,
                task.component,
                self.spec,
                self.platform,
                run_status,
            );

            let kind = match task.component.dag() {
                Some(_) if ancestors.contains(&task.component_id) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        scope,
                        task_id = task.task_id,
                        component = task.component_id,
                        "recursive group component, not expanding"
                    );
                    self.diagnostics.push(Diagnostic::RecursiveComponent {
                        scope: scope.to_owned(),
                        task_id: task.task_id.to_owned(),
                        component: task.component_id.to_owned(),
                    });
                    NodeKind::GroupTask {
                        details,
                        children: Vec::new(),
                        collapsed: self.collapse_groups,
                    }
                }
                Some(dag) => {
                    ancestors.push(task.component_id);
                    let nested = self.build_scope(
                        task.node_id.as_str(),
                        Some(&task.node_id),
                        &dag.tasks,
                        ancestors,
                    );
                    ancestors.pop();
                    NodeKind::GroupTask {
                        details,
                        children: nested,
                        collapsed: self.collapse_groups,
                    }
                }
                None => NodeKind::Task { details },
            };

            self.nodes.push(GraphNode {
                id: task.node_id.clone(),
                label: display_name(task.task_id, task.task).to_owned(),
                run_after,
                status,
                kind,
            });
            children.push(task.node_id.clone());
        }

        children
    }

    /// Resolves components and claims the node ids of one scope.
    ///
    /// All ids of a scope are claimed before any nested scope, so tasks keep
    /// their own ids wherever they are free at the outer level.
    fn resolve_tasks(
        &mut self,
        scope: &str,
        tasks: &'s BTreeMap<String, TaskDef>,
        artifact_index: &TaskArtifactIndex<'s>,
    ) -> Vec<ResolvedTask<'s>> {
        let mut resolved = Vec::with_capacity(tasks.len());

        for (task_id, task) in tasks {
            let component_id = task.component_ref.name.as_str();
            let Some(component) = self.spec.component(component_id) else {
                tracing::warn!(
                    target: TRACING_TARGET,
                    scope,
                    task_id = %task_id,
                    component = component_id,
                    "task references unknown component, skipping"
                );
                self.diagnostics.push(Diagnostic::UnresolvedComponent {
                    scope: scope.to_owned(),
                    task_id: task_id.clone(),
                    component: component_id.to_owned(),
                });
                continue;
            };

            let node_id = self.ids.claim_task(scope, task_id);
            resolved.push(ResolvedTask {
                task_id,
                task,
                component_id,
                component,
                node_id,
                artifacts: Vec::new(),
            });
        }

        let components = self.components;
        for task in &mut resolved {
            task.artifacts = components
                .artifacts(task.component_id)
                .map(|(output_key, artifact_type)| {
                    let label = artifact_index
                        .artifact_id(task.task_id, output_key)
                        .unwrap_or(output_key);
                    PlannedArtifact {
                        output_key,
                        artifact_type,
                        label,
                        node_id: self.ids.claim_artifact(scope, task.task_id, label),
                    }
                })
                .collect();
        }

        resolved
    }
}

/// Computes the nodes a task runs after.
///
/// Explicit dependencies come first, then the artifacts the task consumes from
/// its siblings. A nested task without explicit dependencies runs after its
/// group. Dependencies on tasks that are not resolved siblings are dropped and
/// reported as [`Diagnostic::UnknownDependency`].
fn run_after<'s>(
    scope: &str,
    task: &ResolvedTask<'s>,
    parent: Option<&NodeId>,
    task_ids: &BTreeMap<&'s str, &NodeId>,
    artifact_ids: &BTreeMap<(&'s str, &'s str), &NodeId>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<NodeId> {
    let mut run_after: Vec<NodeId> = Vec::new();
    let mut push = |id: NodeId| {
        if !run_after.contains(&id) {
            run_after.push(id);
        }
    };

    for dependency in &task.task.dependent_tasks {
        let Some(id) = task_ids.get(dependency.as_str()) else {
            tracing::warn!(
                target: TRACING_TARGET,
                scope,
                task_id = task.task_id,
                dependency = %dependency,
                "dependency is not a resolved sibling, dropping"
            );
            diagnostics.push(Diagnostic::UnknownDependency {
                scope: scope.to_owned(),
                task_id: task.task_id.to_owned(),
                dependency: dependency.clone(),
            });
            continue;
        };
        push((*id).clone());
    }

    for (_, input) in task.task.artifact_inputs() {
        if let ArtifactSource::Task {
            producer_task,
            output_artifact_key,
        } = input.source()
            && let Some(id) = artifact_ids.get(&(producer_task, output_artifact_key))
        {
            push((*id).clone());
        }
    }

    if task.task.dependent_tasks.is_empty()
        && let Some(parent) = parent
    {
        push(parent.clone());
    }

    run_after
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pipeviz_core::run::{ExecutionState, RuntimeState, TaskDetail};
    use serde_json::{Value, json};

    use super::*;
    use crate::config::TopologyConfigBuilder;
    use crate::status::NodeStatus;

    fn spec(value: Value) -> PipelineSpec {
        serde_json::from_value(value).unwrap()
    }

    fn model_output() -> Value {
        json!({ "artifacts": { "out1": {
            "artifactType": { "schemaTitle": "system.Model", "schemaVersion": "1" }
        } } })
    }

    /// `t1` produces `out1`, consumed by `t2` as `a1`.
    fn producer_consumer() -> PipelineSpec {
        spec(json!({
            "components": {
                "c1": { "executorLabel": "e1", "outputDefinitions": model_output() },
                "c2": { "executorLabel": "e2" }
            },
            "root": { "dag": { "tasks": {
                "t1": { "taskInfo": { "name": "T1" }, "componentRef": { "name": "c1" } },
                "t2": {
                    "taskInfo": { "name": "T2" },
                    "componentRef": { "name": "c2" },
                    "dependentTasks": ["t1"],
                    "inputs": { "artifacts": { "a1": {
                        "taskOutputArtifact": { "producerTask": "t1", "outputArtifactKey": "out1" }
                    } } }
                }
            } } }
        }))
    }

    /// Root group `a` contains task `b` and group `c`, which contains another `b`.
    fn nested() -> PipelineSpec {
        spec(json!({
            "components": {
                "comp-a": { "dag": { "tasks": {
                    "b": { "taskInfo": { "name": "B" }, "componentRef": { "name": "comp-b" } },
                    "c": { "taskInfo": { "name": "C" }, "componentRef": { "name": "comp-c" }, "dependentTasks": ["b"] }
                } } },
                "comp-b": { "executorLabel": "exec-b", "outputDefinitions": model_output() },
                "comp-c": { "dag": { "tasks": {
                    "b": { "taskInfo": { "name": "B" }, "componentRef": { "name": "comp-b" } }
                } } }
            },
            "root": { "dag": { "tasks": {
                "a": { "taskInfo": { "name": "A" }, "componentRef": { "name": "comp-a" } }
            } } }
        }))
    }

    fn assert_well_formed(topology: &PipelineTopology) {
        let ids: HashSet<&str> = topology.nodes().iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids.len(), topology.len(), "node ids are not unique");
        for node in topology.nodes() {
            for id in &node.run_after {
                assert!(ids.contains(id.as_str()), "{} runs after missing {id}", node.id);
            }
            for id in node.children() {
                assert!(ids.contains(id.as_str()), "{} has missing child {id}", node.id);
            }
        }
    }

    #[test]
    fn test_single_task_with_artifact() {
        let spec = spec(json!({
            "components": { "c1": { "executorLabel": "e1", "outputDefinitions": model_output() } },
            "root": { "dag": { "tasks": {
                "t1": { "taskInfo": { "name": "T1" }, "componentRef": { "name": "c1" } }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);
        assert_eq!(topology.len(), 2);

        let task = topology.node("t1").unwrap();
        assert_eq!(task.label, "T1");
        assert!(matches!(task.kind, NodeKind::Task { .. }));

        let artifact = topology.node("root.t1.out1").unwrap();
        assert_eq!(artifact.label, "out1");
        assert_eq!(artifact.run_after, vec![NodeId::from("t1")]);
        let details = artifact.artifact_details().unwrap();
        assert_eq!(details.artifact_type, "system.Model (1)");
        assert_eq!(details.producer, "t1");
        assert!(details.consumers.is_empty());

        assert_eq!(topology.roots().len(), 2);
        assert!(topology.diagnostics().is_empty());
    }

    #[test]
    fn test_consumer_runs_after_task_and_artifact() {
        let spec = producer_consumer();
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        let artifact = topology.node("root.t1.a1").unwrap();
        assert_eq!(artifact.label, "a1");
        assert_eq!(
            artifact.artifact_details().unwrap().consumers,
            vec![NodeId::from("t2")]
        );

        let consumer = topology.node("t2").unwrap();
        assert_eq!(
            consumer.run_after,
            vec![NodeId::from("t1"), NodeId::from("root.t1.a1")]
        );
    }

    #[test]
    fn test_one_artifact_node_per_output() {
        let spec = spec(json!({
            "components": {
                "producer": { "executorLabel": "e", "outputDefinitions": { "artifacts": {
                    "model": { "artifactType": { "schemaTitle": "system.Model", "schemaVersion": "0.0.1" } },
                    "metrics": { "artifactType": { "schemaTitle": "system.Metrics", "schemaVersion": "0.0.1" } },
                    "dataset": { "artifactType": { "schemaTitle": "system.Dataset", "schemaVersion": "0.0.1" } }
                } } },
                "consumer": { "executorLabel": "e" }
            },
            "root": { "dag": { "tasks": {
                "make": { "componentRef": { "name": "producer" } },
                "use": {
                    "componentRef": { "name": "consumer" },
                    "dependentTasks": ["make"],
                    "inputs": { "artifacts": {
                        "m": { "taskOutputArtifact": { "producerTask": "make", "outputArtifactKey": "model" } },
                        "x": { "taskOutputArtifact": { "producerTask": "make", "outputArtifactKey": "metrics" } },
                        "d": { "taskOutputArtifact": { "producerTask": "make", "outputArtifactKey": "dataset" } }
                    } }
                }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        let artifacts: Vec<_> = topology
            .nodes()
            .iter()
            .filter_map(GraphNode::artifact_details)
            .filter(|details| details.producer == "make")
            .collect();
        assert_eq!(artifacts.len(), 3);
        assert_eq!(topology.node("use").unwrap().run_after.len(), 4);
        assert_eq!(topology.node("make").unwrap().label, "make");
    }

    #[test]
    fn test_nested_groups() {
        let spec = nested();
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        let group = topology.node("a").unwrap();
        assert!(group.is_group());
        assert!(matches!(group.kind, NodeKind::GroupTask { collapsed: true, .. }));
        assert_eq!(
            group.children(),
            &[NodeId::from("a.b.out1"), NodeId::from("b"), NodeId::from("c")]
        );

        let inner = topology.node("b").unwrap();
        assert_eq!(inner.run_after, vec![NodeId::from("a")]);

        let sibling = topology.node("c").unwrap();
        assert_eq!(sibling.run_after, vec![NodeId::from("b")]);
        assert_eq!(
            sibling.children(),
            &[NodeId::from("c.b.out1"), NodeId::from("c.b")]
        );

        let deep = topology.node("c.b").unwrap();
        assert_eq!(deep.label, "B");
        assert_eq!(deep.run_after, vec![NodeId::from("c")]);
        assert_eq!(topology.roots(), &[NodeId::from("a")]);
        assert_eq!(topology.parent("c.b").unwrap().id, "c");
    }

    #[test]
    fn test_build_is_idempotent() {
        let spec = nested();
        let builder = TopologyBuilder::new(&spec);
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn test_unknown_component_is_skipped() {
        let spec = spec(json!({
            "components": { "c1": { "executorLabel": "e1" } },
            "root": { "dag": { "tasks": {
                "ok": { "componentRef": { "name": "c1" }, "dependentTasks": ["missing"] },
                "missing": { "componentRef": { "name": "c404" } },
                "later": { "componentRef": { "name": "c1" }, "dependentTasks": ["ok", "nowhere"] }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        assert!(topology.node("missing").is_none());
        assert!(topology.node("ok").unwrap().run_after.is_empty());
        assert_eq!(topology.node("later").unwrap().run_after, vec![NodeId::from("ok")]);
        assert_eq!(
            topology.diagnostics(),
            &[
                Diagnostic::UnresolvedComponent {
                    scope: "root".to_owned(),
                    task_id: "missing".to_owned(),
                    component: "c404".to_owned(),
                },
                Diagnostic::UnknownDependency {
                    scope: "root".to_owned(),
                    task_id: "later".to_owned(),
                    dependency: "nowhere".to_owned(),
                },
                Diagnostic::UnknownDependency {
                    scope: "root".to_owned(),
                    task_id: "ok".to_owned(),
                    dependency: "missing".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_skipped_dependency_does_not_bind_across_scopes() {
        let spec = spec(json!({
            "components": {
                "comp-step": { "executorLabel": "e1" },
                "comp-group": { "dag": { "tasks": {
                    "prep": { "componentRef": { "name": "comp-gone" } },
                    "train": { "componentRef": { "name": "comp-step" }, "dependentTasks": ["prep"] }
                } } }
            },
            "root": { "dag": { "tasks": {
                "prep": { "componentRef": { "name": "comp-step" } },
                "g": { "componentRef": { "name": "comp-group" } }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        assert!(topology.node("prep").is_some());
        assert!(topology.node("g.prep").is_none());
        assert!(topology.node("train").unwrap().run_after.is_empty());
        assert!(topology.diagnostics().contains(&Diagnostic::UnknownDependency {
            scope: "g".to_owned(),
            task_id: "train".to_owned(),
            dependency: "prep".to_owned(),
        }));
    }

    #[test]
    fn test_artifact_consumption_inside_group() {
        let spec = spec(json!({
            "components": {
                "comp-step": { "executorLabel": "e1", "outputDefinitions": model_output() },
                "comp-group": { "dag": { "tasks": {
                    "p": { "componentRef": { "name": "comp-step" } },
                    "q": {
                        "componentRef": { "name": "comp-step" },
                        "dependentTasks": ["p"],
                        "inputs": { "artifacts": { "model": {
                            "taskOutputArtifact": { "producerTask": "p", "outputArtifactKey": "out1" }
                        } } }
                    }
                } } }
            },
            "root": { "dag": { "tasks": {
                "g": { "componentRef": { "name": "comp-group" } }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        assert_eq!(
            topology.node("q").unwrap().run_after,
            vec![NodeId::from("p"), NodeId::from("g.p.out1")]
        );
        assert_eq!(topology.node("p").unwrap().run_after, vec![NodeId::from("g")]);
        let GraphNode { kind: NodeKind::Artifact(artifact), .. } =
            topology.node("g.p.out1").unwrap()
        else {
            panic!("expected an artifact node");
        };
        assert_eq!(artifact.consumers, vec![NodeId::from("q")]);
        assert!(topology.diagnostics().is_empty());
    }

    #[test]
    fn test_malformed_artifact_input_is_reported() {
        let spec = spec(json!({
            "components": { "c1": { "executorLabel": "e1", "outputDefinitions": model_output() } },
            "root": { "dag": { "tasks": {
                "t1": { "componentRef": { "name": "c1" } },
                "t2": {
                    "componentRef": { "name": "c1" },
                    "inputs": { "artifacts": { "broken": { "taskOutputArtifact": { "producerTask": "t1" } } } }
                }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        assert!(topology.node("root.t1.out1").is_some());
        assert!(topology.node("t2").unwrap().run_after.is_empty());
        assert_eq!(topology.diagnostics().len(), 1);
        assert_eq!(topology.diagnostics()[0].task_id(), Some("t2"));
    }

    #[test]
    fn test_recursive_group_is_not_expanded() {
        let spec = spec(json!({
            "components": {
                "comp-loop": { "dag": { "tasks": {
                    "again": { "componentRef": { "name": "comp-loop" } }
                } } }
            },
            "root": { "dag": { "tasks": {
                "loop": { "componentRef": { "name": "comp-loop" } }
            } } }
        }));
        let topology = TopologyBuilder::new(&spec).build();
        assert_well_formed(&topology);

        assert_eq!(topology.node("loop").unwrap().children(), &[NodeId::from("again")]);
        assert!(topology.node("again").unwrap().children().is_empty());
        assert!(matches!(
            topology.diagnostics(),
            [Diagnostic::RecursiveComponent { task_id, .. }] if task_id == "again"
        ));
    }

    #[test]
    fn test_no_status_source() {
        let spec = producer_consumer();
        let topology = TopologyBuilder::new(&spec).build();
        assert!(topology.nodes().iter().all(|node| node.status.is_none()));
        assert!(
            topology
                .nodes()
                .iter()
                .filter_map(GraphNode::task_details)
                .all(|details| details.run_status.is_none())
        );
    }

    #[test]
    fn test_run_details_status() {
        let spec = producer_consumer();
        let details = RunDetails {
            task_details: vec![
                TaskDetail {
                    display_name: Some("t1".to_owned()),
                    state: RuntimeState::Running,
                    ..Default::default()
                },
                TaskDetail {
                    display_name: Some("t1".to_owned()),
                    state: RuntimeState::Failed,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let topology = TopologyBuilder::new(&spec).with_run_details(&details).build();

        assert_eq!(topology.node("t1").unwrap().status, Some(NodeStatus::Failed));
        assert_eq!(topology.node("root.t1.a1").unwrap().status, Some(NodeStatus::Failed));
        assert_eq!(topology.node("t2").unwrap().status, None);
        assert!(
            topology
                .node("t1")
                .and_then(GraphNode::task_details)
                .and_then(|details| details.run_status.as_ref())
                .is_some()
        );
    }

    #[test]
    fn test_execution_status_by_display_name() {
        let spec = producer_consumer();
        let records = vec![
            ExecutionRecord {
                last_known_state: ExecutionState::Complete,
                ..Default::default()
            }
            .with_property("task_name", "T1"),
            ExecutionRecord {
                last_known_state: ExecutionState::Running,
                ..Default::default()
            }
            .with_property("task_name", "T2-driver"),
        ];
        let topology = TopologyBuilder::new(&spec).with_executions(&records).build();

        assert_eq!(topology.node("t1").unwrap().status, Some(NodeStatus::Succeeded));
        assert_eq!(topology.node("t2").unwrap().status, Some(NodeStatus::Running));
    }

    #[test]
    fn test_config_changes_scope_and_collapse() {
        let spec = nested();
        let config = TopologyConfigBuilder::default()
            .root_scope("pipeline")
            .collapse_groups(false)
            .build()
            .unwrap();
        let topology = TopologyBuilder::new(&spec).with_config(config).build();

        assert!(matches!(
            topology.node("a").unwrap().kind,
            NodeKind::GroupTask { collapsed: false, .. }
        ));

        let spec = producer_consumer();
        let config = TopologyConfigBuilder::default().root_scope("pipeline").build().unwrap();
        let topology = TopologyBuilder::new(&spec).with_config(config).build();
        assert!(topology.node("pipeline.t1.a1").is_some());
    }

    #[test]
    fn test_schema_version_check() {
        let mut spec = producer_consumer();
        spec.schema_version = Some("2.1.0".to_owned());
        assert!(TopologyBuilder::new(&spec).build().diagnostics().is_empty());

        spec.schema_version = Some("3.0.0".to_owned());
        let topology = TopologyBuilder::new(&spec).build();
        assert_eq!(
            topology.diagnostics(),
            &[Diagnostic::UnsupportedSchemaVersion {
                version: "3.0.0".to_owned(),
            }]
        );
        assert!(topology.node("t1").is_some());

        spec.schema_version = Some("two".to_owned());
        assert_eq!(TopologyBuilder::new(&spec).build().diagnostics().len(), 1);
    }

    #[test]
    fn test_topological_order_follows_run_after() {
        let spec = nested();
        let topology = TopologyBuilder::new(&spec).build();
        let order: Vec<&str> = topology
            .topological_order()
            .unwrap()
            .into_iter()
            .map(NodeId::as_str)
            .collect();

        let position = |id: &str| order.iter().position(|other| *other == id).unwrap();
        for edge in topology.edges() {
            assert!(position(edge.source.as_str()) < position(edge.target.as_str()));
        }
    }
}
