//! Pipeline intermediate representation.
//!
//! This module models the compiled pipeline spec consumed by the topology builder:
//! - [`PipelineSpec`]: components, executors and the root DAG
//! - [`ComponentDef`]: either a single executor or a nested [`Dag`]
//! - [`TaskDef`]: one scheduled task inside a DAG scope
//! - [`ArtifactTypeDescriptor`]: the schema of an artifact
//! - [`PlatformSpec`]: Kubernetes-specific executor settings
//! - [`SpecDocument`]: a spec as returned by the run API, bare or wrapped

mod artifact;
mod component;
mod executor;
mod pipeline;
mod platform;
mod task;

pub use artifact::ArtifactTypeDescriptor;
pub use component::{
    ArtifactDefinition, ComponentBody, ComponentDef, Dag, IoDefinition, ParameterDefinition,
    ParameterType,
};
pub use executor::{ContainerSpec, ExecutorDef, ImporterSpec};
pub use pipeline::{DeploymentSpec, PipelineInfo, PipelineSpec, RootComponent, SpecDocument};
pub use platform::{
    KubernetesDeployment, KubernetesExecutor, KubernetesPlatform, PlatformSpec, Platforms, PvcMount,
};
pub use task::{
    ArtifactInput, ArtifactSource, ComponentRef, ParameterInput, TaskDef, TaskInfo, TaskInputs,
    TaskOutputArtifact, TaskOutputParameter,
};
