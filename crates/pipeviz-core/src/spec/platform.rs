//! Platform-specific executor settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::task::TaskOutputParameter;

/// Platform configuration compiled alongside a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Per-platform settings.
    #[serde(default)]
    pub platforms: Platforms,
}

impl PlatformSpec {
    /// Returns the volume mounts declared for an executor.
    pub fn pvc_mounts(&self, executor_label: &str) -> &[PvcMount] {
        self.platforms
            .kubernetes
            .as_ref()
            .and_then(|kubernetes| kubernetes.deployment_spec.executors.get(executor_label))
            .map(|executor| executor.pvc_mount.as_slice())
            .unwrap_or_default()
    }
}

/// Settings per target platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platforms {
    /// Kubernetes settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesPlatform>,
}

/// Kubernetes settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesPlatform {
    /// Executor settings.
    #[serde(default)]
    pub deployment_spec: KubernetesDeployment,
}

/// Kubernetes executor settings keyed by executor label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesDeployment {
    /// Settings keyed by executor label.
    #[serde(default)]
    pub executors: BTreeMap<String, KubernetesExecutor>,
}

/// Kubernetes settings of one executor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesExecutor {
    /// Persistent volume claims mounted into the container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvc_mount: Vec<PvcMount>,
}

/// A persistent volume claim mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvcMount {
    /// Path inside the container.
    #[serde(default)]
    pub mount_path: String,
    /// Claim created by another task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_output_parameter: Option<TaskOutputParameter>,
    /// Name of an existing claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
}

impl PvcMount {
    /// Returns the claim name: the producing task, else the constant.
    pub fn claim_name(&self) -> &str {
        self.task_output_parameter
            .as_ref()
            .map(|output| output.producer_task.as_str())
            .or(self.constant.as_deref())
            .unwrap_or_default()
    }
}
