//! Topology builder configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for the topology builder.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TopologyConfig {
    /// Suffix marking the run-details record of a sub-DAG driver.
    #[builder(default = "\"-driver\".to_owned()")]
    pub driver_suffix: String,

    /// Scope id of the top-level DAG, used to prefix its artifact ids.
    #[builder(default = "\"root\".to_owned()")]
    pub root_scope: String,

    /// Whether group nodes start collapsed.
    #[builder(default = "true")]
    pub collapse_groups: bool,
}

impl TopologyConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.driver_suffix.as_ref().is_some_and(String::is_empty) {
            return Err("driver_suffix must not be empty".into());
        }
        if self.root_scope.as_ref().is_some_and(|scope| scope.trim().is_empty()) {
            return Err("root_scope must not be empty".into());
        }
        Ok(())
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            driver_suffix: "-driver".to_owned(),
            root_scope: "root".to_owned(),
            collapse_groups: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let config = TopologyConfigBuilder::default().build().unwrap();
        assert_eq!(config, TopologyConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = TopologyConfigBuilder::default()
            .root_scope("pipeline")
            .collapse_groups(false)
            .build()
            .unwrap();
        assert_eq!(config.root_scope, "pipeline");
        assert_eq!(config.driver_suffix, "-driver");
        assert!(!config.collapse_groups);
    }

    #[test]
    fn test_builder_rejects_empty_values() {
        assert!(TopologyConfigBuilder::default().driver_suffix("").build().is_err());
        assert!(TopologyConfigBuilder::default().root_scope("  ").build().is_err());
    }
}
