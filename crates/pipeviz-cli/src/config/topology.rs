//! Topology builder options.

use clap::Args;
use pipeviz_topology::{TopologyConfig, TopologyConfigBuilder, TopologyConfigBuilderError};
use serde::{Deserialize, Serialize};

/// Options passed through to the topology builder.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct TopologyArgs {
    /// Suffix marking the status record of a sub-DAG driver.
    #[arg(long, env = "PIPEVIZ_DRIVER_SUFFIX", default_value = "-driver")]
    pub driver_suffix: String,

    /// Scope id of the top-level DAG, used to prefix its artifact ids.
    #[arg(long, env = "PIPEVIZ_ROOT_SCOPE", default_value = "root")]
    pub root_scope: String,

    /// Start group nodes expanded instead of collapsed.
    #[arg(long, env = "PIPEVIZ_EXPAND_GROUPS")]
    #[serde(default)]
    pub expand_groups: bool,
}

impl TopologyArgs {
    /// Builds and validates the topology configuration.
    pub fn to_config(&self) -> Result<TopologyConfig, TopologyConfigBuilderError> {
        TopologyConfigBuilder::default()
            .driver_suffix(self.driver_suffix.as_str())
            .root_scope(self.root_scope.as_str())
            .collapse_groups(!self.expand_groups)
            .build()
    }
}
