//! Printing of a built topology.

use std::io::Write;

use anyhow::Context;
use pipeviz_core::spec::SpecDocument;
use pipeviz_topology::{GraphNode, NodeId, NodeKind, PipelineTopology};

use crate::TRACING_TARGET_OUTPUT;

/// Writes the node list as JSON.
pub fn json(topology: &PipelineTopology, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let nodes = topology.nodes();
    let written = if pretty {
        serde_json::to_writer_pretty(&mut *out, nodes)
    } else {
        serde_json::to_writer(&mut *out, nodes)
    };
    written.context("failed to write topology")?;
    writeln!(out).context("failed to write topology")
}

/// Writes a plain-text summary: counts, diagnostics, then one line per node
/// in run order.
pub fn summary(
    document: &SpecDocument,
    topology: &PipelineTopology,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write_summary(document, topology, out).context("failed to write summary")
}

fn write_summary(
    document: &SpecDocument,
    topology: &PipelineTopology,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let name = document
        .spec
        .pipeline_info
        .as_ref()
        .map(|info| info.display_name.as_deref().unwrap_or(&info.name))
        .unwrap_or("(unnamed)");
    let count = |kind: &str| {
        topology
            .nodes()
            .iter()
            .filter(|node| node.kind.type_label() == kind)
            .count()
    };
    let tasks: Vec<_> = topology
        .nodes()
        .iter()
        .filter(|node| !node.is_artifact())
        .collect();
    let finished = tasks
        .iter()
        .filter(|node| node.status.is_some_and(|status| status.is_finished()))
        .count();

    writeln!(out, "pipeline: {name}")?;
    writeln!(
        out,
        "nodes: {} (tasks: {}, groups: {}, artifacts: {})",
        topology.len(),
        count("task"),
        count("group_task"),
        count("artifact"),
    )?;
    writeln!(out, "finished: {finished}/{}", tasks.len())?;

    for diagnostic in topology.diagnostics() {
        writeln!(out, "warning: {diagnostic}")?;
    }

    let order: Vec<&NodeId> = match topology.topological_order() {
        Ok(order) => order,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_OUTPUT,
                error = %error,
                "printing nodes in build order"
            );
            topology.nodes().iter().map(|node| &node.id).collect()
        }
    };

    for id in order {
        if let Some(node) = topology.node(id.as_str()) {
            write_node(node, out)?;
        }
    }

    Ok(())
}

fn write_node(node: &GraphNode, out: &mut impl Write) -> std::io::Result<()> {
    let status = node.status.map_or_else(|| "-".to_owned(), |status| status.to_string());
    write!(out, "{:<10} {:<12} {}", node.kind.type_label(), status, node.id)?;

    match &node.kind {
        NodeKind::Artifact(details) => write!(out, " [{}]", details.artifact_type)?,
        NodeKind::Task { details } | NodeKind::GroupTask { details, .. } => {
            if details.display_name != node.id.as_str() {
                write!(out, " \"{}\"", details.display_name)?;
            }
        }
    }

    if !node.run_after.is_empty() {
        let run_after: Vec<&str> = node.run_after.iter().map(NodeId::as_str).collect();
        write!(out, " <- {}", run_after.join(", "))?;
    }

    writeln!(out)
}
