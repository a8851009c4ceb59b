//! Output artifacts declared by components.

use std::collections::BTreeMap;

use pipeviz_core::spec::{ArtifactTypeDescriptor, ComponentDef};

/// Declared output artifacts keyed by component id, then artifact key.
///
/// Only components declaring at least one output artifact are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentArtifactIndex<'a> {
    components: BTreeMap<&'a str, BTreeMap<&'a str, &'a ArtifactTypeDescriptor>>,
}

impl<'a> ComponentArtifactIndex<'a> {
    /// Indexes the output artifacts of every component.
    pub fn build(components: &'a BTreeMap<String, ComponentDef>) -> Self {
        let components = components
            .iter()
            .filter_map(|(id, component)| {
                let artifacts: BTreeMap<_, _> = component
                    .output_artifacts()
                    .map(|(key, definition)| (key, &definition.artifact_type))
                    .collect();
                (!artifacts.is_empty()).then_some((id.as_str(), artifacts))
            })
            .collect();

        Self { components }
    }

    /// Returns the output artifacts of a component.
    pub fn artifacts(
        &self,
        component: &str,
    ) -> impl Iterator<Item = (&'a str, &'a ArtifactTypeDescriptor)> + '_ {
        self.components
            .get(component)
            .into_iter()
            .flat_map(|artifacts| artifacts.iter().map(|(key, descriptor)| (*key, *descriptor)))
    }

    /// Returns the type of one output artifact.
    pub fn artifact_type(&self, component: &str, key: &str) -> Option<&'a ArtifactTypeDescriptor> {
        self.components.get(component)?.get(key).copied()
    }

    /// Returns whether the component declares any output artifact.
    pub fn contains(&self, component: &str) -> bool {
        self.components.contains_key(component)
    }

    /// Returns the number of indexed components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns whether no component declares output artifacts.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
