//! API models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Artifacts of one kind, keyed by artifact id
pub type DeployedArtifacts = BTreeMap<String, DeployedArtifact>;

/// Response of `POST /deployment/create`
///
/// Only the four `deployed*` collections are modelled. Every other top-level
/// key the engine sends (`id`, `links`, `deploymentTime`, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_process_definitions: Option<DeployedArtifacts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_case_definitions: Option<DeployedArtifacts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_decision_definitions: Option<DeployedArtifacts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_decision_requirements_definitions: Option<DeployedArtifacts>,
}

impl DeploymentResult {
    /// Artifacts deployed for the given kind, `None` when the engine omitted them
    pub fn deployed(&self, kind: ArtifactKind) -> Option<&DeployedArtifacts> {
        match kind {
            ArtifactKind::ProcessDefinition => self.deployed_process_definitions.as_ref(),
            ArtifactKind::CaseDefinition => self.deployed_case_definitions.as_ref(),
            ArtifactKind::DecisionDefinition => self.deployed_decision_definitions.as_ref(),
            ArtifactKind::DecisionRequirementsDefinition => {
                self.deployed_decision_requirements_definitions.as_ref()
            }
        }
    }

    /// Total number of artifacts across all kinds
    pub fn artifact_count(&self) -> usize {
        ArtifactKind::ALL
            .iter()
            .filter_map(|kind| self.deployed(*kind))
            .map(|artifacts| artifacts.len())
            .sum()
    }
}

/// A single deployed definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedArtifact {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub resource: Option<String>,

    /// Engine-assigned version, starts at 1 for a new definition key
    #[serde(default)]
    pub version: Option<i64>,

    #[serde(default)]
    pub version_tag: Option<String>,
}

/// The closed set of artifact kinds a deployment can produce
///
/// Variant order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    #[serde(rename = "processDefinitions")]
    ProcessDefinition,

    #[serde(rename = "caseDefinitions")]
    CaseDefinition,

    #[serde(rename = "decisionDefinitions")]
    DecisionDefinition,

    #[serde(rename = "decisionRequirementsDefinitions")]
    DecisionRequirementsDefinition,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::ProcessDefinition,
        ArtifactKind::CaseDefinition,
        ArtifactKind::DecisionDefinition,
        ArtifactKind::DecisionRequirementsDefinition,
    ];

    /// Label used when reporting
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::ProcessDefinition => "processDefinitions",
            ArtifactKind::CaseDefinition => "caseDefinitions",
            ArtifactKind::DecisionDefinition => "decisionDefinitions",
            ArtifactKind::DecisionRequirementsDefinition => "decisionRequirementsDefinitions",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
