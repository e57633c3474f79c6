//! Created/updated classification of a deployment result

use std::collections::BTreeMap;

use engine_api::{ArtifactKind, DeployedArtifact, DeploymentResult};
use serde::Serialize;

/// One deployed artifact as reported to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    /// Artifact id as returned by the engine
    pub name: String,
    pub key: Option<String>,
    pub resource: Option<String>,
    pub version: Option<i64>,
    pub version_tag: Option<String>,
}

impl ArtifactSummary {
    fn project(name: &str, artifact: &DeployedArtifact) -> Self {
        Self {
            name: name.to_string(),
            key: artifact.key.clone(),
            resource: artifact.resource.clone(),
            version: artifact.version,
            version_tag: artifact.version_tag.clone(),
        }
    }

    /// An artifact is new exactly when its version is 1. Everything else,
    /// including a missing version, counts as an update.
    pub fn is_created(&self) -> bool {
        self.version == Some(1)
    }
}

/// Deployed artifacts grouped by kind, with created/updated totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    /// Non-empty kinds only
    pub by_kind: BTreeMap<ArtifactKind, Vec<ArtifactSummary>>,
    pub created: usize,
    pub updated: usize,
}

impl DeploymentSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated
    }

    /// Nothing was created or updated
    pub fn is_noop(&self) -> bool {
        self.total() == 0
    }
}

/// Summarize a deployment result
pub fn summarize(result: &DeploymentResult) -> DeploymentSummary {
    let mut summary = DeploymentSummary::default();

    for kind in ArtifactKind::ALL {
        let artifacts: Vec<ArtifactSummary> = result
            .deployed(kind)
            .into_iter()
            .flatten()
            .map(|(name, artifact)| ArtifactSummary::project(name, artifact))
            .collect();

        let created = artifacts.iter().filter(|a| a.is_created()).count();
        summary.created += created;
        summary.updated += artifacts.len() - created;

        if !artifacts.is_empty() {
            summary.by_kind.insert(kind, artifacts);
        }
    }

    summary
}
