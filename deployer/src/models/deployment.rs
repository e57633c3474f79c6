//! Deployment models

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single file to upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Deployment key, also the multipart field name
    pub name: String,

    /// Location of the file on disk
    pub path: PathBuf,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Everything sent to the engine in one deployment call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentDescriptor {
    /// Deployment name
    pub name: String,

    /// Tenant the deployment belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Source tag recorded by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Ask the engine to skip resources that did not change
    #[serde(default)]
    pub deploy_changed_only: bool,

    /// Files to upload
    #[serde(default)]
    pub resources: Vec<ResourceRef>,
}

impl DeploymentDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Resources with duplicate names collapsed, the last path winning.
    ///
    /// A name keeps the position of its first occurrence.
    pub fn unique_resources(&self) -> Vec<&ResourceRef> {
        let mut unique: Vec<&ResourceRef> = Vec::with_capacity(self.resources.len());
        for resource in &self.resources {
            match unique.iter_mut().find(|r| r.name == resource.name) {
                Some(slot) => *slot = resource,
                None => unique.push(resource),
            }
        }
        unique
    }
}
