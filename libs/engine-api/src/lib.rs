//! Camunda engine REST models
//!
//! Only the parts of the engine API that a deployment client needs.

pub mod models;

pub use models::{ArtifactKind, DeployedArtifact, DeploymentResult};
