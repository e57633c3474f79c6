//! Deployment result handling

pub mod summary;

pub use summary::{summarize, ArtifactSummary, DeploymentSummary};
