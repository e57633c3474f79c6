//! camunda-deploy library
//!
//! Uploads BPMN/DMN/HTML models to a Camunda engine in a single multipart
//! deployment request and classifies the deployed artifacts as created or
//! updated.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod utils;

pub use deploy::summary::{summarize, ArtifactSummary, DeploymentSummary};
pub use errors::DeployError;
pub use filesys::resolve::resolve;
pub use http::deployments::deploy;
pub use models::deployment::{DeploymentDescriptor, ResourceRef};
pub use models::endpoint::{AuthSpec, EndpointConfig};
