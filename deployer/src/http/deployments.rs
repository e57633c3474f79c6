//! Deployment API client

use engine_api::DeploymentResult;
use tracing::info;

use crate::errors::DeployError;
use crate::http::client::HttpClient;
use crate::http::form::build_form;
use crate::models::deployment::DeploymentDescriptor;
use crate::models::endpoint::EndpointConfig;

impl HttpClient {
    /// Create a deployment from the descriptor's resources
    pub async fn create_deployment(
        &self,
        descriptor: &DeploymentDescriptor,
    ) -> Result<DeploymentResult, DeployError> {
        let form = build_form(descriptor).await?;

        info!(
            deployment = %descriptor.name,
            resources = descriptor.resources.len(),
            "Creating deployment"
        );
        let result: DeploymentResult = self
            .post_multipart("/deployment/create", form, &descriptor.name)
            .await?;
        info!(
            deployment = %descriptor.name,
            artifacts = result.artifact_count(),
            "Deployment accepted"
        );

        Ok(result)
    }
}

/// Deploy the descriptor's resources to the endpoint in a single request.
///
/// Never retries. Every failure is classified and returned.
pub async fn deploy(
    endpoint: &EndpointConfig,
    descriptor: &DeploymentDescriptor,
) -> Result<DeploymentResult, DeployError> {
    let client = HttpClient::new(endpoint)?;
    client.create_deployment(descriptor).await
}
