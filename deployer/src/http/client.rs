//! HTTP client implementation

use std::error::Error as _;

use reqwest::multipart::Form;
use reqwest::{Client, header::HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::errors::DeployError;
use crate::http::auth::build_endpoint_headers;
use crate::http::form::ResourceReadError;
use crate::models::endpoint::EndpointConfig;

/// HTTP client for the engine REST API
pub struct HttpClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpClient {
    /// Create a new HTTP client for an endpoint.
    ///
    /// Fails with a configuration error before any I/O when the endpoint is
    /// invalid. No request timeout is set; callers that need one wrap the call.
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, DeployError> {
        endpoint.validate()?;

        let base_url = endpoint.url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            DeployError::ConfigError(format!("invalid endpoint URL '{}': {}", base_url, e))
        })?;

        let headers = build_endpoint_headers(endpoint)?;

        let client = Client::builder()
            .build()
            .map_err(|e| DeployError::setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    /// Make a multipart POST request.
    ///
    /// `context` names the operation in errors and logs.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        context: &str,
    ) -> Result<T, DeployError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        // The multipart content type is applied after the static headers.
        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_send_error(e, context))?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("HTTP POST failed: {} - {}", status, body);
            return Err(DeployError::ServerRejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DeployError::MalformedResponse(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| DeployError::MalformedResponse(e.to_string()))
    }
}

/// Map a transport failure onto the deployment error taxonomy.
///
/// A resource that fails while its part is streamed surfaces as a request
/// error with the [`ResourceReadError`] somewhere in its source chain.
fn classify_send_error(err: reqwest::Error, context: &str) -> DeployError {
    if let Some(read_error) = resource_read_error(&err) {
        error!("Request setup failed for {}: {}", context, read_error);
        return DeployError::setup(read_error.to_string());
    }

    if err.is_builder() || err.is_body() {
        error!("Request setup failed for {}: {}", context, err);
        DeployError::setup(err.to_string())
    } else {
        error!("No response received for {}: {}", context, err);
        DeployError::NoResponse {
            deployment: context.to_string(),
            reason: err.to_string(),
        }
    }
}

fn resource_read_error(err: &reqwest::Error) -> Option<&ResourceReadError> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(read_error) = cause.downcast_ref::<ResourceReadError>() {
            return Some(read_error);
        }
        source = cause.source();
    }
    None
}
