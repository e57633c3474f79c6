//! Multipart body for `POST /deployment/create`

use std::path::PathBuf;

use futures::{stream, StreamExt, TryStreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use thiserror::Error;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::errors::DeployError;
use crate::models::deployment::{DeploymentDescriptor, ResourceRef};

pub const DEPLOYMENT_NAME: &str = "deployment-name";
pub const TENANT_ID: &str = "tenant-id";
pub const DEPLOYMENT_SOURCE: &str = "deployment-source";
pub const DEPLOY_CHANGED_ONLY: &str = "deploy-changed-only";

/// A resource file that could not be opened or read while the body was sent
#[derive(Debug, Error)]
#[error("cannot read resource '{name}' at {}: {source}", .path.display())]
pub struct ResourceReadError {
    pub name: String,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Build the deployment form.
///
/// Text fields come first, in a fixed order, followed by one file part per
/// unique resource name. Field names are sent verbatim, so `models/a.bpmn`
/// stays `models/a.bpmn` on the wire.
///
/// Resources are only checked here. Each file is opened when its part is
/// serialized and closed once it has been read or the body is dropped, so at
/// most one resource file is open at a time.
pub async fn build_form(descriptor: &DeploymentDescriptor) -> Result<Form, DeployError> {
    let mut form = Form::new()
        .percent_encode_noop()
        .text(DEPLOYMENT_NAME, descriptor.name.clone());

    if let Some(tenant_id) = non_empty(descriptor.tenant_id.as_deref()) {
        form = form.text(TENANT_ID, tenant_id.to_string());
    }

    if let Some(source) = non_empty(descriptor.source.as_deref()) {
        form = form.text(DEPLOYMENT_SOURCE, source.to_string());
    }

    form = form.text(DEPLOY_CHANGED_ONLY, descriptor.deploy_changed_only.to_string());

    for resource in descriptor.unique_resources() {
        let part = file_part(resource).await?;
        form = form.part(resource.name.clone(), part);
    }

    Ok(form)
}

async fn file_part(resource: &ResourceRef) -> Result<Part, DeployError> {
    let metadata = fs::metadata(&resource.path).await.map_err(|e| {
        DeployError::setup(format!(
            "cannot stat resource '{}' at {}: {}",
            resource.name,
            resource.path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(DeployError::setup(format!(
            "resource '{}' at {} is not a file",
            resource.name,
            resource.path.display()
        )));
    }

    debug!("Queued resource {} ({} bytes)", resource.name, metadata.len());

    let file_name = resource
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resource.name.clone());

    Part::stream_with_length(lazy_file_body(resource), metadata.len())
        .file_name(file_name)
        .mime_str("application/octet-stream")
        .map_err(|e| DeployError::setup(e.to_string()))
}

/// A body that opens the file on first poll and streams it
fn lazy_file_body(resource: &ResourceRef) -> Body {
    let name = resource.name.clone();
    let path = resource.path.clone();

    let chunks = stream::once(fs::File::open(path.clone()))
        .map_ok(ReaderStream::new)
        .try_flatten()
        .map_err(move |source| ResourceReadError {
            name: name.clone(),
            path: path.clone(),
            source,
        });

    Body::wrap_stream(chunks.boxed())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
