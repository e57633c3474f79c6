//! Deployment settings
//!
//! Settings come from three layers, later layers winning:
//! environment (`NAME`, falling back to the CI action form `INPUT_NAME`),
//! an optional JSON settings file, and `--name=value` command-line arguments.
//! Empty values count as unset at every layer.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::models::deployment::{DeploymentDescriptor, ResourceRef};
use crate::models::endpoint::{AuthSpec, EndpointConfig};

pub const DEFAULT_DEPLOYMENT_NAME: &str = "camunda-deploy";
pub const DEFAULT_MODEL_FOLDER: &str = "models";
pub const DEFAULT_FILE_PATTERN: &str = "*.bpmn|*.dmn|*.html";

/// Deployment settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine REST base URL
    pub camunda_endpoint_url: Option<String>,

    /// Explicit auth type: `none`, `basic` or `bearer`
    pub camunda_auth_type: Option<String>,

    pub camunda_auth_username: Option<String>,

    pub camunda_auth_password: Option<String>,

    pub camunda_auth_bearer: Option<String>,

    pub custom_http_header_name: Option<String>,

    pub custom_http_header_value: Option<String>,

    pub camunda_tenant_id: Option<String>,

    pub deployment_source: Option<String>,

    pub deployment_name: Option<String>,

    /// `true` or `false`
    pub deploy_changed_only: Option<String>,

    /// Folder name searched for anywhere below the working directory
    pub bpmn_model_folder: Option<String>,

    /// `|`-separated file patterns, e.g. `*.bpmn|*.dmn`
    pub bpmn_file_pattern: Option<String>,
}

macro_rules! settings_fields {
    ($mac:ident) => {
        $mac! {
            camunda_endpoint_url => "CAMUNDA_ENDPOINT_URL",
            camunda_auth_type => "CAMUNDA_AUTH_TYPE",
            camunda_auth_username => "CAMUNDA_AUTH_USERNAME",
            camunda_auth_password => "CAMUNDA_AUTH_PASSWORD",
            camunda_auth_bearer => "CAMUNDA_AUTH_BEARER",
            custom_http_header_name => "CUSTOM_HTTP_HEADER_NAME",
            custom_http_header_value => "CUSTOM_HTTP_HEADER_VALUE",
            camunda_tenant_id => "CAMUNDA_TENANT_ID",
            deployment_source => "DEPLOYMENT_SOURCE",
            deployment_name => "DEPLOYMENT_NAME",
            deploy_changed_only => "DEPLOY_CHANGED_ONLY",
            bpmn_model_folder => "BPMN_MODEL_FOLDER",
            bpmn_file_pattern => "BPMN_FILE_PATTERN",
        }
    };
}

impl Settings {
    /// Build settings by looking up each input name (`CAMUNDA_ENDPOINT_URL`, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        macro_rules! build {
            ($($field:ident => $name:literal,)*) => {
                Settings {
                    $($field: non_empty(lookup($name)),)*
                }
            };
        }
        settings_fields!(build)
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| std::env::var(format!("INPUT_{}", name)).ok())
        })
    }

    /// Read settings from `--name=value` arguments.
    ///
    /// Keys match the input names case-insensitively, with `-` and `_`
    /// interchangeable: `--deployment-name=x` sets `DEPLOYMENT_NAME`.
    pub fn from_args(args: &HashMap<String, String>) -> Self {
        let normalized: HashMap<String, &String> = args
            .iter()
            .map(|(k, v)| (k.to_uppercase().replace('-', "_"), v))
            .collect();
        Self::from_lookup(|name| normalized.get(name).map(|v| v.to_string()))
    }

    /// Read settings from a JSON file with snake_case keys
    pub async fn from_file(path: &Path) -> Result<Self, DeployError> {
        File::new(path).read_json().await.map_err(|e| {
            DeployError::ConfigError(format!(
                "unable to read settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Layer `other` on top of `self`; values set in `other` win
    pub fn overlay(self, other: Settings) -> Self {
        let base = self;
        macro_rules! merge {
            ($($field:ident => $name:literal,)*) => {
                Settings {
                    $($field: non_empty(other.$field).or(base.$field),)*
                }
            };
        }
        settings_fields!(merge)
    }

    /// Resolve the auth strategy.
    ///
    /// Without an explicit type, a username selects basic auth, otherwise a
    /// bearer token selects bearer auth, otherwise no auth.
    pub fn auth(&self) -> Result<AuthSpec, DeployError> {
        let username = self.camunda_auth_username.clone();
        let password = self.camunda_auth_password.clone();
        let token = self.camunda_auth_bearer.clone();

        match self.camunda_auth_type.as_deref() {
            Some(auth_type) => AuthSpec::from_type(auth_type, username, password, token),
            None => match (username, token) {
                (Some(username), _) => {
                    Ok(AuthSpec::basic(username, password.unwrap_or_default()))
                }
                (None, Some(token)) => Ok(AuthSpec::bearer(token)),
                (None, None) => Ok(AuthSpec::None),
            },
        }
    }

    /// Build the endpoint configuration
    pub fn endpoint_config(&self) -> Result<EndpointConfig, DeployError> {
        let url = self.camunda_endpoint_url.clone().unwrap_or_default();
        Ok(EndpointConfig::new(url, self.auth()?)?.with_custom_header(
            self.custom_http_header_name.clone(),
            self.custom_http_header_value.clone(),
        ))
    }

    /// Parse the deploy-changed-only flag; unset means `false`
    pub fn deploy_changed_only(&self) -> Result<bool, DeployError> {
        match self.deploy_changed_only.as_deref() {
            None => Ok(false),
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(DeployError::ConfigError(format!(
                    "DEPLOY_CHANGED_ONLY must be 'true' or 'false', got '{}'",
                    value
                ))),
            },
        }
    }

    /// Glob patterns locating the models: `**/<folder>/<alternative>` for each
    /// `|`-separated alternative of the file pattern
    pub fn search_patterns(&self) -> Vec<String> {
        let folder = self
            .bpmn_model_folder
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_FOLDER)
            .trim_matches('/');
        let file_pattern = self
            .bpmn_file_pattern
            .as_deref()
            .unwrap_or(DEFAULT_FILE_PATTERN);

        // Accept the extended-glob form `?(a|b)` as well as a bare `a|b`.
        let alternatives = file_pattern
            .trim()
            .strip_prefix("?(")
            .and_then(|p| p.strip_suffix(')'))
            .unwrap_or(file_pattern.trim());

        alternatives
            .split('|')
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(|alt| format!("**/{}/{}", folder, alt))
            .collect()
    }

    /// Build the deployment descriptor for the resolved resources
    pub fn descriptor(
        &self,
        resources: Vec<ResourceRef>,
    ) -> Result<DeploymentDescriptor, DeployError> {
        Ok(DeploymentDescriptor {
            name: self
                .deployment_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT_NAME.to_string()),
            tenant_id: self.camunda_tenant_id.clone(),
            source: self.deployment_source.clone(),
            deploy_changed_only: self.deploy_changed_only()?,
            resources,
        })
    }
}

/// Load settings: environment, then the optional settings file named by
/// `--config=<path>`, then command-line arguments
pub async fn load(args: &HashMap<String, String>) -> Result<Settings, DeployError> {
    let mut settings = Settings::from_env();

    if let Some(path) = args.get("config") {
        settings = settings.overlay(Settings::from_file(Path::new(path)).await?);
    }

    Ok(settings.overlay(Settings::from_args(args)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
