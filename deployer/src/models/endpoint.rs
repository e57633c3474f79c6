//! Engine endpoint configuration

use secrecy::SecretString;

use crate::errors::DeployError;

/// How requests to the engine are authenticated
#[derive(Debug, Default)]
pub enum AuthSpec {
    #[default]
    None,
    Basic {
        username: String,
        password: SecretString,
    },
    Bearer {
        token: SecretString,
    },
}

impl AuthSpec {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthSpec::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        AuthSpec::Bearer {
            token: SecretString::from(token.into()),
        }
    }

    /// Build an auth spec from its type tag (`none`, `basic` or `bearer`).
    ///
    /// Any other tag is rejected with [`DeployError::UnsupportedAuthType`].
    pub fn from_type(
        auth_type: &str,
        username: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self, DeployError> {
        match auth_type.to_lowercase().as_str() {
            "none" => Ok(AuthSpec::None),
            "basic" => Ok(AuthSpec::basic(
                username.unwrap_or_default(),
                password.unwrap_or_default(),
            )),
            "bearer" => Ok(AuthSpec::bearer(token.unwrap_or_default())),
            _ => Err(DeployError::UnsupportedAuthType(auth_type.to_string())),
        }
    }

    /// Type tag of this variant
    pub fn kind(&self) -> &'static str {
        match self {
            AuthSpec::None => "none",
            AuthSpec::Basic { .. } => "basic",
            AuthSpec::Bearer { .. } => "bearer",
        }
    }
}

/// Where and how to reach the engine REST API
#[derive(Debug)]
pub struct EndpointConfig {
    /// Engine REST base URL, e.g. `http://localhost:8080/engine-rest`
    pub url: String,

    /// Authentication strategy
    pub auth: AuthSpec,

    /// Configured custom header name
    pub custom_header_name: Option<String>,

    /// Configured custom header value
    pub custom_header_value: Option<String>,
}

impl EndpointConfig {
    /// Create an endpoint config, failing when `url` is empty
    pub fn new(url: impl Into<String>, auth: AuthSpec) -> Result<Self, DeployError> {
        let config = Self {
            url: url.into(),
            auth,
            custom_header_name: None,
            custom_header_value: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Attach a custom header
    pub fn with_custom_header(mut self, name: Option<String>, value: Option<String>) -> Self {
        self.custom_header_name = name;
        self.custom_header_value = value;
        self
    }

    /// Check the invariants that can be violated through the public fields
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.url.trim().is_empty() {
            return Err(DeployError::ConfigError(
                "CAMUNDA_ENDPOINT_URL not configured".to_string(),
            ));
        }
        Ok(())
    }
}
