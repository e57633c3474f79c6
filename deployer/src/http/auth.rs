//! Request header construction

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;

use crate::errors::DeployError;
use crate::models::endpoint::{AuthSpec, EndpointConfig};

/// Wire key the custom header value is sent under.
///
/// The configured header name is not used on the wire, only its value.
pub const CUSTOM_HEADER_KEY: &str = "custom_http_header_value";

/// Build the `Authorization` header for the given auth spec
pub fn build_auth_headers(auth: &AuthSpec) -> Result<HeaderMap, DeployError> {
    let mut headers = HeaderMap::new();

    let value = match auth {
        AuthSpec::None => return Ok(headers),
        AuthSpec::Basic { username, password } => {
            let credentials = format!("{}:{}", username, password.expose_secret());
            format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
        }
        AuthSpec::Bearer { token } => format!("Bearer {}", token.expose_secret()),
    };

    let mut value = HeaderValue::from_str(&value).map_err(|_| {
        DeployError::ConfigError(format!(
            "{} credentials contain characters not allowed in a header",
            auth.kind()
        ))
    })?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);

    Ok(headers)
}

/// Build the custom header, present only when a header name is configured
pub fn build_custom_headers(
    name: Option<&str>,
    value: Option<&str>,
) -> Result<HeaderMap, DeployError> {
    let mut headers = HeaderMap::new();

    if name.map_or(true, |n| n.trim().is_empty()) {
        return Ok(headers);
    }

    let value = HeaderValue::from_str(value.unwrap_or_default()).map_err(|_| {
        DeployError::ConfigError("custom header value is not a valid header value".to_string())
    })?;
    headers.insert(HeaderName::from_static(CUSTOM_HEADER_KEY), value);

    Ok(headers)
}

/// All static headers for an endpoint: auth first, then the custom header
pub fn build_endpoint_headers(endpoint: &EndpointConfig) -> Result<HeaderMap, DeployError> {
    let mut headers = build_auth_headers(&endpoint.auth)?;
    headers.extend(build_custom_headers(
        endpoint.custom_header_name.as_deref(),
        endpoint.custom_header_value.as_deref(),
    )?);
    Ok(headers)
}
