// Administrative token acquisition

use crate::errors::{IdmError, Result};
use crate::manager::error_message;
use crate::observability::ClientLogger;
use chrono::DateTime;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

/// Response header carrying the newly issued token
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    name: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenDetails,
}

#[derive(Debug, Deserialize)]
struct TokenDetails {
    expires_at: String,
}

/// POST /v1/auth/tokens
///
/// Authenticate against Keyrock and return the token together with its
/// expiration rendered as a human readable date. A rejected login surfaces
/// as [`IdmError::Http`] with the service's status.
pub async fn get_auth_token(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
) -> Result<(String, String)> {
    let url = format!("http://{}:{}/v1/auth/tokens", host, port);

    let response = reqwest::Client::new()
        .post(&url)
        .header(CONTENT_TYPE, "application/json")
        .json(&TokenRequest {
            name: user,
            password,
        })
        .send()
        .await?;

    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::error!(
            target: ClientLogger::TARGET,
            "get_auth_token() - \"POST {}\" {}: \"{}\"",
            url,
            status.as_u16(),
            message
        );
        return Err(IdmError::Http {
            status: status.as_u16(),
            message,
        });
    }

    tracing::debug!(
        target: ClientLogger::TARGET,
        "get_auth_token() - \"POST {}\" {}",
        url,
        status.as_u16()
    );

    let token = response
        .headers()
        .get(SUBJECT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| IdmError::Decode(format!("missing {} header", SUBJECT_TOKEN_HEADER)))?;

    let body: TokenResponse = response.json().await?;
    let expires = format_expiry(&body.token.expires_at)?;

    Ok((token, expires))
}

/// Render an ISO-8601 timestamp as `Mon May  3 10:05:08 2021`
fn format_expiry(expires_at: &str) -> Result<String> {
    let expires = DateTime::parse_from_rfc3339(expires_at)
        .map_err(|e| IdmError::Decode(format!("invalid expires_at \"{}\": {}", expires_at, e)))?;
    Ok(expires.format("%c").to_string())
}
