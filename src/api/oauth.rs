// End-user token exchange against an application

use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    username: &'a str,
    password: &'a str,
    grant_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct OAuth2TokenResponse {
    access_token: String,
}

impl IdmManager {
    /// POST /oauth2/token
    ///
    /// Password grant on behalf of an end user. `application_secret` is sent
    /// as the Basic credential unchanged, so it must already be the encoded
    /// `client_id:client_secret` pair. `permanent` requests a non-expiring
    /// token.
    pub async fn get_oauth2_token(
        &self,
        user: &str,
        password: &str,
        application_secret: &str,
        permanent: bool,
    ) -> Result<String> {
        let grant = PasswordGrant {
            username: user,
            password,
            grant_type: "password",
            scope: permanent.then_some("permanent"),
        };

        let builder = self
            .bare_request(Method::POST, &["oauth2", "token"])
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(AUTHORIZATION, format!("Basic {}", application_secret))
            .header(ACCEPT, "application/json")
            .form(&grant);

        let response = self
            .execute("get_oauth2_token", builder)
            .await?
            .error_for_status()?;

        let token: OAuth2TokenResponse = serde_json::from_value(response.json()?)
            .map_err(|e| IdmError::Decode(format!("invalid token response: {}", e)))?;

        Ok(token.access_token)
    }
}
