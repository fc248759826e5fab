// Application operations and user role assignment

use crate::domain::{Application, IdmQuery, RoleAssignment};
use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::Method;
use serde::Serialize;

/// Redirect and home URL registered for new applications
pub const DEFAULT_APPLICATION_URL: &str = "http://localhost";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateApplicationRequest<'a> {
    application: NewApplication<'a>,
}

#[derive(Debug, Serialize)]
struct NewApplication<'a> {
    name: &'a str,
    description: String,
    redirect_uri: &'a str,
    url: &'a str,
    grant_type: [&'a str; 3],
    token_types: [&'a str; 1],
}

pub fn default_application_description(name: &str) -> String {
    format!("{} application protected by Keyrock", name)
}

impl IdmManager {
    // ========================================================================
    // CRUD
    // ========================================================================

    /// GET /v1/applications/{application_id}
    ///
    /// Returns `None` for any non-200 answer.
    pub async fn get_application(&self, application_id: &str) -> Result<Option<Application>> {
        let path = ["v1", "applications", application_id];
        let response = self
            .execute("get_application", self.request(Method::GET, &path))
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        let raw = response.envelope("application")?;
        Ok(Some(Application::from_response(None, raw)?))
    }

    /// GET /v1/applications
    pub async fn list_applications(&self) -> Result<Vec<Application>> {
        let response = self
            .execute(
                "list_applications",
                self.request(Method::GET, &["v1", "applications"]),
            )
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        response
            .envelope_list("applications")?
            .into_iter()
            .map(|raw| Application::from_response(None, raw))
            .collect()
    }

    /// Look applications up by id or by exact name
    pub async fn find_applications(&self, key: &str, query: IdmQuery) -> Result<Vec<Application>> {
        match query {
            IdmQuery::ById => Ok(self.get_application(key).await?.into_iter().collect()),
            IdmQuery::ByName => {
                let found: Vec<Application> = self
                    .list_applications()
                    .await?
                    .into_iter()
                    .filter(|app| app.name() == key)
                    .collect();
                self.warn_duplicates("applications", key, found.len());
                Ok(found)
            }
            IdmQuery::ByLogin => Err(IdmError::UnsupportedQuery {
                operation: "find_applications",
                query,
            }),
        }
    }

    /// POST /v1/applications
    ///
    /// The application is registered with `http://localhost` as URL and
    /// redirect URI, the authorization code, implicit and password grants,
    /// and permanent tokens. The returned record carries the client secret.
    pub async fn create_application(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Application> {
        let payload = CreateApplicationRequest {
            application: NewApplication {
                name,
                description: description
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_application_description(name)),
                redirect_uri: DEFAULT_APPLICATION_URL,
                url: DEFAULT_APPLICATION_URL,
                grant_type: ["authorization_code", "implicit", "password"],
                token_types: ["permanent"],
            },
        };

        let response = self
            .execute(
                "create_application",
                self.request(Method::POST, &["v1", "applications"]).json(&payload),
            )
            .await?
            .error_for_status()?;

        self.logger()
            .info(&format!("IDM application \"{}\" created", name));

        Application::from_response(Some(name), response.envelope("application")?)
    }

    /// Not supported by this client
    pub async fn update_application(&self, _application_id: &str) -> Result<Application> {
        Err(IdmError::NotImplemented("update_application"))
    }

    /// DELETE /v1/applications/{application_id}
    pub async fn delete_application(&self, application_id: &str) -> Result<()> {
        let path = ["v1", "applications", application_id];
        self.execute("delete_application", self.request(Method::DELETE, &path))
            .await?
            .error_for_status()?;
        Ok(())
    }

    // ========================================================================
    // User role assignment
    // ========================================================================

    /// POST /v1/applications/{application_id}/users/{user_id}/roles/{role_id}
    pub async fn authorize_user(
        &self,
        application_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<RoleAssignment> {
        let path = ["v1", "applications", application_id, "users", user_id, "roles", role_id];
        let response = self
            .execute("authorize_user", self.request(Method::POST, &path))
            .await?
            .error_for_status()?;

        let raw = response.envelope("role_user_assignments")?;
        Ok(serde_json::from_value(raw)?)
    }

    /// DELETE /v1/applications/{application_id}/users/{user_id}/roles/{role_id}
    pub async fn revoke_user_role(
        &self,
        application_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<()> {
        let path = ["v1", "applications", application_id, "users", user_id, "roles", role_id];
        self.execute("revoke_user_role", self.request(Method::DELETE, &path))
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// GET /v1/applications/{application_id}/users[/{user_id}/roles]
    ///
    /// Without a user every authorized principal is listed, the built-in
    /// administrator included. With a user only that user's assignments are
    /// returned.
    pub async fn list_application_user_roles(
        &self,
        application_id: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<RoleAssignment>> {
        let path = match user_id {
            Some(user_id) => vec!["v1", "applications", application_id, "users", user_id, "roles"],
            None => vec!["v1", "applications", application_id, "users"],
        };
        let response = self
            .execute("list_application_user_roles", self.request(Method::GET, &path))
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        let mut assignments = response
            .envelope_list("role_user_assignments")?
            .into_iter()
            .map(|raw| serde_json::from_value::<RoleAssignment>(raw).map_err(IdmError::from))
            .collect::<Result<Vec<_>>>()?;

        if let Some(user_id) = user_id {
            assignments.retain(|assignment| assignment.user_id == user_id);
        }

        Ok(assignments)
    }
}
