// Application permissions

use crate::domain::{IdmQuery, Permission};
use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CreatePermissionRequest<'a> {
    permission: NewPermission<'a>,
}

#[derive(Debug, Serialize)]
struct NewPermission<'a> {
    name: &'a str,
    action: &'a str,
    resource: &'a str,
    is_regex: bool,
    description: String,
}

pub fn default_permission_description(name: &str) -> String {
    format!("{} permission", name)
}

impl IdmManager {
    /// GET /v1/applications/{application_id}/permissions/{permission_id}
    pub async fn get_permission(
        &self,
        application_id: &str,
        permission_id: &str,
    ) -> Result<Option<Permission>> {
        let path = ["v1", "applications", application_id, "permissions", permission_id];
        let response = self
            .execute("get_permission", self.request(Method::GET, &path))
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        let raw = response.envelope("permission")?;
        Ok(Some(Permission::from_response(
            None,
            Some(application_id),
            raw,
        )?))
    }

    /// GET /v1/applications/{application_id}/permissions
    ///
    /// Includes the built-in administrative permissions.
    pub async fn list_permissions(&self, application_id: &str) -> Result<Vec<Permission>> {
        let path = ["v1", "applications", application_id, "permissions"];
        let response = self
            .execute("list_permissions", self.request(Method::GET, &path))
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        response
            .envelope_list("permissions")?
            .into_iter()
            .map(|raw| Permission::from_response(None, Some(application_id), raw))
            .collect()
    }

    /// Look permissions of an application up by id or by exact name
    pub async fn find_permissions(
        &self,
        application_id: &str,
        key: &str,
        query: IdmQuery,
    ) -> Result<Vec<Permission>> {
        match query {
            IdmQuery::ById => Ok(self
                .get_permission(application_id, key)
                .await?
                .into_iter()
                .collect()),
            IdmQuery::ByName => {
                let found: Vec<Permission> = self
                    .list_permissions(application_id)
                    .await?
                    .into_iter()
                    .filter(|permission| permission.name() == key)
                    .collect();
                self.warn_duplicates("permissions", key, found.len());
                Ok(found)
            }
            IdmQuery::ByLogin => Err(IdmError::UnsupportedQuery {
                operation: "find_permissions",
                query,
            }),
        }
    }

    /// POST /v1/applications/{application_id}/permissions
    ///
    /// `action` is an HTTP verb; `resource` is a path, or a pattern when
    /// `is_regex` is set. Empty names, actions or resources are refused by
    /// the service.
    pub async fn create_permission(
        &self,
        application_id: &str,
        name: &str,
        action: &str,
        resource: &str,
        is_regex: bool,
        description: Option<&str>,
    ) -> Result<Permission> {
        let path = ["v1", "applications", application_id, "permissions"];
        let payload = CreatePermissionRequest {
            permission: NewPermission {
                name,
                action,
                resource,
                is_regex,
                description: description
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_permission_description(name)),
            },
        };

        let response = self
            .execute(
                "create_permission",
                self.request(Method::POST, &path).json(&payload),
            )
            .await?
            .error_for_status()?;

        self.logger().info(&format!(
            "IDM permission \"{}\" created in application {}",
            name, application_id
        ));

        Permission::from_response(
            Some(name),
            Some(application_id),
            response.envelope("permission")?,
        )
    }

    /// Not supported by this client
    pub async fn update_permission(
        &self,
        _application_id: &str,
        _permission_id: &str,
    ) -> Result<Permission> {
        Err(IdmError::NotImplemented("update_permission"))
    }

    /// DELETE /v1/applications/{application_id}/permissions/{permission_id}
    pub async fn delete_permission(&self, application_id: &str, permission_id: &str) -> Result<()> {
        let path = ["v1", "applications", application_id, "permissions", permission_id];
        self.execute("delete_permission", self.request(Method::DELETE, &path))
            .await?
            .error_for_status()?;
        Ok(())
    }
}
