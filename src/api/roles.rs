// Application roles and their permissions

use crate::domain::{IdmQuery, Permission, Role, RolePermissionAssignment};
use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CreateRoleRequest<'a> {
    role: NewRole<'a>,
}

#[derive(Debug, Serialize)]
struct NewRole<'a> {
    name: &'a str,
}

impl IdmManager {
    // ========================================================================
    // CRUD
    // ========================================================================

    /// GET /v1/applications/{application_id}/roles/{role_id}
    pub async fn get_role(&self, application_id: &str, role_id: &str) -> Result<Option<Role>> {
        let path = ["v1", "applications", application_id, "roles", role_id];
        let response = self
            .execute("get_role", self.request(Method::GET, &path))
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        let raw = response.envelope("role")?;
        Ok(Some(Role::from_response(None, Some(application_id), raw)?))
    }

    /// GET /v1/applications/{application_id}/roles
    ///
    /// Includes the built-in provider and purchaser roles.
    pub async fn list_roles(&self, application_id: &str) -> Result<Vec<Role>> {
        let path = ["v1", "applications", application_id, "roles"];
        let response = self
            .execute("list_roles", self.request(Method::GET, &path))
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        response
            .envelope_list("roles")?
            .into_iter()
            .map(|raw| Role::from_response(None, Some(application_id), raw))
            .collect()
    }

    /// Look roles of an application up by id or by exact name
    pub async fn find_roles(
        &self,
        application_id: &str,
        key: &str,
        query: IdmQuery,
    ) -> Result<Vec<Role>> {
        match query {
            IdmQuery::ById => Ok(self
                .get_role(application_id, key)
                .await?
                .into_iter()
                .collect()),
            IdmQuery::ByName => {
                let found: Vec<Role> = self
                    .list_roles(application_id)
                    .await?
                    .into_iter()
                    .filter(|role| role.name() == key)
                    .collect();
                self.warn_duplicates("roles", key, found.len());
                Ok(found)
            }
            IdmQuery::ByLogin => Err(IdmError::UnsupportedQuery {
                operation: "find_roles",
                query,
            }),
        }
    }

    /// POST /v1/applications/{application_id}/roles
    ///
    /// Duplicate names are accepted; an empty name is refused by the service.
    pub async fn create_role(&self, application_id: &str, name: &str) -> Result<Role> {
        let path = ["v1", "applications", application_id, "roles"];
        let payload = CreateRoleRequest {
            role: NewRole { name },
        };

        let response = self
            .execute(
                "create_role",
                self.request(Method::POST, &path).json(&payload),
            )
            .await?
            .error_for_status()?;

        self.logger().info(&format!(
            "IDM role \"{}\" created in application {}",
            name, application_id
        ));

        Role::from_response(Some(name), Some(application_id), response.envelope("role")?)
    }

    /// Not supported by this client
    pub async fn update_role(&self, _application_id: &str, _role_id: &str) -> Result<Role> {
        Err(IdmError::NotImplemented("update_role"))
    }

    /// DELETE /v1/applications/{application_id}/roles/{role_id}
    pub async fn delete_role(&self, application_id: &str, role_id: &str) -> Result<()> {
        let path = ["v1", "applications", application_id, "roles", role_id];
        self.execute("delete_role", self.request(Method::DELETE, &path))
            .await?
            .error_for_status()?;
        Ok(())
    }

    // ========================================================================
    // Role permissions
    // ========================================================================

    /// PUT /v1/applications/{application_id}/roles/{role_id}/permissions/{permission_id}
    pub async fn assign_permission_to_role(
        &self,
        application_id: &str,
        role_id: &str,
        permission_id: &str,
    ) -> Result<RolePermissionAssignment> {
        let path = [
            "v1",
            "applications",
            application_id,
            "roles",
            role_id,
            "permissions",
            permission_id,
        ];
        let response = self
            .execute("assign_permission_to_role", self.request(Method::PUT, &path))
            .await?
            .error_for_status()?;

        let raw = response.envelope("role_permission_assignments")?;
        Ok(serde_json::from_value(raw)?)
    }

    /// DELETE /v1/applications/{application_id}/roles/{role_id}/permissions/{permission_id}
    pub async fn remove_permission_from_role(
        &self,
        application_id: &str,
        role_id: &str,
        permission_id: &str,
    ) -> Result<()> {
        let path = [
            "v1",
            "applications",
            application_id,
            "roles",
            role_id,
            "permissions",
            permission_id,
        ];
        self.execute(
            "remove_permission_from_role",
            self.request(Method::DELETE, &path),
        )
        .await?
        .error_for_status()?;
        Ok(())
    }

    /// GET /v1/applications/{application_id}/roles/{role_id}/permissions
    pub async fn list_role_permissions(
        &self,
        application_id: &str,
        role_id: &str,
    ) -> Result<Vec<Permission>> {
        let path = ["v1", "applications", application_id, "roles", role_id, "permissions"];
        let response = self
            .execute("list_role_permissions", self.request(Method::GET, &path))
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        response
            .envelope_list("role_permission_assignments")?
            .into_iter()
            .map(|raw| Permission::from_response(None, Some(application_id), raw))
            .collect()
    }
}
