// Organization operations and membership

use crate::domain::{IdmQuery, Membership, Organization, OrganizationMember, OrganizationRole};
use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateOrganizationRequest<'a> {
    organization: NewOrganization<'a>,
}

#[derive(Debug, Serialize)]
struct NewOrganization<'a> {
    name: &'a str,
    description: String,
}

/// Description sent when the caller gives none; Keyrock rejects empty ones
pub fn default_organization_description(name: &str) -> String {
    format!("This is the {} organization", name)
}

impl IdmManager {
    // ========================================================================
    // CRUD
    // ========================================================================

    /// GET /v1/organizations/{organization_id}
    ///
    /// Returns `None` for any non-200 answer.
    pub async fn get_organization(&self, organization_id: &str) -> Result<Option<Organization>> {
        let path = ["v1", "organizations", organization_id];
        let response = self
            .execute("get_organization", self.request(Method::GET, &path))
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        let raw = response.envelope("organization")?;
        Ok(Some(Organization::from_response(None, raw)?))
    }

    /// GET /v1/organizations
    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let response = self
            .execute(
                "list_organizations",
                self.request(Method::GET, &["v1", "organizations"]),
            )
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        // Each entry pairs the caller's role with the organization itself
        response
            .envelope_list("organizations")?
            .into_iter()
            .map(|mut entry| {
                let raw = match entry.get_mut("Organization") {
                    Some(org) => org.take(),
                    None => entry,
                };
                Organization::from_response(None, raw)
            })
            .collect()
    }

    /// Look organizations up by id or by exact name
    ///
    /// Several organizations may share a name; a warning is logged when the
    /// lookup is ambiguous.
    pub async fn find_organizations(
        &self,
        key: &str,
        query: IdmQuery,
    ) -> Result<Vec<Organization>> {
        match query {
            IdmQuery::ById => Ok(self.get_organization(key).await?.into_iter().collect()),
            IdmQuery::ByName => {
                let found: Vec<Organization> = self
                    .list_organizations()
                    .await?
                    .into_iter()
                    .filter(|org| org.name() == key)
                    .collect();
                self.warn_duplicates("organizations", key, found.len());
                Ok(found)
            }
            IdmQuery::ByLogin => Err(IdmError::UnsupportedQuery {
                operation: "find_organizations",
                query,
            }),
        }
    }

    /// POST /v1/organizations
    ///
    /// Duplicate names are accepted. An empty or missing description is
    /// replaced by [`default_organization_description`].
    pub async fn create_organization(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Organization> {
        let payload = CreateOrganizationRequest {
            organization: NewOrganization {
                name,
                description: description
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_organization_description(name)),
            },
        };

        let response = self
            .execute(
                "create_organization",
                self.request(Method::POST, &["v1", "organizations"]).json(&payload),
            )
            .await?
            .error_for_status()?;

        self.logger()
            .info(&format!("IDM organization \"{}\" created", name));

        Organization::from_response(Some(name), response.envelope("organization")?)
    }

    /// Not supported by this client
    pub async fn update_organization(&self, _organization_id: &str) -> Result<Organization> {
        Err(IdmError::NotImplemented("update_organization"))
    }

    /// DELETE /v1/organizations/{organization_id}
    ///
    /// Does not ask for confirmation. Fails when the organization does not exist.
    pub async fn delete_organization(&self, organization_id: &str) -> Result<()> {
        let path = ["v1", "organizations", organization_id];
        self.execute("delete_organization", self.request(Method::DELETE, &path))
            .await?
            .error_for_status()?;
        Ok(())
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// PUT /v1/organizations/{organization_id}/users/{user_id}/organization_roles/{role}
    pub async fn add_user_to_organization(
        &self,
        organization_id: &str,
        user_id: &str,
        role: OrganizationRole,
    ) -> Result<Membership> {
        let path = [
            "v1",
            "organizations",
            organization_id,
            "users",
            user_id,
            "organization_roles",
            role.as_str(),
        ];
        let response = self
            .execute("add_user_to_organization", self.request(Method::PUT, &path))
            .await?
            .error_for_status()?;

        let raw = response.envelope("user_organization_assignments")?;
        Ok(serde_json::from_value(raw)?)
    }

    /// DELETE /v1/organizations/{organization_id}/users/{user_id}/organization_roles/{role}
    ///
    /// `role` must match the role the user actually holds, otherwise the
    /// service refuses the removal.
    pub async fn remove_user_from_organization(
        &self,
        organization_id: &str,
        user_id: &str,
        role: OrganizationRole,
    ) -> Result<()> {
        let path = [
            "v1",
            "organizations",
            organization_id,
            "users",
            user_id,
            "organization_roles",
            role.as_str(),
        ];
        self.execute(
            "remove_user_from_organization",
            self.request(Method::DELETE, &path),
        )
        .await?
        .error_for_status()?;
        Ok(())
    }

    /// GET /v1/organizations/{organization_id}/users
    pub async fn list_organization_members(
        &self,
        organization_id: &str,
    ) -> Result<Vec<OrganizationMember>> {
        let path = ["v1", "organizations", organization_id, "users"];
        let response = self
            .execute("list_organization_members", self.request(Method::GET, &path))
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        response
            .envelope_list("organization_users")?
            .into_iter()
            .map(|entry| serde_json::from_value::<OrganizationMember>(entry).map_err(IdmError::from))
            .collect()
    }

    /// GET /v1/organizations/{organization_id}/users/{user_id}/organization_roles
    ///
    /// Returns `None` when the user is not part of the organization.
    pub async fn get_organization_member(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<Membership>> {
        let path = ["v1", "organizations", organization_id, "users", user_id, "organization_roles"];
        let response = self
            .execute("get_organization_member", self.request(Method::GET, &path))
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        match response.envelope("organization_user")? {
            Value::Null => Ok(None),
            raw => Ok(Some(serde_json::from_value(raw)?)),
        }
    }
}
