// Point-in-time relationship query results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role level of a user inside an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationRole {
    Owner,
    Member,
}

impl OrganizationRole {
    pub fn as_str(&self) -> &str {
        match self {
            OrganizationRole::Owner => "owner",
            OrganizationRole::Member => "member",
        }
    }
}

impl fmt::Display for OrganizationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of an organization membership listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub user_id: String,
    pub role: OrganizationRole,
}

/// A single user's membership in an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: String,
    pub organization_id: String,
    pub role: OrganizationRole,
}

/// A role granted to a user inside an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: String,
    pub role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// A permission granted to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionAssignment {
    pub role_id: String,
    pub permission_id: String,
}
