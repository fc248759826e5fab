// Keyrock identity manager client library

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod manager;
pub mod observability;

pub use auth::get_auth_token;
pub use config::Config;
pub use domain::{
    Application, IdmQuery, Membership, Organization, OrganizationMember, OrganizationRole,
    Permission, Proxy, Role, RoleAssignment, RolePermissionAssignment, User,
};
pub use errors::{IdmError, Result};
pub use manager::IdmManager;
pub use observability::ClientLogger;
