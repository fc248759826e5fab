// Domain records built from Keyrock responses

pub mod application;
pub mod organization;
pub mod permission;
pub mod proxy;
pub mod query;
pub mod relationships;
pub mod role;
pub mod user;

pub use application::Application;
pub use organization::Organization;
pub use permission::Permission;
pub use proxy::Proxy;
pub use query::IdmQuery;
pub use relationships::{
    Membership, OrganizationMember, OrganizationRole, RoleAssignment, RolePermissionAssignment,
};
pub use role::Role;
pub use user::User;

use chrono::{DateTime, Utc};
use serde_json::Value;

// ============================================================================
// Field helpers shared by the records
// ============================================================================

/// Read a field as a string, accepting numeric ids as well
pub(crate) fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a boolean flag; Keyrock sometimes reports flags as 0/1
pub(crate) fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    match raw.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn datetime_field(raw: &Value, key: &str) -> Option<DateTime<Utc>> {
    let text = raw.get(key)?.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Pick the explicit override if non-empty, otherwise the response field
pub(crate) fn override_or_field(
    override_value: Option<&str>,
    raw: &Value,
    key: &str,
) -> Option<String> {
    override_value
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| string_field(raw, key))
}
