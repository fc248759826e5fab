use super::{override_or_field, string_field};
use crate::errors::{IdmError, Result};
use serde_json::Value;
use std::fmt;

/// A role scoped to one application
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    name: String,
    id: Option<String>,
    app_id: Option<String>,
    raw: Value,
}

impl Role {
    /// Build a role from a response object
    ///
    /// `name` overrides the response's `name` key. `app_id` overrides the
    /// response's `oauth_client_id`, which the service omits on listings.
    pub fn from_response(name: Option<&str>, app_id: Option<&str>, raw: Value) -> Result<Self> {
        let name = override_or_field(name, &raw, "name").ok_or(IdmError::MissingField("name"))?;

        Ok(Self {
            name,
            id: string_field(&raw, "id"),
            app_id: override_or_field(app_id, &raw, "oauth_client_id"),
            raw,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Id of the application owning this role
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Role id: {}, name: \"{}\", app_id: {}>",
            self.id.as_deref().unwrap_or("-"),
            self.name,
            self.app_id.as_deref().unwrap_or("-")
        )
    }
}
