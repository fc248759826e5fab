use super::{bool_field, override_or_field, string_field};
use crate::errors::{IdmError, Result};
use serde_json::Value;
use std::fmt;

/// An action + resource rule owned by an application
#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    name: String,
    id: Option<String>,
    action: Option<String>,
    resource: Option<String>,
    is_regex: bool,
    description: Option<String>,
    app_id: Option<String>,
    raw: Value,
}

impl Permission {
    /// Build a permission from a response object
    ///
    /// `name` overrides the response's `name` key, `app_id` its `oauth_client_id`.
    pub fn from_response(name: Option<&str>, app_id: Option<&str>, raw: Value) -> Result<Self> {
        let name = override_or_field(name, &raw, "name").ok_or(IdmError::MissingField("name"))?;

        Ok(Self {
            name,
            id: string_field(&raw, "id"),
            action: string_field(&raw, "action"),
            resource: string_field(&raw, "resource"),
            is_regex: bool_field(&raw, "is_regex").unwrap_or(false),
            description: string_field(&raw, "description"),
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

    /// HTTP verb the permission applies to
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Resource path, or a pattern when [`Permission::is_regex`] is set
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn is_regex(&self) -> bool {
        self.is_regex
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Permission id: {}, name: \"{}\", {} {}>",
            self.id.as_deref().unwrap_or("-"),
            self.name,
            self.action.as_deref().unwrap_or("-"),
            self.resource.as_deref().unwrap_or("-")
        )
    }
}
