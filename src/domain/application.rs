use super::{override_or_field, string_field};
use crate::errors::{IdmError, Result};
use serde_json::Value;
use std::fmt;

/// An application (OAuth client) registered in Keyrock
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    name: String,
    id: Option<String>,
    secret: Option<String>,
    description: Option<String>,
    url: Option<String>,
    redirect_uri: Option<String>,
    raw: Value,
}

impl Application {
    /// Build an application from a response object, `name` overriding the
    /// response's `name` key
    pub fn from_response(name: Option<&str>, raw: Value) -> Result<Self> {
        let name = override_or_field(name, &raw, "name").ok_or(IdmError::MissingField("name"))?;

        Ok(Self {
            name,
            id: string_field(&raw, "id"),
            secret: string_field(&raw, "secret"),
            description: string_field(&raw, "description"),
            url: string_field(&raw, "url"),
            redirect_uri: string_field(&raw, "redirect_uri"),
            raw,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Client secret; only returned by the service when the application is created
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Application id: {}, name: \"{}\", description: \"{}\">",
            self.id.as_deref().unwrap_or("-"),
            self.name,
            self.description.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_only_at_creation() {
        let created = Application::from_response(
            Some("Shop"),
            json!({
                "id": "a1",
                "secret": "s3cr3t",
                "description": "Shop application protected by Keyrock"
            }),
        )
        .unwrap();
        assert_eq!(created.secret(), Some("s3cr3t"));
        assert_eq!(created.name(), "Shop");

        let listed =
            Application::from_response(None, json!({"id": "a1", "name": "Shop"})).unwrap();
        assert_eq!(listed.secret(), None);
    }

    #[test]
    fn test_missing_name() {
        let result = Application::from_response(None, json!({"id": "a1"}));
        assert!(matches!(result, Err(IdmError::MissingField("name"))));
    }
}
