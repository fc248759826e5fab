use super::{override_or_field, string_field};
use crate::errors::{IdmError, Result};
use serde_json::Value;
use std::fmt;

/// An organization registered in Keyrock
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    name: String,
    id: Option<String>,
    description: Option<String>,
    website: Option<String>,
    image: Option<String>,
    raw: Value,
}

impl Organization {
    /// Build an organization from a response object
    ///
    /// `name` takes precedence over the response's `name` key; one of the
    /// two must be present.
    pub fn from_response(name: Option<&str>, raw: Value) -> Result<Self> {
        let name = override_or_field(name, &raw, "name").ok_or(IdmError::MissingField("name"))?;

        Ok(Self {
            name,
            id: string_field(&raw, "id"),
            description: string_field(&raw, "description"),
            website: string_field(&raw, "website"),
            image: string_field(&raw, "image"),
            raw,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// The response object this record was built from
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Organization id: {}, name: \"{}\", description: \"{}\">",
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
    fn test_from_response() {
        let org = Organization::from_response(
            None,
            json!({
                "id": "33fd15c0-e919-47b0-9e05-5f47999f6d91",
                "name": "Lab",
                "description": "This is the Lab organization",
                "image": "default"
            }),
        )
        .unwrap();

        assert_eq!(org.name(), "Lab");
        assert_eq!(org.id(), Some("33fd15c0-e919-47b0-9e05-5f47999f6d91"));
        assert_eq!(org.description(), Some("This is the Lab organization"));
        assert_eq!(org.website(), None);
        assert_eq!(org.raw()["image"], "default");
    }

    #[test]
    fn test_name_override() {
        let org = Organization::from_response(Some("Explicit"), json!({"id": "1"})).unwrap();
        assert_eq!(org.name(), "Explicit");
    }

    #[test]
    fn test_missing_name() {
        let result = Organization::from_response(None, json!({"id": "1"}));
        assert!(matches!(result, Err(IdmError::MissingField("name"))));
    }

    #[test]
    fn test_display() {
        let org = Organization::from_response(None, json!({"id": "1", "name": "Lab"})).unwrap();
        assert_eq!(
            org.to_string(),
            "<Organization id: 1, name: \"Lab\", description: \"\">"
        );
    }
}
