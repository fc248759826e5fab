use super::{override_or_field, string_field};
use crate::errors::{IdmError, Result};
use serde_json::Value;
use std::fmt;

/// The PEP proxy account attached to an application
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy {
    id: String,
    password: Option<String>,
    oauth_client_id: Option<String>,
    raw: Value,
}

impl Proxy {
    /// Build a proxy from a response object, `id` overriding the response's `id` key
    pub fn from_response(id: Option<&str>, raw: Value) -> Result<Self> {
        let id = override_or_field(id, &raw, "id").ok_or(IdmError::MissingField("id"))?;

        Ok(Self {
            id,
            password: string_field(&raw, "password"),
            oauth_client_id: string_field(&raw, "oauth_client_id"),
            raw,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Password; only known right after creation or a reset
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn oauth_client_id(&self) -> Option<&str> {
        self.oauth_client_id.as_deref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Refresh the cached password from a service answer
    ///
    /// Accepts either a `password` or a `new_password` key. Only the password
    /// changes; the id and client id are left untouched.
    pub fn update(&mut self, changes: &Value) -> Result<()> {
        let password = string_field(changes, "password")
            .or_else(|| string_field(changes, "new_password"))
            .ok_or(IdmError::MissingField("password"))?;

        if let Value::Object(map) = &mut self.raw {
            map.insert("password".to_string(), Value::String(password.clone()));
        }
        self.password = Some(password);

        Ok(())
    }
}

impl fmt::Display for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Proxy id: {}, oauth_client_id: {}>",
            self.id,
            self.oauth_client_id.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetched_proxy() -> Proxy {
        Proxy::from_response(
            None,
            json!({"id": "pep_proxy_1", "oauth_client_id": "app-1"}),
        )
        .unwrap()
    }

    #[test]
    fn test_password_absent_on_get() {
        let proxy = fetched_proxy();
        assert_eq!(proxy.id(), "pep_proxy_1");
        assert_eq!(proxy.password(), None);
        assert_eq!(proxy.oauth_client_id(), Some("app-1"));
    }

    #[test]
    fn test_update_with_new_password() {
        let mut proxy = fetched_proxy();
        proxy.update(&json!({"new_password": "pep_proxy_pw_2"})).unwrap();

        assert_eq!(proxy.password(), Some("pep_proxy_pw_2"));
        assert_eq!(proxy.raw()["password"], "pep_proxy_pw_2");
        assert_eq!(proxy.id(), "pep_proxy_1");
        assert_eq!(proxy.oauth_client_id(), Some("app-1"));
    }

    #[test]
    fn test_update_with_password_key() {
        let mut proxy = fetched_proxy();
        proxy.update(&json!({"password": "pw", "id": "other"})).unwrap();

        assert_eq!(proxy.password(), Some("pw"));
        assert_eq!(proxy.id(), "pep_proxy_1");
    }

    #[test]
    fn test_update_without_password() {
        let mut proxy = fetched_proxy();
        let result = proxy.update(&json!({"id": "other"}));

        assert!(matches!(result, Err(IdmError::MissingField("password"))));
        assert_eq!(proxy.password(), None);
    }

    #[test]
    fn test_missing_id() {
        let result = Proxy::from_response(None, json!({"password": "pw"}));
        assert!(matches!(result, Err(IdmError::MissingField("id"))));
    }
}
