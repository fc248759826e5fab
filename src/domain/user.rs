use super::{bool_field, datetime_field, override_or_field, string_field};
use crate::errors::{IdmError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

/// A user account; the email is the login and is unique per service
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    email: String,
    id: Option<String>,
    username: Option<String>,
    enabled: Option<bool>,
    admin: Option<bool>,
    gravatar: Option<bool>,
    website: Option<String>,
    date_password: Option<DateTime<Utc>>,
    description: Option<String>,
    raw: Value,
}

impl User {
    /// Build a user from a response object, `email` overriding the response's `email` key
    pub fn from_response(email: Option<&str>, raw: Value) -> Result<Self> {
        let email =
            override_or_field(email, &raw, "email").ok_or(IdmError::MissingField("email"))?;

        Ok(Self {
            email,
            id: string_field(&raw, "id"),
            username: string_field(&raw, "username"),
            enabled: bool_field(&raw, "enabled"),
            admin: bool_field(&raw, "admin"),
            gravatar: bool_field(&raw, "gravatar"),
            website: string_field(&raw, "website"),
            date_password: datetime_field(&raw, "date_password"),
            description: string_field(&raw, "description"),
            raw,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Alias of [`User::email`]
    pub fn login(&self) -> &str {
        &self.email
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn admin(&self) -> Option<bool> {
        self.admin
    }

    pub fn gravatar(&self) -> Option<bool> {
        self.gravatar
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Date the current password expires
    pub fn date_password(&self) -> Option<DateTime<Utc>> {
        self.date_password
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<User id: {}, email: \"{}\", username: \"{}\">",
            self.id.as_deref().unwrap_or("-"),
            self.email,
            self.username.as_deref().unwrap_or("")
        )
    }
}
