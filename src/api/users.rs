// User operations

use crate::domain::{IdmQuery, User};
use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    user: NewUser<'a>,
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    description: String,
}

pub fn default_user_description(username: &str) -> String {
    format!("{} Keyrock user", username)
}

impl IdmManager {
    /// GET /v1/users/{user_id}
    ///
    /// Returns `None` for any non-200 answer.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let path = ["v1", "users", user_id];
        let response = self
            .execute("get_user", self.request(Method::GET, &path))
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        let raw = response.envelope("user")?;
        Ok(Some(User::from_response(None, raw)?))
    }

    /// GET /v1/users
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self
            .execute("list_users", self.request(Method::GET, &["v1", "users"]))
            .await?;

        if !response.is_success() {
            return Ok(Vec::new());
        }

        response
            .envelope_list("users")?
            .into_iter()
            .map(|raw| User::from_response(None, raw))
            .collect()
    }

    /// Look users up by id, by username or by login (email)
    ///
    /// Logins are unique, usernames are not.
    pub async fn find_users(&self, key: &str, query: IdmQuery) -> Result<Vec<User>> {
        let users = match query {
            IdmQuery::ById => return Ok(self.get_user(key).await?.into_iter().collect()),
            IdmQuery::ByName | IdmQuery::ByLogin => self.list_users().await?,
        };

        let found: Vec<User> = users
            .into_iter()
            .filter(|user| match query {
                IdmQuery::ByLogin => user.email() == key,
                _ => user.username() == Some(key),
            })
            .collect();
        self.warn_duplicates("users", key, found.len());

        Ok(found)
    }

    /// POST /v1/users
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        username: &str,
        description: Option<&str>,
    ) -> Result<User> {
        let payload = CreateUserRequest {
            user: NewUser {
                username,
                email,
                password,
                description: description
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_user_description(username)),
            },
        };

        let response = self
            .execute(
                "create_user",
                self.request(Method::POST, &["v1", "users"]).json(&payload),
            )
            .await?
            .error_for_status()?;

        self.logger()
            .info(&format!("IDM user \"{}\" created", email));

        User::from_response(Some(email), response.envelope("user")?)
    }

    /// Not supported by this client
    pub async fn update_user(&self, _user_id: &str) -> Result<User> {
        Err(IdmError::NotImplemented("update_user"))
    }

    /// DELETE /v1/users/{user_id}
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = ["v1", "users", user_id];
        self.execute("delete_user", self.request(Method::DELETE, &path))
            .await?
            .error_for_status()?;
        Ok(())
    }
}
