// Shared helpers for the mock Keyrock integration tests

#![allow(dead_code)]

use keyrock_client::IdmManager;
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wiremock::{MockServer, ResponseTemplate};

pub const ADMIN_TOKEN: &str = "51a8b5f7-6b3b-4d4e-8f0e-7c1c4f6e1f2a";
pub const ADMIN_USER_ID: &str = "admin";

/// Manager pointed at a mock server
pub fn manager_for(server: &MockServer) -> IdmManager {
    let address = server.address();
    IdmManager::new(address.ip().to_string(), address.port(), ADMIN_TOKEN)
}

pub fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Error body in the shape Keyrock uses
pub fn keyrock_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {
            "message": message,
            "code": status,
            "title": "Bad Request"
        }
    }))
}

pub fn organization_json(id: &str, name: &str, description: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "image": "default",
        "website": null
    })
}

pub fn application_json(id: &str, name: &str, description: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "image": "default",
        "url": "http://localhost",
        "redirect_uri": "http://localhost",
        "grant_type": "password,implicit,authorization_code",
        "response_type": "code,token",
        "token_types": "permanent,bearer",
        "client_type": null
    })
}

pub fn user_json(id: &str, email: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": email,
        "enabled": true,
        "gravatar": false,
        "date_password": "2021-05-03T10:05:08.000Z",
        "description": null,
        "website": null
    })
}

pub fn role_json(id: &str, name: &str, app_id: &str) -> Value {
    json!({
        "id": id,
        "is_internal": false,
        "name": name,
        "oauth_client_id": app_id
    })
}

pub fn permission_json(id: &str, name: &str, action: &str, resource: &str, app_id: &str) -> Value {
    json!({
        "id": id,
        "is_internal": false,
        "name": name,
        "description": null,
        "action": action,
        "resource": resource,
        "is_regex": false,
        "oauth_client_id": app_id
    })
}

/// In-memory sink for log lines written through a tracing subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route the manager events of the current thread into a fresh buffer
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_env_filter(EnvFilter::new("keyrock::manager=trace"))
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
