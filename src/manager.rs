// Connection object for the Keyrock administrative API

use crate::auth::token::get_auth_token;
use crate::config::Config;
use crate::errors::{IdmError, Result};
use crate::observability::ClientLogger;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, Version};
use serde_json::Value;
use tracing::Level;

/// Header carrying the administrative token on every call
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-token";

/// Manager of a Keyrock instance
///
/// Holds the connection coordinates and a token obtained beforehand with
/// [`get_auth_token`]. Each method issues a single request and maps the
/// answer to domain records; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct IdmManager {
    host: String,
    port: u16,
    base_url: String,
    auth_token: String,
    http: Client,
    logger: ClientLogger,
}

impl IdmManager {
    /// Create a manager; performs no network I/O
    pub fn new(host: impl Into<String>, port: u16, auth_token: impl Into<String>) -> Self {
        let host = host.into();
        let base_url = format!("http://{}:{}", host, port);

        Self {
            host,
            port,
            base_url,
            auth_token: auth_token.into(),
            http: Client::new(),
            logger: ClientLogger::disabled(),
        }
    }

    /// Authenticate with the configured credentials and build a manager
    /// logging at the configured level
    pub async fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let (token, expires) = get_auth_token(
            &config.connection.host,
            config.connection.port,
            &config.credentials.username,
            &config.credentials.password,
        )
        .await?;

        let logger = ClientLogger::from_level_name(&config.observability.log_level)?;
        let manager = Self::new(config.connection.host.clone(), config.connection.port, token)
            .with_logger(logger);
        manager
            .logger
            .debug(&format!("connected to {} (token expires {})", manager.base_url, expires));

        Ok(manager)
    }

    /// Replace the logging sink
    pub fn with_logger(mut self, logger: ClientLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, ...)
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logger(&self) -> &ClientLogger {
        &self.logger
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// URL of an API path given as segments; each segment is percent-encoded
    ///
    /// An unparsable base URL is returned as is so that the transport
    /// reports it when the request is built.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = match Url::parse(&self.base_url) {
            Ok(url) => url,
            Err(_) => return self.base_url.clone(),
        };
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    /// Build an authenticated JSON request for an API path
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(segments))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_TOKEN_HEADER, &self.auth_token)
    }

    /// Build an unauthenticated request for an API path
    pub(crate) fn bare_request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }

    /// Send a request, buffer the answer and log it on behalf of `operation`
    pub(crate) async fn execute(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<ApiResponse> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = path_and_query(request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let version = response.version();
        let body = response.text().await?;

        let response = ApiResponse { status, body };
        self.log_response(operation, &method, &path, version, &response);

        Ok(response)
    }

    fn log_response(
        &self,
        operation: &str,
        method: &Method,
        path: &str,
        version: Version,
        response: &ApiResponse,
    ) {
        let (level, reason) = if response.status.as_u16() < 400 {
            (Level::DEBUG, String::new())
        } else {
            (Level::ERROR, format!("\"{}\"", response.error_message()))
        };

        if !self.logger.enabled(level) {
            return;
        }

        self.logger.log(
            level,
            &format!(
                "{}() - {} \"{} {} {:?}\" {} \"{}\": {}",
                operation,
                self.base_url,
                method,
                path,
                version,
                response.status.as_u16(),
                response.status.canonical_reason().unwrap_or("Unknown"),
                reason
            ),
        );
    }

    /// Warn when a by-name lookup is ambiguous
    pub(crate) fn warn_duplicates(&self, kind: &str, key: &str, found: usize) {
        if found > 1 {
            self.logger.warn(&format!(
                "multiple {} with the name \"{}\" found ({})",
                kind, key, found
            ));
        }
    }
}

fn path_and_query(url: &reqwest::Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

// ============================================================================
// Buffered response
// ============================================================================

/// Status and body of a completed call
#[derive(Debug, Clone)]
pub(crate) struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Turn a non-2xx answer into an error, pass 2xx answers through
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(IdmError::Http {
                status: self.status.as_u16(),
                message: self.error_message(),
            })
        }
    }

    pub fn json(&self) -> Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Extract the object wrapped under `key`
    pub fn envelope(&self, key: &str) -> Result<Value> {
        let mut json = self.json()?;
        match json.get_mut(key) {
            Some(value) => Ok(value.take()),
            None => Err(IdmError::Decode(format!(
                "missing \"{}\" in response body",
                key
            ))),
        }
    }

    /// Extract the array wrapped under `key`
    pub fn envelope_list(&self, key: &str) -> Result<Vec<Value>> {
        match self.envelope(key)? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(IdmError::Decode(format!(
                "expected a list under \"{}\", got {}",
                key, other
            ))),
        }
    }

    /// Service-reported error message, or the raw body when there is none
    pub fn error_message(&self) -> String {
        error_message(&self.body)
    }
}

/// `error.message` of a Keyrock error body, else the compact JSON, else the trimmed text
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.pointer("/error/message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => json.to_string(),
        },
        Err(_) => body.trim().to_string(),
    }
}
