//! The single outbound HTTP exchange a call placer performs.

use crate::error::CallError;
use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::debug;

/// Credentials attached to an outbound request.
#[derive(Debug)]
pub enum Auth {
    /// `Authorization: Bearer <token>`.
    Bearer(SecretString),
    /// HTTP basic auth.
    Basic {
        username: String,
        password: SecretString,
    },
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// A fully assembled POST request, ready to hand to an [`HttpTransport`].
#[derive(Debug)]
pub struct OutboundRequest {
    pub url: String,
    pub auth: Auth,
    pub body: RequestBody,
}

impl OutboundRequest {
    /// The `Authorization` header value this request will carry.
    pub fn authorization_header(&self) -> String {
        match &self.auth {
            Auth::Bearer(token) => format!("Bearer {}", token.expose_secret()),
            Auth::Basic { username, password } => {
                let raw = format!("{}:{}", username, password.expose_secret());
                format!("Basic {}", STANDARD.encode(raw))
            }
        }
    }
}

/// Renders the request for inspection, with credentials redacted.
impl fmt::Display for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "POST {}", self.url)?;
        match &self.auth {
            Auth::Bearer(_) => writeln!(f, "Authorization: Bearer [REDACTED]")?,
            Auth::Basic { username, .. } => {
                writeln!(f, "Authorization: Basic {}:[REDACTED]", username)?
            }
        }
        match &self.body {
            RequestBody::Json(value) => {
                writeln!(f, "Content-Type: application/json")?;
                writeln!(f)?;
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                write!(f, "{}", pretty)
            }
            RequestBody::Form(fields) => {
                writeln!(f, "Content-Type: application/x-www-form-urlencoded")?;
                for (key, value) in fields {
                    writeln!(f)?;
                    write!(f, "{}: {}", key, value)?;
                }
                Ok(())
            }
        }
    }
}

/// Status code and body text of a provider response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and waits for the response.
///
/// Non-2xx statuses are *not* errors at this layer; only failures that
/// prevent a response from being read are.
#[cfg_attr(test, mockall::automock)]
pub trait HttpTransport {
    fn post(&self, request: &OutboundRequest) -> Result<RawResponse, CallError>;
}

/// Blocking transport backed by `reqwest`, with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn post(&self, request: &OutboundRequest) -> Result<RawResponse, CallError> {
        let mut builder = self.client.post(&request.url);

        builder = match &request.auth {
            Auth::Bearer(token) => builder.bearer_auth(token.expose_secret()),
            Auth::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
        };

        builder = match &request.body {
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let response = builder.send().map_err(|e| CallError::transport(&e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| CallError::transport(&e))?;
        debug!(status, bytes = body.len(), "Received provider response");

        Ok(RawResponse { status, body })
    }
}
