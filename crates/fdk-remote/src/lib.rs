//! Client for the remote authentication endpoint.
//!
//! The endpoint is the only network collaborator in the system: a single
//! request-response per login or signup attempt, no retry or timeout
//! policy beyond the transport defaults. Failures are terminal for that
//! attempt and classified by HTTP status.

use anyhow::{Context, Result};
use fdk_core::{AppError, Role};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub emp_id: String,
    pub password: String,
    pub role: Role,
}

/// Successful login payload: the token plus the identity it carries.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: String,
    pub role: Role,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub emp_id: String,
    pub password: String,
    pub role: Role,
    pub department: String,
}

#[derive(Debug)]
pub struct AuthClient {
    base_url: String,
    client: reqwest::Client,
    token: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            token: None,
        }
    }

    /// Attach a session token; subsequent requests carry it as a bearer
    /// `Authorization` header.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authenticate against `POST {base}/auth/login`.
    ///
    /// A 403 means the account exists but is registered under a different
    /// role; callers redirect to the unauthorized view on that error.
    pub async fn login(&self, emp_id: &str, password: &str, role: Role) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let body = LoginRequest {
            emp_id: emp_id.to_string(),
            password: password.to_string(),
            role,
        };

        let response = self
            .apply_auth(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Login request to {url} failed"))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Login rejected");
            return Err(map_login_failure(status.as_u16(), emp_id, role, &text).into());
        }

        serde_json::from_str(&text).context("Malformed login response")
    }

    /// Register a new account against `POST {base}/auth/signup`.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let url = format!("{}/auth/signup", self.base_url);

        let response = self
            .apply_auth(self.client.post(&url))
            .json(request)
            .send()
            .await
            .with_context(|| format!("Signup request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Signup rejected");
            return Err(map_signup_failure(status.as_u16(), &request.emp_id, &text).into());
        }

        Ok(())
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Classify a non-2xx login response.
fn map_login_failure(status: u16, emp_id: &str, role: Role, body: &str) -> AppError {
    match status {
        403 => AppError::RoleMismatch {
            emp_id: emp_id.to_string(),
            role,
        },
        401 => AppError::InvalidCredentials(emp_id.to_string()),
        _ => AppError::AuthFailed {
            status,
            message: error_message(body),
        },
    }
}

/// Classify a non-2xx signup response.
fn map_signup_failure(status: u16, emp_id: &str, body: &str) -> AppError {
    match status {
        409 => AppError::UserExists(emp_id.to_string()),
        _ => AppError::AuthFailed {
            status,
            message: error_message(body),
        },
    }
}

/// Pull the `message` field out of an error body, falling back to the raw
/// text when the body is not the expected JSON shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
