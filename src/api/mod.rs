//! Remote authentication API client.
//!
//! SecureVault does not verify credentials itself — a remote service
//! does, and hands back a `(token, user)` pair that the session manager
//! persists.  This module is the thin HTTP wrapper around that service's
//! two endpoints:
//!
//! - `POST /api/auth/login    {email, password}            -> {token, user}`
//! - `POST /api/auth/register {firstName, lastName, email, password} -> {token, user}`

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::errors::{Result, SecureVaultError};
use crate::session::UserProfile;

/// Request timeout for auth calls.
const TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote auth service.
pub struct AuthClient {
    base_url: String,
    agent: Agent,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// The server's user object. `email` is optional because the register
/// endpoint has been observed to omit it; callers fill in the email the
/// user submitted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: RawUser,
}

/// Error payload the server sends on auth failures.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl AuthClient {
    /// Build a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: &str) -> Self {
        // Status errors are handled manually so the server's `message`
        // field survives a 4xx response.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(TIMEOUT))
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: config.into(),
        }
    }

    /// Authenticate an existing user. Returns the session token and profile.
    pub fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile)> {
        let url = format!("{}/api/auth/login", self.base_url);
        let resp = self
            .agent
            .post(&url)
            .send_json(LoginRequest { email, password })
            .map_err(|e| SecureVaultError::AuthFailed(format!("request failed: {e}")))?;

        self.parse_auth_response(resp, email)
    }

    /// Create a new account. Returns the session token and profile.
    pub fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, UserProfile)> {
        let url = format!("{}/api/auth/register", self.base_url);
        let resp = self
            .agent
            .post(&url)
            .send_json(RegisterRequest {
                first_name,
                last_name,
                email,
                password,
            })
            .map_err(|e| SecureVaultError::AuthFailed(format!("request failed: {e}")))?;

        self.parse_auth_response(resp, email)
    }

    /// Turn a response into `(token, profile)` or an `AuthFailed` carrying
    /// the server's message.
    fn parse_auth_response(
        &self,
        mut resp: ureq::http::Response<ureq::Body>,
        submitted_email: &str,
    ) -> Result<(String, UserProfile)> {
        let status = resp.status();

        if !status.is_success() {
            let message = resp
                .body_mut()
                .read_json::<ErrorBody>()
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("server returned {status}"));
            return Err(SecureVaultError::AuthFailed(message));
        }

        let auth: AuthResponse = resp
            .body_mut()
            .read_json()
            .map_err(|e| SecureVaultError::AuthFailed(format!("malformed response: {e}")))?;

        Ok((auth.token, profile_from_user(auth.user, submitted_email)))
    }
}

/// Build the session profile, falling back to the submitted email when
/// the server omits one.
fn profile_from_user(user: RawUser, submitted_email: &str) -> UserProfile {
    UserProfile {
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email.unwrap_or_else(|| submitted_email.to_string()),
    }
}
