//! Supabase HTTP client
//!
//! Thin client over the two Supabase services the gateway forwards to:
//! the GoTrue auth API (`/auth/v1/...`) and the PostgREST database API
//! (`/rest/v1/...`). Responses are returned as raw JSON for passthrough.

use crate::error::{GatewayError, Result};
use serde_json::Value;

use super::types::{PasswordGrantRequest, ProfileInsert, RefreshGrantRequest, SignUpMetadata, SignUpRequest};

/// Client for the Supabase auth and database APIs
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Create a new client for the given project URL and API key
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        url::Url::parse(base_url)?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create an account via the auth provider, forwarding name fields as
    /// user metadata
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignUpMetadata,
    ) -> Result<Value> {
        tracing::debug!("Signing up {} via auth API", email);

        let body = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            data: metadata,
        };

        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url))
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;

        take_json(response).await
    }

    /// Exchange email/password credentials for a session
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Value> {
        tracing::debug!("Password grant for {}", email);

        let body = PasswordGrantRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;

        take_json(response).await
    }

    /// Establish a session from an access/refresh token pair
    ///
    /// Mirrors the hosted client library's `setSession`: validate the access
    /// token against the user endpoint, and fall back to the refresh grant
    /// when the provider rejects it with 401.
    pub async fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::debug!("Access token rejected, falling back to refresh grant");
            return self.refresh_session(refresh_token).await;
        }

        let user = take_json(response).await?;
        Ok(serde_json::json!({
            "user": user,
            "access_token": access_token,
            "refresh_token": refresh_token,
        }))
    }

    /// Exchange a refresh token for a fresh session
    async fn refresh_session(&self, refresh_token: &str) -> Result<Value> {
        let body = RefreshGrantRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;

        take_json(response).await
    }

    /// Insert the profile row into the remote `users` table
    ///
    /// `Prefer: return=representation` plus the PostgREST single-object
    /// `Accept` header make the response the inserted row itself.
    pub async fn insert_profile(&self, row: &ProfileInsert) -> Result<Value> {
        tracing::debug!("Inserting profile row for user {}", row.user_id);

        let response = self
            .http
            .post(format!("{}/rest/v1/users", self.base_url))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .bearer_auth(&self.api_key)
            .json(row)
            .send()
            .await?;

        take_json(response).await
    }
}

/// Extract the user id from a signup response
///
/// GoTrue returns a session with a nested `user` object, or a bare user
/// object when email confirmation is pending.
pub fn signed_up_user_id(auth: &Value) -> Option<&str> {
    auth.pointer("/user/id")
        .or_else(|| auth.pointer("/id"))
        .and_then(Value::as_str)
}

/// Read the response body as JSON, converting failure statuses into a
/// `Backend` error carrying the provider's own message
async fn take_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Backend(backend_message(status, &body)));
    }

    Ok(response.json().await?)
}

/// Pull a human-readable message out of a backend error body
///
/// GoTrue uses `msg`, `error_description` or `error`; PostgREST uses
/// `message`. Falls back to the raw body, then to the HTTP status.
fn backend_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "error_description", "message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Backend request failed with status {}", status)
    } else {
        trimmed.to_string()
    }
}
