//! Request payloads for the Supabase APIs
//!
//! Serialize-only types: backend responses are passed through as raw JSON,
//! so only the outgoing bodies are modeled.

use serde::Serialize;

/// Body for `POST /auth/v1/signup`
#[derive(Debug, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// User metadata stored by the auth provider alongside the account
    pub data: SignUpMetadata,
}

#[derive(Debug, Default, Serialize)]
pub struct SignUpMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Body for `POST /auth/v1/token?grant_type=password`
#[derive(Debug, Serialize)]
pub struct PasswordGrantRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/v1/token?grant_type=refresh_token`
#[derive(Debug, Serialize)]
pub struct RefreshGrantRequest {
    pub refresh_token: String,
}

/// Row inserted into the `users` table after signup
#[derive(Debug, Serialize)]
pub struct ProfileInsert {
    /// Account id issued by the auth provider
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: String,
}
