//! Auth route handlers
//!
//! Each handler forwards to the Supabase backend and passes the response
//! through. Validation is limited to presence checks; every failure the
//! backend reports comes back as a fixed 400 carrying its message.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::GatewayError;
use crate::supabase::client::signed_up_user_id;
use crate::supabase::{ProfileInsert, SignUpMetadata};

use super::AppState;

const DEFAULT_ROLE: &str = "Patient";

/// Error response for the JSON endpoints: fixed 400 with the backend's
/// (or validation's) message
pub struct ApiError(String);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.0 }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// POST /register - create an account, then insert the profile row
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(&body.email).ok_or_else(|| ApiError("Missing email".to_string()))?;
    let password =
        required(&body.password).ok_or_else(|| ApiError("Missing password".to_string()))?;

    info!("Register request for {}", email);

    let metadata = SignUpMetadata {
        first_name: body.first_name.clone(),
        last_name: body.last_name.clone(),
    };

    let auth = state
        .supabase
        .sign_up(email, password, metadata)
        .await
        .map_err(|e| {
            warn!("Auth error: {}", e);
            ApiError::from(e)
        })?;

    let user_id = signed_up_user_id(&auth)
        .ok_or_else(|| ApiError("Auth response did not include a user id".to_string()))?
        .to_string();

    let row = ProfileInsert {
        user_id,
        first_name: body.first_name,
        last_name: body.last_name,
        email: email.to_string(),
        phone_number: body.phone_number,
        role: body.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
    };

    let user = state.supabase.insert_profile(&row).await.map_err(|e| {
        warn!("User table error: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(json!({ "auth": auth, "user": user })))
}

/// POST /login - exchange credentials for a session
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(&body.email).ok_or_else(|| ApiError("Missing email".to_string()))?;
    let password =
        required(&body.password).ok_or_else(|| ApiError("Missing password".to_string()))?;

    let session = state
        .supabase
        .sign_in_with_password(email, password)
        .await
        .map_err(|e| {
            warn!("Login error: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(session))
}

/// GET /auth/callback - establish a session from token query parameters
///
/// Error bodies are plain text here, unlike the JSON endpoints.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let (access_token, refresh_token) = match (
        required(&params.access_token),
        required(&params.refresh_token),
    ) {
        (Some(access), Some(refresh)) => (access, refresh),
        _ => {
            return (StatusCode::BAD_REQUEST, "Missing tokens").into_response();
        }
    };

    match state.supabase.set_session(access_token, refresh_token).await {
        Ok(_) => Redirect::to(&state.callback_redirect).into_response(),
        Err(e) => {
            warn!("Callback session error: {}", e);
            (StatusCode::BAD_REQUEST, format!("Auth failed: {}", e)).into_response()
        }
    }
}

/// Treat empty strings the same as absent fields
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
