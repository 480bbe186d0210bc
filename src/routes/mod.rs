//! HTTP routes
//!
//! Route handlers live in submodules; this module assembles the router and
//! holds the shared per-request state.

pub mod auth;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::supabase::SupabaseClient;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    /// Where /auth/callback sends the browser after establishing a session
    pub callback_redirect: String,
}

/// Build the gateway router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/health", get(health::health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
