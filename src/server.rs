//! Gateway HTTP server
//!
//! Binds the listener and serves the three forwarding routes plus the
//! health probe.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::routes::{self, AppState};
use crate::supabase::SupabaseClient;

/// Run the gateway server until the listener shuts down
pub async fn run_server(config: Config) -> Result<()> {
    let supabase = SupabaseClient::new(&config.supabase_url, &config.supabase_key)?;

    let state = AppState {
        supabase: Arc::new(supabase),
        callback_redirect: config.callback_redirect(),
    };

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Auth gateway listening on http://{}", addr);
    tracing::info!("Forwarding to {}", config.supabase_url);

    axum::serve(listener, app).await?;

    Ok(())
}
