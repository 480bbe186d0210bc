//! Supabase Auth Gateway - Main entry point
//!
//! Minimal HTTP gateway exposing /register, /login and /auth/callback, each
//! forwarding directly to a Supabase backend (GoTrue auth + PostgREST).

mod config;
mod error;
mod routes;
mod server;
mod supabase;

use config::Config;
use error::Result;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const BANNER: &str = r#"
╔══════════════════════════════════════════════════════════════╗
║                    Supabase Auth Gateway                     ║
║        register / login / callback passthrough to BaaS       ║
╚══════════════════════════════════════════════════════════════╝
"#;

fn setup_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}", config.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let config = Config::parse_args();

    // Set up logging
    setup_logging(&config);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Show banner unless suppressed
    if !config.no_banner && !config.silent {
        println!("{}", BANNER);
        info!("Supabase URL: {}", config.supabase_url);
        info!("Listen port: {}", config.port());
        info!("Callback redirect: {}", config.callback_redirect());
        println!();
    }

    // Run the gateway
    if let Err(e) = run_gateway(config).await {
        error!("Gateway error: {}", e);
        std::process::exit(1);
    }
}

async fn run_gateway(config: Config) -> Result<()> {
    let server_handle = tokio::spawn(async move { server::run_server(config).await });

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
        result = server_handle => {
            match result {
                Ok(Ok(())) => info!("Gateway server stopped"),
                Ok(Err(e)) => {
                    error!("Gateway server error: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Gateway server task panicked: {}", e);
                    return Err(error::GatewayError::Server(format!(
                        "Server task panicked: {}",
                        e
                    )));
                }
            }
        }
    }

    Ok(())
}
