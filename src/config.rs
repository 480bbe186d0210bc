//! Configuration parsing and validation

use crate::error::{GatewayError, Result};
use clap::Parser;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CALLBACK_REDIRECT: &str = "/profile";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "supabase-auth-gateway",
    version,
    about = "HTTP gateway forwarding auth endpoints to a Supabase backend",
    long_about = "Minimal gateway exposing /register, /login and /auth/callback, each forwarding directly to the Supabase auth (GoTrue) and database (PostgREST) APIs"
)]
pub struct Config {
    /// Base URL of the Supabase project (e.g., https://xyzcompany.supabase.co)
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Supabase project API key, sent as the `apikey` header on every backend call
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: String,

    /// Port to listen on (default: 3000)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Where /auth/callback redirects after establishing a session (default: /profile)
    #[arg(long, env = "CALLBACK_REDIRECT")]
    pub callback_redirect: Option<String>,

    /// Don't show the gateway banner
    #[arg(long)]
    pub no_banner: bool,

    /// Show only error messages
    #[arg(long, conflicts_with = "debug")]
    pub silent: bool,

    /// Enable debug logging
    #[arg(long, env = "AUTH_GATEWAY_DEBUG")]
    pub debug: bool,
}

impl Config {
    /// Parse configuration from CLI arguments and environment variables
    pub fn parse_args() -> Self {
        Config::parse()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.supabase_url.is_empty() {
            return Err(GatewayError::Config(
                "Supabase URL is required".to_string(),
            ));
        }

        if self.supabase_key.is_empty() {
            return Err(GatewayError::Config(
                "Supabase API key is required".to_string(),
            ));
        }

        url::Url::parse(&self.supabase_url)
            .map_err(|e| GatewayError::Config(format!("Invalid Supabase URL: {}", e)))?;

        // Redirect target is either an absolute path or a full URL
        if let Some(ref redirect) = self.callback_redirect {
            if !redirect.starts_with('/') {
                url::Url::parse(redirect).map_err(|e| {
                    GatewayError::Config(format!("Invalid callback redirect: {}", e))
                })?;
            }
        }

        Ok(())
    }

    /// Get listen port (with default)
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Get callback redirect target (with default)
    pub fn callback_redirect(&self) -> String {
        self.callback_redirect
            .clone()
            .unwrap_or_else(|| DEFAULT_CALLBACK_REDIRECT.to_string())
    }

    /// Get log level based on flags
    pub fn log_level(&self) -> tracing::Level {
        if self.silent {
            tracing::Level::ERROR
        } else if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
