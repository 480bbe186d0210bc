//! Supabase backend client

pub mod client;
pub mod types;

pub use client::SupabaseClient;
pub use types::{ProfileInsert, SignUpMetadata};
