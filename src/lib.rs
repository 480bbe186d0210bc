//! Supabase Auth Gateway Library
//!
//! Core library for the auth gateway that forwards register/login/callback
//! requests to a Supabase backend.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod supabase;
