//! HTTP networking module
//!
//! Provides HTTP client functionality for talking to the suggestion service.

mod client;
mod user_agent;

pub use client::{HttpClient, HttpResponse};
pub use user_agent::generate_user_agent;
