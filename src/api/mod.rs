//! API module
//!
//! HTTP client for delivering applications to the webhook endpoint.

mod client;

pub use client::{ApiError, WebhookClient};
