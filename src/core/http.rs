//! HTTP utilities for nflverse downloads

use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("nflverse-sqlite/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client with a per-request `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}
