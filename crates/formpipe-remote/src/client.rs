//! HTTP client construction for remote collaborators

use reqwest::blocking::Client;
use std::time::Duration;

/// Default timeout for remote requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent for formpipe requests
pub const USER_AGENT: &str = "formpipe";

/// Builds an HTTP client with the given timeout
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Builds an HTTP client with DEFAULT_TIMEOUT
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_default_client() -> Result<Client, reqwest::Error> {
    build_client(DEFAULT_TIMEOUT)
}
