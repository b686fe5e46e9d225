//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(port: u16) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,no_run
/// # use contracts::enums::entity_kind::EntityKind;
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url(3000, &EntityKind::Miner.list_path());
/// ```
pub fn api_url(port: u16, path: &str) -> String {
    format!("{}{}", api_base(port), path)
}
