//! Shared HTTP client utilities
//!
//! One lazily-initialized client per timeout class. Using shared clients
//! allows connection pooling and avoids resource duplication.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// Place search requests get a short timeout; a slow provider degrades
/// to an empty result list rather than stalling the exchange.
const SEARCH_TIMEOUT_SECS: u64 = 8;

/// Weather requests are small and should answer quickly.
const WEATHER_TIMEOUT_SECS: u64 = 6;

const USER_AGENT: &str = "travelmate/0.1";

/// Global HTTP client for place search calls (8s timeout)
static SEARCH_CLIENT: OnceLock<Client> = OnceLock::new();

/// Global HTTP client for weather calls (6s timeout)
static WEATHER_CLIENT: OnceLock<Client> = OnceLock::new();

/// Global HTTP client for chat completion calls (provider-default timeout)
static COMPLETION_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client for place search calls
pub fn get_search_client() -> &'static Client {
    SEARCH_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}

/// Get or create the shared HTTP client for weather calls
pub fn get_weather_client() -> &'static Client {
    WEATHER_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(WEATHER_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}

/// Get or create the shared HTTP client for chat completion calls
///
/// Completions can legitimately take a while, so this client carries no
/// overall timeout and relies on the provider closing the connection.
pub fn get_completion_client() -> &'static Client {
    COMPLETION_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_search_client_returns_same_instance() {
        let client1 = get_search_client();
        let client2 = get_search_client();
        assert!(std::ptr::eq(client1, client2));
    }

    #[test]
    fn test_clients_are_distinct_per_timeout_class() {
        assert!(!std::ptr::eq(get_search_client(), get_weather_client()));
        assert!(!std::ptr::eq(get_weather_client(), get_completion_client()));
    }
}
