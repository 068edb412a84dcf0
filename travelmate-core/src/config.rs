use crate::models::Credentials;
use crate::{llm, search, weather};

/// Default completion model used when TRAVELMATE_MODEL env var is not set
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration from environment
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub model: String,
    pub search_base_url: String,
    pub weather_base_url: String,
    pub completion_base_url: String,
}

impl Config {
    /// Load configuration from the .env file and environment
    ///
    /// API keys are optional at load time; their presence is checked when an
    /// exchange starts. The `*_BASE_URL` overrides exist for tests and
    /// self-hosted gateways.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Not an error if .env is missing

        let credentials = Credentials::new(
            std::env::var("EXA_API_KEY").unwrap_or_default(),
            std::env::var("GROQ_API_KEY").unwrap_or_default(),
            std::env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
        );

        let model =
            std::env::var("TRAVELMATE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let search_base_url = std::env::var("EXA_BASE_URL")
            .unwrap_or_else(|_| search::DEFAULT_BASE_URL.to_string());

        let weather_base_url = std::env::var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|_| weather::DEFAULT_BASE_URL.to_string());

        let completion_base_url = std::env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| llm::DEFAULT_BASE_URL.to_string());

        Self {
            credentials,
            model,
            search_base_url,
            weather_base_url,
            completion_base_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            model: DEFAULT_MODEL.to_string(),
            search_base_url: search::DEFAULT_BASE_URL.to_string(),
            weather_base_url: weather::DEFAULT_BASE_URL.to_string(),
            completion_base_url: llm::DEFAULT_BASE_URL.to_string(),
        }
    }
}
