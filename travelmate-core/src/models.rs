use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder title used when the search provider omits one
pub const MISSING_TITLE: &str = "-";

/// A single search hit shown alongside the assistant reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub title: String,
    pub url: String,
}

/// One completed exchange: the user's query, the model reply and the
/// search results that fed the prompt. Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub user_query: String,
    pub assistant_reply: String,
    #[serde(default)]
    pub places: Vec<PlaceResult>,
}

/// Sampling parameters forwarded to the completion provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            max_tokens: 400,
        }
    }
}

impl ModelParams {
    pub const TEMPERATURE_MIN: f32 = 0.0;
    pub const TEMPERATURE_MAX: f32 = 1.0;
    pub const TOP_P_MIN: f32 = 0.0;
    pub const TOP_P_MAX: f32 = 1.0;
    pub const MAX_TOKENS_MIN: u32 = 64;
    pub const MAX_TOKENS_MAX: u32 = 1024;

    /// Clamp every field to the range the UI sliders expose
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            temperature: self
                .temperature
                .clamp(Self::TEMPERATURE_MIN, Self::TEMPERATURE_MAX),
            top_p: self.top_p.clamp(Self::TOP_P_MIN, Self::TOP_P_MAX),
            max_tokens: self
                .max_tokens
                .clamp(Self::MAX_TOKENS_MIN, Self::MAX_TOKENS_MAX),
        }
    }
}

/// The three provider secrets required for an exchange
///
/// Held only in volatile session state. The manual [`fmt::Debug`] impl
/// redacts the values so they cannot leak through logs.
#[derive(Clone, Default)]
pub struct Credentials {
    pub exa_api_key: String,
    pub groq_api_key: String,
    pub openweather_api_key: String,
}

impl Credentials {
    pub fn new(
        exa_api_key: impl Into<String>,
        groq_api_key: impl Into<String>,
        openweather_api_key: impl Into<String>,
    ) -> Self {
        Self {
            exa_api_key: exa_api_key.into(),
            groq_api_key: groq_api_key.into(),
            openweather_api_key: openweather_api_key.into(),
        }
    }

    /// All three keys present (non-blank)?
    pub fn is_complete(&self) -> bool {
        !self.exa_api_key.trim().is_empty()
            && !self.groq_api_key.trim().is_empty()
            && !self.openweather_api_key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.trim().is_empty() { "<unset>" } else { "<redacted>" }
        }
        f.debug_struct("Credentials")
            .field("exa_api_key", &redact(&self.exa_api_key))
            .field("groq_api_key", &redact(&self.groq_api_key))
            .field("openweather_api_key", &redact(&self.openweather_api_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_params_defaults() {
        let params = ModelParams::default();
        assert_eq!(params.temperature, 0.3);
        assert_eq!(params.top_p, 0.9);
        assert_eq!(params.max_tokens, 400);
    }

    #[test]
    fn test_model_params_clamped() {
        let params = ModelParams {
            temperature: 1.7,
            top_p: -0.2,
            max_tokens: 20_000,
        }
        .clamped();
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.top_p, 0.0);
        assert_eq!(params.max_tokens, 1024);

        let low = ModelParams {
            temperature: 0.5,
            top_p: 0.5,
            max_tokens: 1,
        }
        .clamped();
        assert_eq!(low.max_tokens, 64);
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(!Credentials::default().is_complete());
        assert!(!Credentials::new("exa", "", "owm").is_complete());
        assert!(!Credentials::new("exa", "   ", "owm").is_complete());
        assert!(Credentials::new("exa", "groq", "owm").is_complete());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("super-secret", "", "also-secret");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("<unset>"));
    }

    #[test]
    fn test_turn_deserializes_without_places() {
        let turn: Turn =
            serde_json::from_str(r#"{"user_query":"Bali","assistant_reply":"ok"}"#).unwrap();
        assert!(turn.places.is_empty());
    }
}
