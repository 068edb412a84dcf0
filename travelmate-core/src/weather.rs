//! Current weather via the OpenWeather API
//!
//! One GET per lookup, metric units, Indonesian condition texts. The
//! orchestration path uses [`WeatherClient::current_or_fallback`], which maps
//! every failure onto one of three fixed strings so a broken weather provider
//! never blocks an exchange.

use crate::http::get_weather_client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Production OpenWeather endpoint; override via [`WeatherClient::new`]
/// or OPENWEATHER_BASE_URL
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Shown when no weather API key was supplied
pub const NOT_CONFIGURED: &str = "(API cuaca tidak dikonfigurasi)";

/// Shown when the provider answered with a non-success `cod`
pub const UNAVAILABLE: &str = "Cuaca tidak tersedia";

/// Shown when transport or parsing failed
pub const FETCH_FAILED: &str = "Gagal mengambil data cuaca";

/// Language hint sent with every lookup
const LANG: &str = "id";

/// Why a weather lookup failed
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key not configured")]
    NotConfigured,
    /// The provider embeds its status in the response body; anything but
    /// a numeric 200 counts as unavailable.
    #[error("weather provider returned cod {cod}")]
    Unavailable { cod: String },
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid weather response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("weather response missing expected fields")]
    Incomplete,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    cod: serde_json::Value,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    main: Option<MainReadings>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// A successful weather reading
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub description: String,
    pub temp_celsius: f64,
}

impl Observation {
    /// Human-readable one-liner, e.g. `"Cerah, 29°C"`
    pub fn summary(&self) -> String {
        format!("{}, {}°C", capitalize(&self.description), self.temp_celsius)
    }
}

/// Uppercase the first character, lowercase the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Client for the weather provider
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Look up the current weather for a location, surfacing the failure
    /// reason
    ///
    /// The provider reports errors through the `cod` field of the body, so
    /// the HTTP status itself is not checked.
    pub async fn current(&self, city: &str, api_key: &str) -> Result<Observation, WeatherError> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::NotConfigured);
        }

        let response = get_weather_client()
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", LANG),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: WeatherResponse = serde_json::from_str(&body)?;

        if parsed.cod.as_i64() != Some(200) {
            return Err(WeatherError::Unavailable {
                cod: parsed.cod.to_string(),
            });
        }

        let description = parsed
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::Incomplete)?
            .description;
        let temp_celsius = parsed.main.ok_or(WeatherError::Incomplete)?.temp;

        Ok(Observation {
            description,
            temp_celsius,
        })
    }

    /// Look up the current weather, collapsing every failure into a fixed
    /// placeholder string
    ///
    /// A missing key performs no network call. Swallowed failures are
    /// reported through `tracing` at debug level.
    pub async fn current_or_fallback(&self, city: &str, api_key: &str) -> String {
        match self.current(city, api_key).await {
            Ok(observation) => observation.summary(),
            Err(WeatherError::NotConfigured) => NOT_CONFIGURED.to_string(),
            Err(err @ WeatherError::Unavailable { .. }) => {
                debug!(error = %err, "weather degraded to unavailable placeholder");
                UNAVAILABLE.to_string()
            }
            Err(err) => {
                debug!(error = %err, "weather degraded to failure placeholder");
                FETCH_FAILED.to_string()
            }
        }
    }
}
