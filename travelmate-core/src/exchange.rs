//! Exchange orchestration
//!
//! Ties the pipeline together: credential check, place search and weather
//! lookup, prompt composition, completion, history append. Place search and
//! weather are independent, so they are fetched concurrently; each degrades
//! on its own and the joined result matches the sequential order search,
//! weather, compose, complete.

use crate::config::Config;
use crate::llm::LlmClient;
use crate::models::{Credentials, ModelParams, Turn};
use crate::prompt;
use crate::search::SearchClient;
use crate::session::ChatSession;
use crate::weather::WeatherClient;
use thiserror::Error;
use tracing::info;

/// Why an exchange was refused before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExchangeError {
    /// One or more of the three API keys is blank. Surfaced to the user as
    /// a warning; no partial state is created.
    #[error("Masukkan semua API key dulu sebelum bertanya")]
    MissingCredentials,
    #[error("query must not be blank")]
    EmptyQuery,
}

/// The assembled travel assistant
///
/// At most one exchange runs per session at a time; the `&mut ChatSession`
/// borrow enforces that. There is no cancellation once an exchange starts.
#[derive(Debug, Clone)]
pub struct TravelMate {
    search: SearchClient,
    weather: WeatherClient,
    llm: LlmClient,
    model: String,
}

impl Default for TravelMate {
    /// Production endpoints and the default model
    fn default() -> Self {
        Self::new(
            SearchClient::default(),
            WeatherClient::default(),
            LlmClient::default(),
            crate::config::DEFAULT_MODEL,
        )
    }
}

impl TravelMate {
    pub fn new(
        search: SearchClient,
        weather: WeatherClient,
        llm: LlmClient,
        model: impl Into<String>,
    ) -> Self {
        Self {
            search,
            weather,
            llm,
            model: model.into(),
        }
    }

    /// Build an assistant from environment-derived configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SearchClient::new(&config.search_base_url),
            WeatherClient::new(&config.weather_base_url),
            LlmClient::new(&config.completion_base_url),
            &config.model,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one exchange and append the resulting turn to the session
    ///
    /// A blank query or incomplete credentials refuse the exchange before
    /// any network call and leave the session untouched. Every downstream
    /// failure is absorbed: search degrades to no results, weather to a
    /// placeholder string, and a completion failure becomes an inline error
    /// reply, so a started exchange always produces exactly one turn.
    pub async fn run_exchange(
        &self,
        session: &mut ChatSession,
        query: &str,
        credentials: &Credentials,
        params: &ModelParams,
    ) -> Result<Turn, ExchangeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ExchangeError::EmptyQuery);
        }
        if !credentials.is_complete() {
            return Err(ExchangeError::MissingCredentials);
        }

        info!(query = %query, "starting exchange");

        let (places, weather_info) = tokio::join!(
            self.search.search_or_empty(query, &credentials.exa_api_key),
            self.weather
                .current_or_fallback(query, &credentials.openweather_api_key),
        );

        let prompt = prompt::compose(query, &places, &weather_info);
        let reply = self
            .llm
            .generate_reply(&prompt, &credentials.groq_api_key, &self.model, params)
            .await;

        let turn = Turn {
            user_query: query.to_string(),
            assistant_reply: reply,
            places,
        };
        session.push(turn.clone());

        info!(
            places = turn.places.len(),
            history_len = session.len(),
            "exchange finished"
        );

        Ok(turn)
    }
}
