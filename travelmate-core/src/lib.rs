pub mod config;
pub mod exchange;
pub mod http;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod search;
pub mod session;
pub mod weather;

// Re-export commonly used types
pub use config::{Config, DEFAULT_MODEL};
pub use exchange::{ExchangeError, TravelMate};
pub use llm::{ChatRequest, ChatResponse, CompletionError, LlmClient, Message};
pub use models::{Credentials, ModelParams, PlaceResult, Turn};
pub use search::{SearchClient, SearchError};
pub use session::ChatSession;
pub use weather::{Observation, WeatherClient, WeatherError};
