use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use travelmate_core::{ChatSession, Config, ExchangeError, ModelParams, TravelMate, Turn};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "travelmate")]
#[command(about = "TravelMate AI - travel assistant in your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session
    Chat {
        #[command(flatten)]
        sampling: SamplingArgs,
    },

    /// Ask a single question and exit
    Ask {
        /// Travel query, e.g. a destination name
        query: String,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
}

/// Sampling parameters forwarded to the model (clamped to the UI ranges)
#[derive(Args)]
struct SamplingArgs {
    /// Sampling temperature (0.0 - 1.0)
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    /// Nucleus sampling cutoff (0.0 - 1.0)
    #[arg(long, default_value_t = 0.9)]
    top_p: f32,

    /// Maximum tokens in the reply (64 - 1024)
    #[arg(long, default_value_t = 400)]
    max_tokens: u32,
}

impl From<&SamplingArgs> for ModelParams {
    fn from(args: &SamplingArgs) -> Self {
        ModelParams {
            temperature: args.temperature,
            top_p: args.top_p,
            max_tokens: args.max_tokens,
        }
        .clamped()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { sampling } => {
            chat_command(&config, ModelParams::from(&sampling)).await?;
        }
        Commands::Ask { query, sampling } => {
            ask_command(&config, query, ModelParams::from(&sampling)).await?;
        }
    }

    Ok(())
}

async fn ask_command(config: &Config, query: String, params: ModelParams) -> Result<()> {
    let assistant = TravelMate::from_config(config);
    let mut session = ChatSession::new();

    match run_one(&assistant, &mut session, &query, config, &params).await {
        Some(turn) => print_turn(&turn),
        None => std::process::exit(1),
    }

    Ok(())
}

async fn chat_command(config: &Config, params: ModelParams) -> Result<()> {
    let assistant = TravelMate::from_config(config);
    let mut session = ChatSession::new();

    info!(model = %assistant.model(), "TravelMate AI ready");
    println!("Mau ke mana liburan kamu kali ini? (/clear, /history, /quit)");

    let stdin = std::io::stdin();
    loop {
        print!("🌍 > ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                println!("Riwayat chat dihapus.");
                continue;
            }
            "/history" => {
                if session.is_empty() {
                    println!("(riwayat kosong)");
                }
                for turn in session.turns() {
                    println!("\nKamu: {}", turn.user_query);
                    print_turn(turn);
                }
                continue;
            }
            _ => {}
        }

        if let Some(turn) = run_one(&assistant, &mut session, input, config, &params).await {
            print_turn(&turn);
        }
    }

    Ok(())
}

/// Run one exchange, translating refusals into user-facing warnings
async fn run_one(
    assistant: &TravelMate,
    session: &mut ChatSession,
    query: &str,
    config: &Config,
    params: &ModelParams,
) -> Option<Turn> {
    info!("TravelMate lagi nyari inspirasi liburan...");

    match assistant
        .run_exchange(session, query, &config.credentials, params)
        .await
    {
        Ok(turn) => Some(turn),
        Err(err @ ExchangeError::MissingCredentials) => {
            warn!(
                "{} (EXA_API_KEY, GROQ_API_KEY, OPENWEATHER_API_KEY)",
                err
            );
            None
        }
        Err(ExchangeError::EmptyQuery) => None,
    }
}

fn print_turn(turn: &Turn) {
    println!("\n{}\n", turn.assistant_reply);

    if !turn.places.is_empty() {
        println!("Rekomendasi tempat:");
        for (i, place) in turn.places.iter().enumerate() {
            println!("{}", place_line(i, place));
        }
        println!();
    }
}

fn place_line(index: usize, place: &travelmate_core::PlaceResult) -> String {
    format!("  {}. {}: {}", index + 1, place.title, place.url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use travelmate_core::PlaceResult;

    #[test]
    fn test_place_line_is_plain_ascii() {
        let place = PlaceResult {
            title: "Pantai Kuta".to_string(),
            url: "https://example.com/kuta".to_string(),
        };
        let line = place_line(0, &place);
        assert_eq!(line, "  1. Pantai Kuta: https://example.com/kuta");
        assert!(line.is_ascii());
    }
}
