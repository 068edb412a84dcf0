//! Prompt composer
//!
//! The one piece of pure business logic in the pipeline: a deterministic
//! template combining the user's query, the place results and the weather
//! line into a single completion prompt. No I/O.

use crate::models::PlaceResult;
use std::fmt::Write;

/// Build the completion prompt for one exchange
///
/// Identical inputs always produce byte-identical output. The place block is
/// omitted entirely when there are no results; the weather line is always
/// present.
pub fn compose(user_query: &str, places: &[PlaceResult], weather: &str) -> String {
    let mut context = String::new();
    if !places.is_empty() {
        context.push_str("Rekomendasi tempat:\n");
        for place in places {
            // write! into a String cannot fail
            let _ = writeln!(context, "- {}: {}", place.title, place.url);
        }
    }
    let _ = writeln!(context, "\nCuaca saat ini di {}: {}", user_query, weather);

    format!(
        "\nKamu adalah TravelMate AI, asisten perjalanan yang ramah dan pintar.\n\
         Pengguna bertanya: \"{user_query}\"\n\
         Gunakan data ini untuk membantu:\n\
         {context}\n\n\
         Buat jawaban dengan gaya santai, ramah, dan relevan.\n\
         Sertakan tips wisata, rekomendasi, dan insight menarik.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_places() -> Vec<PlaceResult> {
        vec![
            PlaceResult {
                title: "Pantai Kuta".to_string(),
                url: "https://example.com/kuta".to_string(),
            },
            PlaceResult {
                title: "Ubud".to_string(),
                url: "https://example.com/ubud".to_string(),
            },
        ]
    }

    #[test]
    fn test_compose_is_deterministic() {
        let places = sample_places();
        let first = compose("Bali", &places, "Cerah, 29°C");
        let second = compose("Bali", &places, "Cerah, 29°C");
        assert_eq!(first, second);
    }

    #[test]
    fn test_compose_lists_each_place_on_its_own_line() {
        let prompt = compose("Bali", &sample_places(), "Cerah, 29°C");
        assert!(prompt.contains("Rekomendasi tempat:\n"));
        assert!(prompt.contains("- Pantai Kuta: https://example.com/kuta\n"));
        assert!(prompt.contains("- Ubud: https://example.com/ubud\n"));
    }

    #[test]
    fn test_compose_omits_place_block_when_empty() {
        let prompt = compose("Bali", &[], "Cerah, 29°C");
        assert!(!prompt.contains("Rekomendasi tempat"));
        assert!(prompt.contains("Cuaca saat ini di Bali: Cerah, 29°C"));
    }

    #[test]
    fn test_compose_embeds_query_and_instructions() {
        let prompt = compose("Lombok", &[], "Hujan ringan, 26°C");
        assert!(prompt.contains("Pengguna bertanya: \"Lombok\""));
        assert!(prompt.contains("Buat jawaban dengan gaya santai, ramah, dan relevan."));
        assert!(prompt.contains("Sertakan tips wisata, rekomendasi, dan insight menarik."));
    }

    #[test]
    fn test_different_weather_changes_output() {
        let sunny = compose("Bali", &[], "Cerah, 29°C");
        let rainy = compose("Bali", &[], "Hujan, 24°C");
        assert_ne!(sunny, rainy);
    }
}
