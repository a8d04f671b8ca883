//! # AI Suggestion Provider
//!
//! Seam for AI-assisted item naming and pricing. The shell may plug in
//! a real provider backed by a remote model; [`FallbackSuggester`] is
//! the always-available offline implementation.
//!
//! ## Contract
//! - `suggest_name`: improve a rough item description ("10kg silk
//!   cotton" -> "Silk Cotton (10 kg)"). `None` means no suggestion;
//!   the caller keeps the user's text.
//! - `suggest_price`: plausible price for an item description. `None`
//!   means no idea; the caller must never invent a price.

/// Source of name and price suggestions for line items.
pub trait SuggestionProvider: Send + Sync {
    /// Suggests a cleaned-up item name, or `None` to keep the input.
    fn suggest_name(&self, raw: &str) -> Option<String>;

    /// Suggests a price for the item, or `None` when unknown.
    fn suggest_price(&self, item_name: &str) -> Option<f64>;
}

/// Deterministic offline fallback.
///
/// Names are title-cased word by word; prices are never guessed.
#[derive(Debug, Clone, Default)]
pub struct FallbackSuggester;

impl SuggestionProvider for FallbackSuggester {
    fn suggest_name(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(title_case(trimmed))
    }

    fn suggest_price(&self, _item_name: &str) -> Option<f64> {
        // A made-up price is worse than none
        None
    }
}

/// Uppercases the first character of each whitespace-separated word.
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_title_cases_words() {
        let suggester = FallbackSuggester;
        assert_eq!(
            suggester.suggest_name("premium silk cotton").as_deref(),
            Some("Premium Silk Cotton")
        );
        assert_eq!(
            suggester.suggest_name("10kg silk cotton").as_deref(),
            Some("10kg Silk Cotton")
        );
    }

    #[test]
    fn fallback_declines_empty_input() {
        let suggester = FallbackSuggester;
        assert_eq!(suggester.suggest_name(""), None);
        assert_eq!(suggester.suggest_name("   "), None);
    }

    #[test]
    fn fallback_never_invents_prices() {
        let suggester = FallbackSuggester;
        assert_eq!(suggester.suggest_price("Standard Pillow Cover"), None);
    }
}
