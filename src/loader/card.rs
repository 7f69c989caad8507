//! Card set loader (JSON format)
//!
//! A catalog file is a JSON array of card objects:
//!
//! ```json
//! [
//!   {"id": "1", "wordToGuess": "Beach", "forbiddenWords": ["sand", "sea", "sun"]}
//! ]
//! ```
//!
//! Validation is all-or-nothing: one malformed element rejects the whole file.

use crate::core::Card;
use crate::{Result, TabooError};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Card set loader for catalog files
pub struct CardLoader;

impl CardLoader {
    /// Parse and validate a whole card set
    ///
    /// `path` is only used to label errors.
    pub fn parse(path: &Path, content: &str) -> Result<Vec<Card>> {
        let invalid = |message: String| TabooError::Validation {
            path: path.to_path_buf(),
            message,
        };

        let document: Value =
            serde_json::from_str(content).map_err(|e| invalid(format!("invalid JSON: {e}")))?;

        let elements = match document {
            Value::Array(elements) => elements,
            other => {
                return Err(invalid(format!(
                    "expected a JSON array of cards, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut cards = Vec::with_capacity(elements.len());
        let mut seen_ids = HashSet::with_capacity(elements.len());

        for (index, element) in elements.into_iter().enumerate() {
            let card = Self::parse_card(element)
                .map_err(|e| invalid(format!("card #{index}: {e}")))?;

            if !seen_ids.insert(card.id.clone()) {
                return Err(invalid(format!("card #{index}: duplicate id '{}'", card.id)));
            }
            cards.push(card);
        }

        Ok(cards)
    }

    /// Validate a single element against the card schema
    fn parse_card(element: Value) -> std::result::Result<Card, String> {
        if !element.is_object() {
            return Err(format!("expected an object, found {}", json_kind(&element)));
        }

        let card: Card = serde_json::from_value(element).map_err(|e| e.to_string())?;

        if card.word_to_guess.is_empty() {
            return Err("field `wordToGuess` must not be empty".to_string());
        }

        Ok(card)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
