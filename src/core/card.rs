//! Card types and language codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One round of the game: a word to guess and the words you may not say
///
/// Field names follow the JSON catalog files and the wire format
/// (`wordToGuess`, `forbiddenWords`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Identifier, unique within the card's language set
    pub id: String,

    /// The secret word
    pub word_to_guess: String,

    /// Helper words the clue-giver is not allowed to say (may be empty)
    pub forbidden_words: Vec<String>,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        word_to_guess: impl Into<String>,
        forbidden_words: Vec<String>,
    ) -> Self {
        Card {
            id: id.into(),
            word_to_guess: word_to_guess.into(),
            forbidden_words,
        }
    }
}

/// A language that has its own catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    Portuguese,
}

impl Language {
    /// All languages, in the order they are concatenated for the combined view
    pub const ALL: [Language; 2] = [Language::English, Language::Portuguese];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Portuguese => "pt",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Portuguese => "Portuguese",
        }
    }

    /// Catalog file name inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Language::English => "taboo_cards_english.json",
            Language::Portuguese => "taboo_cards_portuguese.json",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which catalog(s) a request draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LanguageFilter {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt")]
    Portuguese,
    #[default]
    #[serde(rename = "both")]
    Both,
}

impl LanguageFilter {
    /// Languages covered by this filter, English first
    pub fn languages(self) -> &'static [Language] {
        match self {
            LanguageFilter::English => &[Language::English],
            LanguageFilter::Portuguese => &[Language::Portuguese],
            LanguageFilter::Both => &Language::ALL,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            LanguageFilter::English => "en",
            LanguageFilter::Portuguese => "pt",
            LanguageFilter::Both => "both",
        }
    }
}

impl FromStr for LanguageFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(LanguageFilter::English),
            "pt" => Ok(LanguageFilter::Portuguese),
            "both" => Ok(LanguageFilter::Both),
            _ => Err(format!("invalid language '{s}' (expected: en, pt, both)")),
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
