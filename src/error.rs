//! Error types for the Taboo card store

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabooError {
    /// The catalog file for a language is missing on disk
    #[error("Card file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The catalog file exists but its content is not a valid card set
    #[error("Invalid card data in {}: {message}", .path.display())]
    Validation { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TabooError {
    /// HTTP status code the serving layer should answer with
    ///
    /// Only a missing catalog file is the client's business (404); a broken
    /// file or any other failure is a deployment defect (500).
    pub fn status_code(&self) -> u16 {
        match self {
            TabooError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TabooError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TabooError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, TabooError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = TabooError::NotFound {
            path: PathBuf::from("data/taboo_cards_english.json"),
        };
        assert_eq!(not_found.status_code(), 404);
        assert!(not_found.is_not_found());

        let invalid = TabooError::Validation {
            path: PathBuf::from("data/taboo_cards_english.json"),
            message: "expected a JSON array".to_string(),
        };
        assert_eq!(invalid.status_code(), 500);
        assert!(invalid.is_validation());

        let io = TabooError::IoError(std::io::Error::other("disk on fire"));
        assert_eq!(io.status_code(), 500);
    }

    #[test]
    fn test_not_found_message_names_the_file() {
        let err = TabooError::NotFound {
            path: PathBuf::from("data/taboo_cards_portuguese.json"),
        };
        assert!(err.to_string().contains("taboo_cards_portuguese.json"));
    }
}
