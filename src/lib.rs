//! Taboo Store - card catalog service for the Taboo word game
//!
//! Serves fixed, per-language catalogs of word cards in shuffled order and
//! collects best-effort problem reports from players.

pub mod config;
pub mod core;
pub mod deck;
pub mod error;
pub mod loader;
pub mod report;
pub mod server;

pub use error::{Result, TabooError};
