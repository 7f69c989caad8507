//! Catalog loaders
//!
//! Parser for the JSON card set format and the cached per-language store

pub mod card;
pub mod database;

pub use card::CardLoader;
pub use database::{CardSet, CatalogStore};
