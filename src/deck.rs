//! Card retrieval: compose language sets into a freshly shuffled deck

use crate::core::{Card, LanguageFilter};
use crate::loader::CatalogStore;
use crate::Result;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// A shuffled deck handed to the client
///
/// `total` is always `cards.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub cards: Vec<Card>,
    pub total: usize,
}

impl Deck {
    fn new(cards: Vec<Card>) -> Self {
        let total = cards.len();
        Deck { cards, total }
    }

    /// Keep only the first `len` cards
    pub fn truncate(&mut self, len: usize) {
        self.cards.truncate(len);
        self.total = self.cards.len();
    }
}

/// Retrieval service over a [`CatalogStore`]
///
/// Cloning is cheap; clones share the store and the RNG.
#[derive(Clone)]
pub struct CardService {
    store: CatalogStore,
    rng: Arc<Mutex<ChaCha12Rng>>,
}

impl CardService {
    /// Service shuffling with an entropy-seeded RNG
    pub fn new(store: CatalogStore) -> Self {
        Self::with_rng(store, ChaCha12Rng::from_entropy())
    }

    /// Service with a fixed seed, for reproducible decks
    pub fn with_seed(store: CatalogStore, seed: u64) -> Self {
        Self::with_rng(store, ChaCha12Rng::seed_from_u64(seed))
    }

    fn with_rng(store: CatalogStore, rng: ChaCha12Rng) -> Self {
        CardService {
            store,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Source-ordered concatenation of the filter's language sets
    ///
    /// English comes before Portuguese. Any failing language aborts the
    /// whole call; no partial catalog is returned.
    pub async fn assemble(&self, filter: LanguageFilter) -> Result<Vec<Card>> {
        let mut cards = Vec::new();
        for &language in filter.languages() {
            let set = self.store.load(language).await?;
            cards.extend_from_slice(&set);
        }
        Ok(cards)
    }

    /// Get a uniformly shuffled deck for the filter
    ///
    /// The cached sets are never reordered; each call shuffles its own copy.
    pub async fn get_cards(&self, filter: LanguageFilter) -> Result<Deck> {
        let mut cards = self.assemble(filter).await?;
        self.shuffle(&mut cards);
        log::debug!("Serving {} shuffled cards for '{filter}'", cards.len());
        Ok(Deck::new(cards))
    }

    /// Fisher-Yates shuffle using the service's RNG
    fn shuffle(&self, cards: &mut [Card]) {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        cards.shuffle(&mut *rng);
    }
}
