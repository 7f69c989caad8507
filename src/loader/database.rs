//! Catalog store: lazily loaded, memoized card sets per language
//!
//! Each language set is read from its fixed file under the data directory the
//! first time it is requested and kept for the life of the store. Only
//! successful loads are cached, so a broken or missing file is retried on the
//! next request.

use crate::core::{Card, Language};
use crate::loader::card::CardLoader;
use crate::{Result, TabooError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A validated language set, shared between the cache and callers
pub type CardSet = Arc<[Card]>;

/// Catalog store with per-language caching
///
/// Cloning is cheap and clones share the cache.
#[derive(Clone)]
pub struct CatalogStore {
    /// Directory holding the catalog files
    data_dir: PathBuf,
    /// Loaded language sets (shared, thread-safe)
    cache: Arc<RwLock<HashMap<Language, CardSet>>>,
    /// Number of catalog files read from disk
    disk_reads: Arc<AtomicUsize>,
}

impl CatalogStore {
    /// Create a store reading from `data_dir`; nothing is loaded yet
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        CatalogStore {
            data_dir: data_dir.into(),
            cache: Arc::new(RwLock::new(HashMap::new())),
            disk_reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the catalog file for a language
    pub fn path_for(&self, language: Language) -> PathBuf {
        self.data_dir.join(language.file_name())
    }

    /// Load a language set, from the cache when possible
    ///
    /// Concurrent cold loads of the same language may each read the file;
    /// they all validate the same content and write the same value.
    pub async fn load(&self, language: Language) -> Result<CardSet> {
        {
            let cache = self.cache.read().await;
            if let Some(cards) = cache.get(&language) {
                log::debug!("Catalog cache hit for '{language}' ({} cards)", cards.len());
                return Ok(Arc::clone(cards));
            }
        }

        let path = self.path_for(language);
        let cards: CardSet = match self.read_card_set(&path).await {
            Ok(cards) => cards.into(),
            Err(e) => {
                log::warn!("Failed to load '{language}' catalog: {e}");
                return Err(e);
            }
        };

        log::info!(
            "Loaded {} '{language}' cards from {}",
            cards.len(),
            path.display()
        );

        let mut cache = self.cache.write().await;
        let cached = cache.entry(language).or_insert(cards);
        Ok(Arc::clone(cached))
    }

    /// Warm the cache for every language
    ///
    /// Failures are logged and skipped; the failing language will be retried
    /// by the next request that needs it. Returns the number of languages
    /// now cached.
    pub async fn preload(&self) -> usize {
        let mut loaded = 0;
        for language in Language::ALL {
            if self.load(language).await.is_ok() {
                loaded += 1;
            }
        }
        loaded
    }

    /// Read and validate one catalog file
    async fn read_card_set(&self, path: &Path) -> Result<Vec<Card>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            // A data_dir that is not a directory has no catalog files either
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                return Err(TabooError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Err(TabooError::Validation {
                    path: path.to_path_buf(),
                    message: format!("file is not valid UTF-8: {e}"),
                })
            }
            Err(e) => return Err(TabooError::IoError(e)),
        };
        self.disk_reads.fetch_add(1, Ordering::Relaxed);

        CardLoader::parse(path, &contents)
    }

    /// Check if a language set is cached
    pub async fn contains(&self, language: Language) -> bool {
        let cache = self.cache.read().await;
        cache.contains_key(&language)
    }

    /// Number of language sets currently cached
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.len()
    }

    pub async fn is_empty(&self) -> bool {
        let cache = self.cache.read().await;
        cache.is_empty()
    }

    /// Number of catalog files successfully read from disk so far
    pub fn disk_reads(&self) -> usize {
        self.disk_reads.load(Ordering::Relaxed)
    }
}
