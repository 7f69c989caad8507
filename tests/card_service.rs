//! Card retrieval tests
//!
//! Decks are permutations of the source catalogs: order may change between
//! calls, contents and counts never do.

use similar_asserts::assert_eq;
use std::collections::HashSet;
use std::path::Path;
use taboo_store::{
    core::{Card, Language, LanguageFilter},
    deck::CardService,
    loader::CatalogStore,
    Result,
};
use tempfile::TempDir;

fn write_catalog(dir: &Path, language: Language, ids: &[&str]) {
    let cards: Vec<Card> = ids
        .iter()
        .map(|id| {
            Card::new(
                *id,
                format!("{language} word {id}"),
                vec!["one".to_string(), "two".to_string()],
            )
        })
        .collect();
    std::fs::write(
        dir.join(language.file_name()),
        serde_json::to_string_pretty(&cards).unwrap(),
    )
    .unwrap();
}

fn sorted_words(cards: &[Card]) -> Vec<String> {
    let mut words: Vec<String> = cards.iter().map(|c| c.word_to_guess.clone()).collect();
    words.sort();
    words
}

fn setup() -> (TempDir, CardService) {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), Language::English, &["1", "2", "3", "4"]);
    write_catalog(dir.path(), Language::Portuguese, &["1", "2", "3"]);
    let service = CardService::new(CatalogStore::new(dir.path()));
    (dir, service)
}

#[tokio::test]
async fn test_both_combines_both_sets() -> Result<()> {
    let (_dir, service) = setup();

    let deck = service.get_cards(LanguageFilter::Both).await?;
    let english = service.store().load(Language::English).await?;
    let portuguese = service.store().load(Language::Portuguese).await?;

    assert_eq!(deck.total, english.len() + portuguese.len());
    assert_eq!(deck.total, deck.cards.len());

    // Ids repeat across languages, so compare whole cards
    let mut expected: Vec<Card> = english.iter().chain(portuguese.iter()).cloned().collect();
    expected.sort_by(|a, b| a.word_to_guess.cmp(&b.word_to_guess));
    let mut actual = deck.cards.clone();
    actual.sort_by(|a, b| a.word_to_guess.cmp(&b.word_to_guess));
    assert_eq!(actual, expected);
    Ok(())
}

#[tokio::test]
async fn test_repeated_calls_are_permutations() -> Result<()> {
    let (_dir, service) = setup();
    let source = service.assemble(LanguageFilter::Both).await?;

    for _ in 0..25 {
        let deck = service.get_cards(LanguageFilter::Both).await?;
        assert_eq!(deck.total, source.len());
        assert_eq!(sorted_words(&deck.cards), sorted_words(&source));
    }
    Ok(())
}

#[tokio::test]
async fn test_english_two_cards() -> Result<()> {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), Language::English, &["1", "2"]);
    let service = CardService::new(CatalogStore::new(dir.path()));

    let deck = service.get_cards(LanguageFilter::English).await?;
    assert_eq!(deck.total, 2);

    let ids: HashSet<&str> = deck.cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["1", "2"]));

    // The Portuguese file was never needed
    assert!(!service.store().contains(Language::Portuguese).await);
    Ok(())
}

#[tokio::test]
async fn test_shuffle_eventually_reorders() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    write_catalog(dir.path(), Language::English, &id_refs);
    let service = CardService::with_seed(CatalogStore::new(dir.path()), 1234);

    let mut orders = HashSet::new();
    for _ in 0..20 {
        let deck = service.get_cards(LanguageFilter::English).await?;
        let order: Vec<String> = deck.cards.into_iter().map(|c| c.id).collect();
        orders.insert(order);
    }

    // 20 draws from 10! orders landing on a single one means no shuffling
    assert!(orders.len() > 1);
    Ok(())
}

#[tokio::test]
async fn test_every_position_reachable() -> Result<()> {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), Language::English, &["a", "b", "c"]);
    let service = CardService::with_seed(CatalogStore::new(dir.path()), 99);

    let mut first_ids = HashSet::new();
    for _ in 0..200 {
        let deck = service.get_cards(LanguageFilter::English).await?;
        first_ids.insert(deck.cards[0].id.clone());
    }
    assert_eq!(first_ids.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_both_fails_when_one_language_is_missing() {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), Language::English, &["1", "2"]);
    let service = CardService::new(CatalogStore::new(dir.path()));

    let err = service.get_cards(LanguageFilter::Both).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err}");
    assert!(err.to_string().contains("taboo_cards_portuguese.json"));

    // English alone still works
    let deck = service.get_cards(LanguageFilter::English).await.unwrap();
    assert_eq!(deck.total, 2);
}

#[tokio::test]
async fn test_both_fails_when_one_language_is_invalid() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(Language::English.file_name()),
        r#"[{"id": "1", "forbiddenWords": []}]"#,
    )
    .unwrap();
    write_catalog(dir.path(), Language::Portuguese, &["1"]);
    let service = CardService::new(CatalogStore::new(dir.path()));

    let err = service.get_cards(LanguageFilter::Both).await.unwrap_err();
    assert!(err.is_validation(), "expected Validation, got {err}");
}
