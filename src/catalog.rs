use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};

use crate::cards::card::Card;
use crate::catalog_loader::{CatalogLoader, CatalogSource};
use crate::utilities::config::CONFIG;

/// The ordered, immutable list of cards shown by the browser.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    /// Keeps the file order. A card whose large image was already seen is a
    /// duplicate printing entry and is dropped.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut seen = HashSet::new();
        let cards = cards
            .into_iter()
            .filter(|card| {
                let first = seen.insert(card.id().to_string());
                if !first {
                    warn!(
                        "Dropping duplicate card '{}' with image {}",
                        card.name,
                        card.id()
                    );
                }
                first
            })
            .collect();
        CardCatalog { cards }
    }

    pub fn empty() -> Self {
        CardCatalog { cards: Vec::new() }
    }

    /// Loads the catalog, logging and swallowing any failure into an empty
    /// catalog so the browser still starts.
    pub fn load_or_empty(source: &CatalogSource) -> Self {
        let start_time = chrono::prelude::Local::now();
        info!("Loading catalog from {}", source);

        let catalog = match CatalogLoader::load(source) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to load catalog from {}: {}", source, e);
                CardCatalog::empty()
            }
        };

        let end_time = chrono::prelude::Local::now();
        info!(
            "Catalog load started at: {}. Finished at: {}. Took: {} ms and with {} cards",
            start_time,
            end_time,
            (end_time - start_time).num_milliseconds(),
            catalog.len()
        );
        catalog
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Looks a card up by its identity, the large image uri.
    pub fn get(&self, large_image_uri: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == large_image_uri)
    }

    /// All printings whose name matches exactly, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Vec<&Card> {
        let name = name.to_lowercase();
        self.cards
            .iter()
            .filter(|card| card.name.to_lowercase() == name)
            .collect()
    }
}

impl<'a> IntoIterator for &'a CardCatalog {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

pub fn configured_source() -> CatalogSource {
    match &CONFIG.catalog_path {
        Some(path) => CatalogSource::File(PathBuf::from(path)),
        None => CatalogSource::Bundled,
    }
}

lazy_static::lazy_static! {
    /// The process-wide catalog, loaded once on first use.
    pub static ref CATALOG: Arc<CardCatalog> = Arc::new(CardCatalog::load_or_empty(&configured_source()));
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test::helpers::{card, init, rest_in_peace, rhystic_study, rhystic_study_anime};
    use tempfile::tempdir;

    #[test]
    fn test_duplicate_images_are_dropped_keeping_first() {
        init();
        let mut duplicate = rhystic_study();
        duplicate.name = "Copy".to_string();

        let catalog = CardCatalog::new(vec![rhystic_study(), rest_in_peace(), duplicate]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.cards()[0].name, "Rhystic Study");
        assert_eq!(catalog.cards()[1].name, "Rest in Peace");
    }

    #[test]
    fn test_missing_data_key_yields_empty_catalog() {
        init();
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"object": "list"}"#).unwrap();

        let catalog = CardCatalog::load_or_empty(&CatalogSource::File(path));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let dir = tempdir().unwrap();
        let catalog = CardCatalog::load_or_empty(&CatalogSource::File(dir.path().join("x.json")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_lookup() {
        let catalog = CardCatalog::new(vec![rhystic_study(), rhystic_study_anime(), card("Odd", "9a")]);

        assert_eq!(catalog.find_by_name("rhystic study").len(), 2);
        assert!(catalog.find_by_name("rhystic").is_empty());
        let anime = rhystic_study_anime();
        assert_eq!(catalog.get(anime.id()).map(|c| c.collector_number.as_str()), Some("81"));
        assert!(catalog.get("https://nowhere").is_none());
    }

    #[test]
    fn test_global_catalog_is_shared() {
        let first = Arc::clone(&CATALOG);
        let second = Arc::clone(&CATALOG);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
