use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;

use crate::card_details::CardDetails;
use crate::cards::card::Card;
use crate::catalog::CardCatalog;
use crate::utilities::string_manipulators::normalize_for_search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Alphabetical,
    CollectorNumber,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Alphabetical => write!(f, "alpha"),
            SortMode::CollectorNumber => write!(f, "number"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alpha" | "alphabetical" | "name" => Ok(SortMode::Alphabetical),
            "number" | "numeric" | "collector_number" => Ok(SortMode::CollectorNumber),
            other => Err(format!("Unknown sort mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub mode: SortMode,
    pub ascending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            mode: SortMode::Alphabetical,
            ascending: true,
        }
    }
}

impl SortOrder {
    pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
        let ordering = match self.mode {
            SortMode::Alphabetical => compare_alphabetically(a, b),
            SortMode::CollectorNumber => compare_by_collector_number(a, b),
        };
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Name in plain byte order, then collector number text, then the large image
/// uri, which is unique within a catalog.
pub fn compare_alphabetically(a: &Card, b: &Card) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.collector_number.as_str().cmp(b.collector_number.as_str()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Numeric collector numbers first, in numeric order. Cards whose number does
/// not parse come after all of them, ordered alphabetically.
pub fn compare_by_collector_number(a: &Card, b: &Card) -> Ordering {
    match (a.collector_number.as_number(), b.collector_number.as_number()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| compare_alphabetically(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_alphabetically(a, b),
    }
}

/// State behind the catalog screen: the loaded cards, the search text and the
/// sort order, plus the card opened on the detail screen.
#[derive(Debug, Clone)]
pub struct CatalogViewModel {
    catalog: Arc<CardCatalog>,
    search_text: String,
    sort: SortOrder,
    selected: Option<String>,
}

impl CatalogViewModel {
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self {
            catalog,
            search_text: String::new(),
            sort: SortOrder::default(),
            selected: None,
        }
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn set_search_text(&mut self, text: &str) {
        debug!("Search text changed to '{}'", text);
        self.search_text = text.to_string();
    }

    pub fn clear_search(&mut self) {
        self.set_search_text("");
    }

    pub fn set_sort_mode(&mut self, mode: SortMode, ascending: bool) {
        debug!("Sorting by {} ascending: {}", mode, ascending);
        self.sort = SortOrder { mode, ascending };
    }

    pub fn toggle_direction(&mut self) {
        self.set_sort_mode(self.sort.mode, !self.sort.ascending);
    }

    /// Cards whose name contains the search text, ignoring case, in the
    /// current sort order. An empty search matches every card.
    pub fn sorted_filtered_cards(&self) -> Vec<&Card> {
        let needle = normalize_for_search(&self.search_text);
        let mut cards: Vec<&Card> = self
            .catalog
            .iter()
            .filter(|card| needle.is_empty() || normalize_for_search(&card.name).contains(&needle))
            .collect();
        cards.sort_by(|a, b| self.sort.compare(a, b));
        cards
    }

    /// Opens the detail screen for the card with this large image uri.
    /// Returns false when no such card exists.
    pub fn select_card(&mut self, large_image_uri: &str) -> bool {
        if self.catalog.get(large_image_uri).is_some() {
            self.selected = Some(large_image_uri.to_string());
            true
        } else {
            debug!("No card with image {} to select", large_image_uri);
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.selected
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    pub fn selected_details(&self) -> Option<CardDetails> {
        self.selected_card().map(CardDetails::from_card)
    }
}
