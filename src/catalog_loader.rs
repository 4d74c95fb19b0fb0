use std::{fmt, io::Read, path::PathBuf};

use log::{debug, info};
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{error::Category, Value};

use crate::cards::card::{Card, ImageUris};
use crate::cards::collector_number::CollectorNumber;
use crate::cards::price::Prices;
use crate::catalog::CardCatalog;
use crate::error::CatalogError;
use crate::utilities::constants::{BUNDLED_CATALOG, BUNDLED_CATALOG_FILE_NAME};
use crate::utilities::file_management::load_from_json_file;

/// Top level shape of a catalog file: `{ "data": [Card...] }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub data: Vec<Card>,
}

/// Where the catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Bundled => write!(f, "bundled {}", BUNDLED_CATALOG_FILE_NAME),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(source: &CatalogSource) -> Result<CardCatalog, CatalogError> {
        match source {
            CatalogSource::Bundled => Self::from_slice(BUNDLED_CATALOG.as_bytes()),
            CatalogSource::File(path) => Self::from_path(path),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<CardCatalog, CatalogError> {
        let document: CatalogDocument = decode(bytes)?;
        debug!("Decoded {} cards", document.data.len());
        Ok(CardCatalog::new(document.data))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<CardCatalog, CatalogError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| CatalogError::Read { source })?;
        Self::from_slice(&bytes)
    }

    pub fn from_path(path: &std::path::Path) -> Result<CardCatalog, CatalogError> {
        info!("Reading catalog file: {}", path.display());
        let document: CatalogDocument = load_from_json_file(path)?;
        Ok(CardCatalog::new(document.data))
    }

    /// Encodes cards back into the catalog file shape.
    pub fn to_json(cards: &[Card]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&CatalogDocument {
            data: cards.to_vec(),
        })
    }
}

/// Strict decode of a JSON document. Mistyped or absent fields are reported
/// as [`CatalogError::Schema`] with the offending field when it can be found.
pub fn decode<T>(bytes: &[u8]) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => CatalogError::Schema {
            field: locate_invalid_field(bytes).or_else(|| field_from_message(&e.to_string())),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        },
        Category::Syntax | Category::Eof | Category::Io => CatalogError::Malformed {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        },
    })
}

lazy_static::lazy_static! {
    static ref FIELD_IN_MESSAGE: Regex =
        Regex::new(r"(?:missing|unknown|duplicate) field `([^`]+)`").unwrap();
}

fn field_from_message(message: &str) -> Option<String> {
    FIELD_IN_MESSAGE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

type FieldCheck = fn(Option<&Value>) -> bool;

const CARD_FIELDS: [(&str, FieldCheck); 9] = [
    ("name", is_valid::<String>),
    ("type_line", is_valid::<String>),
    ("oracle_text", is_valid::<String>),
    ("mana_cost", is_valid::<String>),
    ("image_uris", is_valid::<ImageUris>),
    ("prices", is_valid::<Prices>),
    ("legalities", is_valid::<std::collections::BTreeMap<String, String>>),
    ("games", is_valid::<Vec<String>>),
    ("collector_number", is_valid::<CollectorNumber>),
];

fn is_valid<T: DeserializeOwned>(value: Option<&Value>) -> bool {
    value.map_or(false, |v| T::deserialize(v).is_ok())
}

/// Walks the document to name the first field that breaks the card schema,
/// e.g. `data` or `data[3].mana_cost`.
fn locate_invalid_field(bytes: &[u8]) -> Option<String> {
    let document: Value = serde_json::from_slice(bytes).ok()?;
    let cards = match document.get("data") {
        Some(Value::Array(cards)) => cards,
        _ => return Some("data".to_string()),
    };

    cards.iter().enumerate().find_map(|(index, card)| {
        let card = match card.as_object() {
            Some(card) => card,
            None => return Some(format!("data[{}]", index)),
        };
        CARD_FIELDS
            .iter()
            .find(|(key, check)| !check(card.get(*key)))
            .map(|(key, _)| format!("data[{}].{}", index, key))
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test::helpers::{card, init, rest_in_peace, rhystic_study, rhystic_study_anime};
    use tempfile::tempdir;

    #[test]
    fn test_bundled_catalog_loads() {
        init();
        let catalog = CatalogLoader::load(&CatalogSource::Bundled).unwrap();

        assert_eq!(catalog.len(), 9);
        let rest_in_peace = &catalog.cards()[0];
        assert_eq!(rest_in_peace.name, "Rest in Peace");
        assert_eq!(rest_in_peace.mana_cost, "{1}{W}");
        assert_eq!(rest_in_peace.collector_number.as_str(), "1");
        assert_eq!(rest_in_peace.prices.usd.as_deref(), Some("1.12"));
        assert_eq!(rest_in_peace.legalities.get("pauper").map(String::as_str), Some("not_legal"));
        assert_eq!(rest_in_peace.games, vec!["paper", "mtgo"]);
    }

    #[test]
    fn test_null_and_absent_prices_are_none() {
        let json = r#"{"data": [{
            "name": "Doubling Season",
            "type_line": "Enchantment",
            "oracle_text": "",
            "mana_cost": "{4}{G}",
            "image_uris": {"large": "l", "normal": "n", "art_crop": "a", "border_crop": "b"},
            "prices": {"usd": "24.10", "eur": null},
            "legalities": {},
            "games": [],
            "collector_number": "51"
        }]}"#;

        let catalog = CatalogLoader::from_slice(json.as_bytes()).unwrap();
        let prices = &catalog.cards()[0].prices;
        assert_eq!(prices.usd.as_deref(), Some("24.10"));
        assert_eq!(prices.usd_foil, None);
        assert_eq!(prices.eur, None);
        assert_eq!(prices.eur_foil, None);
    }

    #[test]
    fn test_round_trip_is_field_for_field_equal() {
        let cards = vec![rest_in_peace(), rhystic_study(), rhystic_study_anime(), card("Odd", "9a")];

        let json = CatalogLoader::to_json(&cards).unwrap();
        let decoded = CatalogLoader::from_slice(json.as_bytes()).unwrap();

        assert_eq!(decoded.len(), cards.len());
        for (original, decoded) in cards.iter().zip(decoded.cards()) {
            assert_eq!(original.name, decoded.name);
            assert_eq!(original.type_line, decoded.type_line);
            assert_eq!(original.oracle_text, decoded.oracle_text);
            assert_eq!(original.mana_cost, decoded.mana_cost);
            assert_eq!(original.image_uris, decoded.image_uris);
            assert_eq!(original.prices, decoded.prices);
            assert_eq!(original.legalities, decoded.legalities);
            assert_eq!(original.games, decoded.games);
            assert_eq!(original.collector_number, decoded.collector_number);
        }
    }

    #[test]
    fn test_missing_data_key_is_schema_error() {
        let err = CatalogLoader::from_slice(br#"{"cards": []}"#).unwrap_err();
        match err {
            CatalogError::Schema { field, .. } => assert_eq!(field.as_deref(), Some("data")),
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_mistyped_field_is_named() {
        let json = r#"{"data": [{
            "name": "Broken",
            "type_line": "Enchantment",
            "oracle_text": "",
            "mana_cost": 3,
            "image_uris": {"large": "l", "normal": "n", "art_crop": "a", "border_crop": "b"},
            "prices": {},
            "legalities": {},
            "games": [],
            "collector_number": "1"
        }]}"#;

        let err = CatalogLoader::from_slice(json.as_bytes()).unwrap_err();
        match err {
            CatalogError::Schema { field, line, .. } => {
                assert_eq!(field.as_deref(), Some("data[0].mana_cost"));
                assert!(line > 0);
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_image_uri_is_named() {
        let json = r#"{"data": [{
            "name": "Broken",
            "type_line": "Enchantment",
            "oracle_text": "",
            "mana_cost": "",
            "image_uris": {"normal": "n", "art_crop": "a", "border_crop": "b"},
            "prices": {},
            "legalities": {},
            "games": [],
            "collector_number": "1"
        }]}"#;

        let err = CatalogLoader::from_slice(json.as_bytes()).unwrap_err();
        match err {
            CatalogError::Schema { field, message, .. } => {
                assert_eq!(field.as_deref(), Some("data[0].image_uris"));
                assert!(message.contains("missing field `large`"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let err = CatalogLoader::from_slice(br#"{"data": [{"name": "#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn test_field_from_message() {
        assert_eq!(
            field_from_message("missing field `type_line` at line 3 column 5"),
            Some("type_line".to_string())
        );
        assert_eq!(field_from_message("invalid type: integer `3`"), None);
    }

    #[test]
    fn test_load_from_file_and_reader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards.json");
        fs::write(&path, CatalogLoader::to_json(&[rhystic_study()]).unwrap()).unwrap();

        let from_file = CatalogLoader::load(&CatalogSource::File(path.clone())).unwrap();
        assert_eq!(from_file.len(), 1);

        let from_reader = CatalogLoader::from_reader(fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(from_reader.cards()[0].name, "Rhystic Study");
    }

    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "source went away",
            ))
        }
    }

    #[test]
    fn test_unreadable_source_is_read_error() {
        let err = CatalogLoader::from_reader(FailingReader).unwrap_err();
        match err {
            CatalogError::Read { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe)
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = CatalogLoader::load(&CatalogSource::File(dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
