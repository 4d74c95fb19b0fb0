use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};

use crate::cards::card::{Card, ImageUris};
use crate::cards::collector_number::CollectorNumber;
use crate::cards::price::Prices;
use crate::catalog::CardCatalog;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn image_uris(slug: &str) -> ImageUris {
    ImageUris {
        large: format!("https://cards.scryfall.io/large/front/{}.jpg", slug),
        normal: format!("https://cards.scryfall.io/normal/front/{}.jpg", slug),
        art_crop: format!("https://cards.scryfall.io/art_crop/front/{}.jpg", slug),
        border_crop: format!("https://cards.scryfall.io/border_crop/front/{}.jpg", slug),
    }
}

fn legalities(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(format, status)| (format.to_string(), status.to_string()))
        .collect()
}

/// A plain enchantment whose identity is derived from its name and number.
pub fn card(name: &str, collector_number: &str) -> Card {
    let slug = format!(
        "{}-{}",
        name.to_lowercase().replace(' ', "-"),
        collector_number
    );
    Card {
        name: name.to_string(),
        type_line: "Enchantment".to_string(),
        oracle_text: "".to_string(),
        mana_cost: "{1}".to_string(),
        image_uris: image_uris(&slug),
        prices: Prices::default(),
        legalities: legalities(&[("commander", "legal")]),
        games: vec!["paper".to_string()],
        collector_number: CollectorNumber::new(collector_number),
    }
}

pub fn rest_in_peace() -> Card {
    Card {
        name: "Rest in Peace".to_string(),
        type_line: "Enchantment".to_string(),
        oracle_text: "When Rest in Peace enters the battlefield, exile all graveyards.\nIf a card or token would be put into a graveyard from anywhere, exile it instead.".to_string(),
        mana_cost: "{1}{W}".to_string(),
        image_uris: image_uris("rest-in-peace-1"),
        prices: Prices {
            usd: Some("1.12".to_string()),
            usd_foil: Some("2.40".to_string()),
            eur: Some("0.95".to_string()),
            eur_foil: Some("2.10".to_string()),
        },
        legalities: legalities(&[
            ("commander", "legal"),
            ("legacy", "legal"),
            ("modern", "legal"),
            ("pauper", "not_legal"),
            ("vintage", "legal"),
        ]),
        games: vec!["paper".to_string(), "mtgo".to_string()],
        collector_number: CollectorNumber::new("1"),
    }
}

pub fn rhystic_study() -> Card {
    Card {
        name: "Rhystic Study".to_string(),
        type_line: "Enchantment".to_string(),
        oracle_text:
            "Whenever an opponent casts a spell, you may draw a card unless that player pays {1}."
                .to_string(),
        mana_cost: "{2}{U}".to_string(),
        image_uris: image_uris("rhystic-study-17"),
        prices: Prices {
            usd: Some("31.20".to_string()),
            usd_foil: Some("44.00".to_string()),
            eur: Some("27.30".to_string()),
            eur_foil: None,
        },
        legalities: legalities(&[
            ("commander", "legal"),
            ("legacy", "legal"),
            ("modern", "not_legal"),
            ("pauper", "not_legal"),
            ("vintage", "legal"),
        ]),
        games: vec!["paper".to_string(), "mtgo".to_string()],
        collector_number: CollectorNumber::new("17"),
    }
}

pub fn rhystic_study_anime() -> Card {
    Card {
        image_uris: image_uris("rhystic-study-81"),
        prices: Prices {
            usd: Some("58.00".to_string()),
            usd_foil: Some("92.00".to_string()),
            eur: Some("49.90".to_string()),
            eur_foil: None,
        },
        games: vec!["paper".to_string()],
        collector_number: CollectorNumber::new("81"),
        ..rhystic_study()
    }
}

pub fn catalog_of(cards: Vec<Card>) -> Arc<CardCatalog> {
    Arc::new(CardCatalog::new(cards))
}

/// A tiny valid png.
pub fn png_bytes() -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::new_rgb8(3, 2)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}
