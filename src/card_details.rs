use log::warn;

use crate::cards::card::Card;
use crate::cards::legality::Legality;
use crate::cards::mana_cost::ManaCost;
use crate::utilities::string_manipulators::title_case;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalityLine {
    pub format: String,
    pub legality: Legality,
}

impl LegalityLine {
    pub fn format_label(&self) -> String {
        title_case(&self.format)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    pub label: String,
    pub value: String,
}

/// Everything the detail screen shows for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub name: String,
    pub type_line: String,
    pub oracle_text: String,
    pub mana_cost: ManaCost,
    pub collector_number: String,
    pub hero_image_uri: String,
    pub zoomed_image_uri: String,
    pub prices: Vec<PriceLine>,
    /// Sorted by format name.
    pub legalities: Vec<LegalityLine>,
    pub games: Vec<String>,
}

impl CardDetails {
    pub fn from_card(card: &Card) -> Self {
        let mana_cost = match ManaCost::parse(&card.mana_cost) {
            Ok(cost) => cost,
            Err(e) => {
                warn!(
                    "Could not parse mana cost '{}' of {}: {}",
                    card.mana_cost, card.name, e
                );
                ManaCost::default()
            }
        };

        let prices = card
            .prices
            .available()
            .into_iter()
            .map(|price| PriceLine {
                label: price.label(),
                value: price.to_string(),
            })
            .collect();

        // BTreeMap iterates in format order
        let legalities = card
            .legalities
            .iter()
            .map(|(format, status)| LegalityLine {
                format: format.clone(),
                legality: Legality::from(status.as_str()),
            })
            .collect();

        CardDetails {
            name: card.name.clone(),
            type_line: card.type_line.clone(),
            oracle_text: card.oracle_text.clone(),
            mana_cost,
            collector_number: card.collector_number.to_string(),
            hero_image_uri: card.image_uris.art_crop.clone(),
            zoomed_image_uri: card.image_uris.border_crop.clone(),
            prices,
            legalities,
            games: card.games.clone(),
        }
    }

    pub fn legal_formats(&self) -> Vec<&str> {
        self.legalities
            .iter()
            .filter(|line| line.legality.is_legal())
            .map(|line| line.format.as_str())
            .collect()
    }
}
