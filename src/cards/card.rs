use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{collector_number::CollectorNumber, legality::Legality, price::Prices};

/// One printing of a card as found in the catalog file.
///
/// Two printings may share a name, but never a large image, so equality and
/// hashing only look at `image_uris.large`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub type_line: String,
    pub oracle_text: String,
    pub mana_cost: String,
    pub image_uris: ImageUris,
    pub prices: Prices,
    pub legalities: BTreeMap<String, String>,
    pub games: Vec<String>,
    pub collector_number: CollectorNumber,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ImageUris {
    pub large: String,
    pub normal: String,
    pub art_crop: String,
    pub border_crop: String,
}

impl Card {
    pub fn id(&self) -> &str {
        &self.image_uris.large
    }

    /// Image shown in the grid.
    pub fn thumbnail_uri(&self) -> &str {
        &self.image_uris.art_crop
    }

    pub fn legality(&self, format: &str) -> Option<Legality> {
        self.legalities.get(format).map(|status| Legality::from(status.as_str()))
    }

    pub fn is_legal_in(&self, format: &str) -> bool {
        matches!(self.legality(format), Some(Legality::Legal))
    }

    pub fn available_in(&self, game: &str) -> bool {
        self.games.iter().any(|g| g == game)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.image_uris.large == other.image_uris.large
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.image_uris.large.hash(state);
    }
}
