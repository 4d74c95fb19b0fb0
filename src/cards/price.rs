use std::fmt;

use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// The four optional price fields of a card, kept as the decimal text found in
/// the catalog file.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
}

impl Prices {
    /// All prices that are present, in the order usd, usd foil, eur, eur foil.
    pub fn available(&self) -> Vec<Price<'_>> {
        [
            (&self.usd, Currency::USD, false),
            (&self.usd_foil, Currency::USD, true),
            (&self.eur, Currency::EUR, false),
            (&self.eur_foil, Currency::EUR, true),
        ]
        .into_iter()
        .filter_map(|(amount, currency, foil)| {
            amount
                .as_deref()
                .map(|amount| Price::new(amount, currency, foil))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.available().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price<'a> {
    pub amount: &'a str,
    pub currency: Currency,
    pub foil: bool,
}

impl<'a> Price<'a> {
    pub fn new(amount: &'a str, currency: Currency, foil: bool) -> Self {
        Self {
            amount,
            currency,
            foil,
        }
    }

    /// Label used on the detail screen, e.g. "USD foil".
    pub fn label(&self) -> String {
        if self.foil {
            format!("{} foil", self.currency)
        } else {
            self.currency.to_string()
        }
    }
}

impl fmt::Display for Price<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency.symbol(), self.amount)
    }
}
