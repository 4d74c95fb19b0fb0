pub mod card;
pub mod collector_number;
pub mod currency;
pub mod legality;
pub mod mana_cost;
pub mod price;
