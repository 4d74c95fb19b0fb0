pub mod card_details;
pub mod cards;
pub mod catalog;
pub mod catalog_loader;
pub mod catalog_view_model;
pub mod error;
pub mod image_cache;
#[cfg(test)]
mod test;
pub mod utilities;

pub use card_details::CardDetails;
pub use cards::card::Card;
pub use catalog::{CardCatalog, CATALOG};
pub use catalog_loader::{CatalogLoader, CatalogSource};
pub use catalog_view_model::{CatalogViewModel, SortMode, SortOrder};
pub use error::{CatalogError, ImageFetchError};
pub use image_cache::{HttpImageFetcher, ImageCache, ImageFetcher, ImageSlot};
