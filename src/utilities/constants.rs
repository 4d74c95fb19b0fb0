pub const BUNDLED_CATALOG_FILE_NAME: &str = "WOT-Scryfall.json";
pub const BUNDLED_CATALOG: &str = include_str!("../../assets/WOT-Scryfall.json");

pub const DEFAULT_IMAGE_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PREFETCH_CONCURRENCY: usize = 8;

pub const USER_AGENT: &str = concat!("scryfall_catalog/", env!("CARGO_PKG_VERSION"));
