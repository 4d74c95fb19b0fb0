use std::{env, time::Duration};

use log::error;

use crate::catalog_view_model::SortMode;
use crate::utilities::constants::{DEFAULT_IMAGE_FETCH_TIMEOUT_SECS, DEFAULT_PREFETCH_CONCURRENCY};

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<String>,
    pub search: String,
    pub sort_mode: SortMode,
    pub ascending: bool,
    pub detail: Option<String>,
    pub prefetch: bool,
    pub image_fetch_timeout: Duration,
    pub prefetch_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            search: "".to_string(),
            sort_mode: SortMode::Alphabetical,
            ascending: true,
            detail: None,
            prefetch: false,
            image_fetch_timeout: Duration::from_secs(DEFAULT_IMAGE_FETCH_TIMEOUT_SECS),
            prefetch_concurrency: DEFAULT_PREFETCH_CONCURRENCY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    fn update_from_env(&mut self) {
        self.update_from(|key| env::var(key).ok());
    }

    fn update_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(catalog_path) = var("CATALOG_PATH") {
            if std::path::Path::new(&catalog_path).is_file() && catalog_path.ends_with(".json") {
                self.catalog_path = Some(catalog_path);
            } else if !catalog_path.is_empty() {
                error!(
                    "Supplied incorrect path to catalog file: {}, using bundled catalog",
                    catalog_path
                );
                self.catalog_path = None;
            }
        }
        if let Some(search) = var("SEARCH") {
            self.search = search;
        }
        if let Some(sort) = var("SORT") {
            match sort.parse::<SortMode>() {
                Ok(mode) => self.sort_mode = mode,
                Err(e) => error!("{}, sorting alphabetically", e),
            }
        }
        if let Some(desc) = var("DESC") {
            self.ascending = desc != "1";
        }
        if let Some(detail) = var("DETAIL") {
            self.detail = if detail.is_empty() { None } else { Some(detail) };
        }
        if let Some(prefetch) = var("PREFETCH") {
            self.prefetch = prefetch == "1";
        }
        if let Some(timeout) = var("IMAGE_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => self.image_fetch_timeout = Duration::from_secs(secs),
                _ => error!(
                    "Invalid IMAGE_TIMEOUT_SECS '{}', using {} seconds",
                    timeout, DEFAULT_IMAGE_FETCH_TIMEOUT_SECS
                ),
            }
        }
        if let Some(concurrency) = var("PREFETCH_CONCURRENCY") {
            match concurrency.parse::<usize>() {
                Ok(n) if n > 0 => self.prefetch_concurrency = n,
                _ => error!(
                    "Invalid PREFETCH_CONCURRENCY '{}', using {}",
                    concurrency, DEFAULT_PREFETCH_CONCURRENCY
                ),
            }
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}
