use std::{fs, path::Path};

use serde::de::DeserializeOwned;

use crate::catalog_loader::decode;
use crate::error::CatalogError;

pub fn load_from_json_file<T>(path: &Path) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
{
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}
