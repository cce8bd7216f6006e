//! Catalog loading from the external product document.

use std::path::Path;

use thiserror::Error;

use kiosk_core::Catalog;

/// Errors raised while loading the catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid product list.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the product catalog from a JSON document.
///
/// Called once at startup; the catalog is immutable afterwards. An empty
/// list is valid, a missing or malformed document is fatal.
///
/// # Errors
///
/// Returns [`CatalogError`] if the document cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(catalog)
}
