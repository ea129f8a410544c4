//! Course catalog loading.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static metadata for one catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub description: String,
    pub hours: i32,
}

/// Course code to metadata, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Parses a catalog document without filtering it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        self.entries.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(code, entry)| (code.as_str(), entry))
    }

    pub fn insert(&mut self, code: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(code.into(), entry);
    }

    /// Drops honors, experimental and writing-intensive sections and the EMAT
    /// department, keeping the remaining entries in order.
    pub fn offered(mut self) -> Self {
        self.entries.retain(|code, _| !is_excluded(code));
        self
    }
}

/// Returns true for catalog codes that never make it into the course pool.
pub fn is_excluded(code: &str) -> bool {
    code.ends_with(['H', 'E', 'W']) || code.contains("EMAT")
}

/// Loads course catalogs from JSON documents.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Reads a catalog file and keeps only the offered courses.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::load_str(&json)?;
        info!("Loaded {} catalog courses from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parses an in-memory catalog and keeps only the offered courses.
    pub fn load_str(json: &str) -> Result<Catalog, CatalogError> {
        let raw = Catalog::from_json(json)?;
        let total = raw.len();
        let offered = raw.offered();

        if offered.len() < total {
            info!("Skipped {} excluded catalog courses", total - offered.len());
        }
        Ok(offered)
    }
}
