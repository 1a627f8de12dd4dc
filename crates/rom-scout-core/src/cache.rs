use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::Error;

/// Persisted form of one cached summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub summary: String,
}

/// File-per-entry store for analysis summaries. Keys derive from the
/// media file's basename, so two files sharing a basename share one
/// entry; the last writer wins.
pub struct SummaryCache {
    dir: PathBuf,
}

impl SummaryCache {
    pub fn new(dir: impl Into<PathBuf>) -> SummaryCache {
        SummaryCache { dir: dir.into() }
    }

    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name.replace(' ', "_")))
    }

    /// Look up a cached summary. A missing or unparsable entry is a
    /// miss, never an error.
    pub fn get(&self, name: &str) -> Option<String> {
        let path = self.entry_path(name);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<CacheEntry>(&contents) {
            Ok(entry) => Some(entry.summary),
            Err(e) => {
                debug!("Discarding corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Store a summary, overwriting any previous entry for this key.
    pub fn put(&self, name: &str, summary: &str) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            summary: summary.to_string(),
        };
        let json = serde_json::to_string_pretty(&entry).map_err(|e| Error::Cache(e.to_string()))?;
        fs::write(self.entry_path(name), json)?;
        Ok(())
    }
}
