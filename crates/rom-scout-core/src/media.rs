use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::checksum::Checksum;
use crate::classify::{Classification, Platform};

/// A candidate file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub path: PathBuf,
    /// Basename including the extension.
    pub file_name: String,
    /// Lowercase extension without the dot; empty when the file has none.
    pub extension: String,
}

impl MediaFile {
    pub fn from_path(path: &Path) -> Option<MediaFile> {
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Some(MediaFile {
            path: path.to_path_buf(),
            file_name,
            extension,
        })
    }
}

/// Aggregate analysis record for one media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub file: MediaFile,
    pub classification: Classification,
    pub size_bytes: u64,
    pub checksum: Checksum,
}

impl MediaMetadata {
    pub fn platform(&self) -> Platform {
        self.classification.platform
    }

    /// File size in mebibytes, rounded to two decimals.
    pub fn size_mb(&self) -> f64 {
        let mb = self.size_bytes as f64 / 1024.0 / 1024.0;
        (mb * 100.0).round() / 100.0
    }

    pub fn size_gb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0 / 1024.0
    }
}
