use glob::Pattern;
use std::path::Path;
use tracing::{debug, error, warn};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::error::Error;
use crate::media::MediaFile;

/// Recursively collect media files under `root` whose extension is in the
/// configured allow-list. Entries under a matching ignore glob are
/// skipped. An unreadable subtree is logged and skipped without aborting
/// the rest of the walk; a missing or non-directory root is an error so
/// the caller can tell it apart from a clean scan with no matches.
pub fn scan_media_files(root: &Path, config: &AppConfig) -> Result<Vec<MediaFile>, Error> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.to_path_buf()));
    }

    let ignore_patterns = compile_ignore_patterns(&config.ignore_patterns);

    let mut found = Vec::new();
    for entry_result in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error walking directory tree: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
        {
            debug!("Skipping {} (ignore pattern)", path.display());
            continue;
        }

        let media = match MediaFile::from_path(path) {
            Some(media) => media,
            None => continue,
        };

        if config
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(&media.extension))
        {
            found.push(media);
        }
    }

    debug!(
        "Scan of {} found {} media files",
        root.display(),
        found.len()
    );
    Ok(found)
}

fn compile_ignore_patterns(ignore_globs: &[String]) -> Vec<Pattern> {
    ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(path, b"data").expect("Failed to write test file");
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempdir().expect("Failed to create temp dir");
        touch(&dir.path().join("game.iso"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("cart.gba"));

        let found = scan_media_files(dir.path(), &AppConfig::default()).expect("scan failed");
        let names: Vec<&str> = found.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["cart.gba", "game.iso"]);
    }

    #[test]
    fn test_scan_is_case_insensitive_on_extensions() {
        let dir = tempdir().expect("Failed to create temp dir");
        touch(&dir.path().join("GAME.ISO"));
        touch(&dir.path().join("other.Bin"));

        let found = scan_media_files(dir.path(), &AppConfig::default()).expect("scan failed");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_recurses_into_subdirectories() {
        let dir = tempdir().expect("Failed to create temp dir");
        touch(&dir.path().join("ps2/disc one.iso"));
        touch(&dir.path().join("handheld/gb/tetris.gb"));
        touch(&dir.path().join("top.chd"));

        let found = scan_media_files(dir.path(), &AppConfig::default()).expect("scan failed");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_scan_honors_ignore_patterns() {
        let dir = tempdir().expect("Failed to create temp dir");
        touch(&dir.path().join("keep/game.iso"));
        touch(&dir.path().join("backup/game.iso"));

        let mut config = AppConfig::default();
        config.ignore_patterns = vec!["**/backup/**".to_string()];

        let found = scan_media_files(dir.path(), &config).expect("scan failed");
        assert_eq!(found.len(), 1);
        assert!(found[0].path.starts_with(dir.path().join("keep")));
    }

    #[test]
    fn test_scan_missing_root_is_an_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("no-such-dir");
        let result = scan_media_files(&missing, &AppConfig::default());
        assert!(matches!(result, Err(Error::InvalidRoot(_))));
    }

    #[test]
    fn test_scan_root_pointing_at_file_is_an_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let file = dir.path().join("game.iso");
        touch(&file);
        let result = scan_media_files(&file, &AppConfig::default());
        assert!(matches!(result, Err(Error::InvalidRoot(_))));
    }

    #[test]
    fn test_invalid_ignore_pattern_is_dropped_not_fatal() {
        let dir = tempdir().expect("Failed to create temp dir");
        touch(&dir.path().join("game.iso"));

        let mut config = AppConfig::default();
        config.ignore_patterns = vec!["[".to_string()];

        let found = scan_media_files(dir.path(), &config).expect("scan failed");
        assert_eq!(found.len(), 1);
    }
}
