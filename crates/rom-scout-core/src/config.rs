use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

/// File extensions treated as ROM or disc images when scanning.
pub const DEFAULT_EXTENSIONS: [&str; 26] = [
    "iso", "bin", "cue", "chd", "cso", "zip", "7z", "rar", "nes", "sfc", "smc", "gb", "gbc",
    "gba", "n64", "z64", "v64", "gcm", "wbfs", "wad", "md", "gen", "sms", "fds", "a26", "a78",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where identification summaries are cached as JSON files.
    pub cache_dir: PathBuf,
    /// Lowercase extensions (no dot) that qualify a file for analysis.
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip while walking the scan root.
    pub ignore_patterns: Vec<String>,
    /// Read granularity for checksum streaming, in bytes.
    pub checksum_block_bytes: usize,
    /// Files larger than this are not checksummed.
    pub checksum_max_bytes: u64,
    /// External program used to probe the connected device.
    pub probe_program: String,
    /// How long a device probe may run before it is killed.
    pub probe_timeout_ms: u64,
    /// Worker threads for analysis. 1 keeps processing sequential.
    pub worker_threads: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            cache_dir: default_cache_dir(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignore_patterns: Vec::new(),
            checksum_block_bytes: 1024 * 1024,
            checksum_max_bytes: 500 * 1024 * 1024,
            probe_program: "adb".to_string(),
            probe_timeout_ms: 2500,
            worker_threads: 1,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rom-scout")
        .join("rom_cache")
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("RomScout").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions_cover_disc_and_cartridge_formats() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.extensions.len(), 26);
        assert!(cfg.extensions.contains(&"iso".to_string()));
        assert!(cfg.extensions.contains(&"wbfs".to_string()));
        assert!(cfg.extensions.contains(&"a78".to_string()));
    }

    #[test]
    fn test_default_limits() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.checksum_block_bytes, 1024 * 1024);
        assert_eq!(cfg.checksum_max_bytes, 500 * 1024 * 1024);
        assert_eq!(cfg.worker_threads, 1);
        assert!(cfg.ignore_patterns.is_empty());
    }

    #[test]
    fn test_default_cache_dir_ends_with_rom_cache() {
        let cfg = AppConfig::default();
        assert!(cfg.cache_dir.ends_with(PathBuf::from(".rom-scout").join("rom_cache")));
    }
}
