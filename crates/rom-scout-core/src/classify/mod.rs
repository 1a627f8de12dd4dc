pub mod header;
pub mod keyword;
pub mod size;

pub use header::HeaderStrategy;
pub use keyword::KeywordStrategy;
pub use size::SizeStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Number of leading bytes inspected for magic signatures.
pub const HEADER_WINDOW_BYTES: usize = 0x20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Ps2,
    Ps1,
    GameCube,
    Wii,
    Dreamcast,
    Saturn,
    Psp,
    Unknown,
}

impl Platform {
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Ps2 => "PS2",
            Platform::Ps1 => "PS1",
            Platform::GameCube => "GAMECUBE",
            Platform::Wii => "WII",
            Platform::Dreamcast => "DREAMCAST",
            Platform::Saturn => "SATURN",
            Platform::Psp => "PSP",
            Platform::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error)]
#[error("unknown platform '{0}'")]
pub struct UnknownPlatform(String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PS2" => Ok(Platform::Ps2),
            "PS1" => Ok(Platform::Ps1),
            "GAMECUBE" => Ok(Platform::GameCube),
            "WII" => Ok(Platform::Wii),
            "DREAMCAST" => Ok(Platform::Dreamcast),
            "SATURN" => Ok(Platform::Saturn),
            "PSP" => Ok(Platform::Psp),
            "UNKNOWN" => Ok(Platform::Unknown),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Which strategy produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    Header,
    Size,
    Keyword,
    None,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Basis::Header => "header",
            Basis::Size => "size",
            Basis::Keyword => "keyword",
            Basis::None => "none",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub platform: Platform,
    pub basis: Basis,
}

/// Everything the strategies may look at, gathered once per file.
/// Pieces that could not be read are absent; gathering never fails.
#[derive(Debug, Clone)]
pub struct Evidence {
    pub file_name: String,
    pub header: Option<Vec<u8>>,
    pub size_bytes: Option<u64>,
}

impl Evidence {
    pub fn gather(path: &Path) -> Evidence {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let header = match File::open(path) {
            Ok(file) => {
                let mut buf = Vec::with_capacity(HEADER_WINDOW_BYTES);
                match file.take(HEADER_WINDOW_BYTES as u64).read_to_end(&mut buf) {
                    Ok(_) => Some(buf),
                    Err(err) => {
                        debug!("header read failed for {}: {}", path.display(), err);
                        None
                    }
                }
            }
            Err(err) => {
                debug!(
                    "could not open {} for header inspection: {}",
                    path.display(),
                    err
                );
                None
            }
        };

        let size_bytes = std::fs::metadata(path).ok().map(|m| m.len());

        Evidence {
            file_name,
            header,
            size_bytes,
        }
    }
}

/// A single classification heuristic.
pub trait Strategy: Send + Sync {
    fn basis(&self) -> Basis;
    fn try_classify(&self, evidence: &Evidence) -> Option<Platform>;
}

/// Ordered strategy cascade. The first strategy to produce a platform
/// wins; later strategies never override an earlier match.
pub struct Classifier {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Classifier {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Classifier {
        Classifier { strategies }
    }

    pub fn classify(&self, evidence: &Evidence) -> Classification {
        for strategy in &self.strategies {
            if let Some(platform) = strategy.try_classify(evidence) {
                return Classification {
                    platform,
                    basis: strategy.basis(),
                };
            }
        }
        Classification {
            platform: Platform::Unknown,
            basis: Basis::None,
        }
    }

    pub fn classify_path(&self, path: &Path) -> Classification {
        self.classify(&Evidence::gather(path))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(vec![
            Box::new(HeaderStrategy),
            Box::new(SizeStrategy),
            Box::new(KeywordStrategy),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(file_name: &str, header: Option<&[u8]>, size_bytes: Option<u64>) -> Evidence {
        Evidence {
            file_name: file_name.to_string(),
            header: header.map(|h| h.to_vec()),
            size_bytes,
        }
    }

    #[test]
    fn test_header_match_wins_over_size_and_keyword() {
        let classifier = Classifier::default();
        // Size says PS2, keyword says PS1, header says GameCube.
        let mut header = vec![0u8; 0x18];
        header.extend_from_slice(b"DVDMAGIC");
        assert_eq!(header.len(), HEADER_WINDOW_BYTES);
        let ev = evidence("psx game.iso", Some(&header), Some(3 * 1024 * 1024 * 1024));
        let result = classifier.classify(&ev);
        assert_eq!(result.platform, Platform::GameCube);
        assert_eq!(result.basis, Basis::Header);
    }

    #[test]
    fn test_size_applies_when_header_inconclusive() {
        let classifier = Classifier::default();
        let ev = evidence(
            "mystery.iso",
            Some(&[0u8; HEADER_WINDOW_BYTES]),
            Some(5 * 1024 * 1024 * 1024 / 2),
        );
        let result = classifier.classify(&ev);
        assert_eq!(result.platform, Platform::Ps2);
        assert_eq!(result.basis, Basis::Size);
    }

    #[test]
    fn test_keyword_applies_inside_ambiguity_band() {
        let classifier = Classifier::default();
        // 1.8 GiB sits between the two size cutoffs.
        let size = (18 * 1024 * 1024 * 1024) / 10;
        let ev = evidence("dreamcast collection.bin", None, Some(size));
        let result = classifier.classify(&ev);
        assert_eq!(result.platform, Platform::Dreamcast);
        assert_eq!(result.basis, Basis::Keyword);
    }

    #[test]
    fn test_no_evidence_defaults_to_unknown() {
        let classifier = Classifier::default();
        let result = classifier.classify(&evidence("mystery.xyz", None, None));
        assert_eq!(result.platform, Platform::Unknown);
        assert_eq!(result.basis, Basis::None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::default();
        let ev = evidence("wii party.wbfs", None, None);
        let first = classifier.classify(&ev);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&ev), first);
        }
    }

    #[test]
    fn test_platform_tags_round_trip() {
        for platform in [
            Platform::Ps2,
            Platform::Ps1,
            Platform::GameCube,
            Platform::Wii,
            Platform::Dreamcast,
            Platform::Saturn,
            Platform::Psp,
            Platform::Unknown,
        ] {
            let parsed: Platform = platform.tag().parse().expect("tag should parse");
            assert_eq!(parsed, platform);
        }
        assert!("gamecube".parse::<Platform>().is_ok());
        assert!("megadrive".parse::<Platform>().is_err());
    }

    #[test]
    fn test_gather_on_missing_file_leaves_evidence_absent() {
        let ev = Evidence::gather(Path::new("/nonexistent/dir/game.iso"));
        assert_eq!(ev.file_name, "game.iso");
        assert!(ev.header.is_none());
        assert!(ev.size_bytes.is_none());
    }
}
