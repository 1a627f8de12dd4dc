use super::{Basis, Evidence, Platform, Strategy};

/// Keyword table checked in order; the first platform with any matching
/// keyword wins the tie-break.
const PLATFORM_KEYWORDS: &[(Platform, &[&str])] = &[
    (Platform::Ps2, &["ps2", "playstation 2"]),
    (Platform::Ps1, &["psx", "ps1", "playstation"]),
    (Platform::GameCube, &["gamecube", "gc"]),
    (Platform::Wii, &["wii"]),
    (Platform::Dreamcast, &["dreamcast", "dc"]),
    (Platform::Saturn, &["saturn"]),
    (Platform::Psp, &["psp"]),
];

/// Matches platform keywords as substrings of the lowercased file name.
pub struct KeywordStrategy;

impl Strategy for KeywordStrategy {
    fn basis(&self) -> Basis {
        Basis::Keyword
    }

    fn try_classify(&self, evidence: &Evidence) -> Option<Platform> {
        let lname = evidence.file_name.to_lowercase();
        for (platform, keywords) in PLATFORM_KEYWORDS {
            if keywords.iter().any(|k| lname.contains(*k)) {
                return Some(*platform);
            }
        }
        None
    }
}
