use super::{Basis, Evidence, Platform, Strategy};

/// Known magic byte sequences and the platform they identify.
/// GameCube discs carry "DVDMAGIC" near offset 0x1C.
const SIGNATURES: &[(&[u8], Platform)] = &[(b"DVDMAGIC", Platform::GameCube)];

/// Matches magic signatures anywhere inside the header window.
pub struct HeaderStrategy;

impl Strategy for HeaderStrategy {
    fn basis(&self) -> Basis {
        Basis::Header
    }

    fn try_classify(&self, evidence: &Evidence) -> Option<Platform> {
        let header = evidence.header.as_deref()?;
        for (magic, platform) in SIGNATURES {
            if header.windows(magic.len()).any(|w| w == *magic) {
                return Some(*platform);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::HEADER_WINDOW_BYTES;
    use super::*;

    fn evidence_with_header(header: Option<Vec<u8>>) -> Evidence {
        Evidence {
            file_name: "game.iso".to_string(),
            header,
            size_bytes: None,
        }
    }

    #[test]
    fn test_magic_at_window_end_matches() {
        let mut header = vec![0u8; HEADER_WINDOW_BYTES - 8];
        header.extend_from_slice(b"DVDMAGIC");
        let result = HeaderStrategy.try_classify(&evidence_with_header(Some(header)));
        assert_eq!(result, Some(Platform::GameCube));
    }

    #[test]
    fn test_magic_at_start_matches() {
        let mut header = b"DVDMAGIC".to_vec();
        header.resize(HEADER_WINDOW_BYTES, 0);
        let result = HeaderStrategy.try_classify(&evidence_with_header(Some(header)));
        assert_eq!(result, Some(Platform::GameCube));
    }

    #[test]
    fn test_unrelated_header_does_not_match() {
        let header = vec![0xFFu8; HEADER_WINDOW_BYTES];
        let result = HeaderStrategy.try_classify(&evidence_with_header(Some(header)));
        assert_eq!(result, None);
    }

    #[test]
    fn test_header_shorter_than_magic_does_not_match() {
        let result = HeaderStrategy.try_classify(&evidence_with_header(Some(b"DVD".to_vec())));
        assert_eq!(result, None);
    }

    #[test]
    fn test_absent_header_does_not_match() {
        let result = HeaderStrategy.try_classify(&evidence_with_header(None));
        assert_eq!(result, None);
    }
}
