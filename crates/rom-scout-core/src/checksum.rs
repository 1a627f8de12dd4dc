use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::warn;

/// Outcome of checksum computation for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Checksum {
    /// CRC-32 digest rendered as eight uppercase hex digits.
    Crc32(String),
    /// File exceeded the size ceiling and was not read.
    Skipped,
    /// An I/O error interrupted the computation.
    Failed(String),
}

impl Checksum {
    pub fn digest(&self) -> Option<&str> {
        match self {
            Checksum::Crc32(hex) => Some(hex),
            _ => None,
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checksum::Crc32(hex) => f.write_str(hex),
            Checksum::Skipped => f.write_str("skipped"),
            Checksum::Failed(_) => f.write_str("failed"),
        }
    }
}

/// Checksum a file under the size ceiling. Oversized files are skipped
/// without being opened; any I/O failure yields `Failed`, never a
/// partial digest.
pub fn checksum_file(path: &Path, block_bytes: usize, max_bytes: u64) -> Checksum {
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!("Error reading metadata for {}: {}", path.display(), e);
            return Checksum::Failed(e.to_string());
        }
    };

    if size > max_bytes {
        return Checksum::Skipped;
    }

    match stream_crc32(path, block_bytes) {
        Ok(digest) => Checksum::Crc32(digest),
        Err(e) => {
            warn!("Error checksumming {}: {}", path.display(), e);
            Checksum::Failed(e.to_string())
        }
    }
}

/// Stream a file through the CRC-32 accumulator in fixed-size blocks.
/// The digest does not depend on the block size.
pub fn stream_crc32(path: &Path, block_bytes: usize) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut block = vec![0u8; block_bytes.max(1)];

    loop {
        let read = file.read(&mut block)?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(format!("{:08X}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_known_reference_digest() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("check.bin");
        fs::write(&path, b"123456789").expect("Failed to write test file");
        // Standard CRC-32 check value for the digits 1-9.
        assert_eq!(checksum_file(&path, 4, 1024), Checksum::Crc32("CBF43926".to_string()));
    }

    #[test]
    fn test_fox_sentence_digest() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("fox.txt");
        fs::write(&path, b"The quick brown fox jumps over the lazy dog")
            .expect("Failed to write test file");
        assert_eq!(
            checksum_file(&path, 1024, 1024),
            Checksum::Crc32("414FA339".to_string())
        );
    }

    #[test]
    fn test_empty_file_digest_is_zero() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("empty.bin");
        fs::write(&path, b"").expect("Failed to write test file");
        assert_eq!(
            checksum_file(&path, 1024, 1024),
            Checksum::Crc32("00000000".to_string())
        );
    }

    #[test]
    fn test_digest_invariant_to_block_size() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("image.bin");
        let content: Vec<u8> = (0u16..64).map(|i| (i * 37 % 251) as u8).collect();
        fs::write(&path, &content).expect("Failed to write test file");

        let reference = stream_crc32(&path, content.len()).expect("single-shot checksum");
        for block_bytes in [1usize, 3, 7, 64, 4096] {
            let digest = stream_crc32(&path, block_bytes).expect("chunked checksum");
            assert_eq!(digest, reference, "block size {} diverged", block_bytes);
        }
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("big.iso");
        fs::write(&path, vec![0u8; 2048]).expect("Failed to write test file");
        assert_eq!(checksum_file(&path, 1024, 1024), Checksum::Skipped);
    }

    #[test]
    fn test_missing_file_is_failed() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing.iso");
        assert!(matches!(checksum_file(&path, 1024, 1024), Checksum::Failed(_)));
    }

    #[test]
    fn test_digest_rendering_is_uppercase_hex() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("check.bin");
        fs::write(&path, b"123456789").expect("Failed to write test file");
        let checksum = checksum_file(&path, 1024, 1024);
        let digest = checksum.digest().expect("digest should be present");
        assert_eq!(digest.len(), 8);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
