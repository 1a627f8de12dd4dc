use super::{Basis, Evidence, Platform, Strategy};

/// Below this many GiB a disc image is taken for a GameCube disc.
const SMALL_DISC_MAX_GB: f64 = 1.6;
/// At or above this many GiB a disc image is taken for a PS2 DVD.
const LARGE_DISC_MIN_GB: f64 = 2.0;

/// Buckets disc images by size. Sizes between the two cutoffs are left
/// unresolved on purpose and fall through to the next strategy.
pub struct SizeStrategy;

impl Strategy for SizeStrategy {
    fn basis(&self) -> Basis {
        Basis::Size
    }

    fn try_classify(&self, evidence: &Evidence) -> Option<Platform> {
        let size_gb = evidence.size_bytes? as f64 / (1024.0 * 1024.0 * 1024.0);
        if size_gb < SMALL_DISC_MAX_GB {
            return Some(Platform::GameCube);
        }
        if size_gb >= LARGE_DISC_MIN_GB {
            return Some(Platform::Ps2);
        }
        None
    }
}
