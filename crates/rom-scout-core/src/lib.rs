pub mod cache;
pub mod checksum;
pub mod classify;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod media;
pub mod progress;
pub mod recommend;
pub mod scanner;

pub use cache::SummaryCache;
pub use checksum::Checksum;
pub use classify::{Basis, Classification, Classifier, Evidence, Platform};
pub use config::{load_configuration, AppConfig};
pub use device::{DeviceProbe, DeviceProfile};
pub use engine::{ScanEngine, ScanReport};
pub use error::Error;
pub use media::{MediaFile, MediaMetadata};
pub use progress::{ProgressReporter, SilentReporter};
pub use recommend::{recommend, RecommendationConfig};
