use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::checksum::{self, Checksum};
use crate::classify::{Classifier, Evidence, Platform};
use crate::config::AppConfig;
use crate::error::Error;
use crate::media::{MediaFile, MediaMetadata};
use crate::progress::ProgressReporter;
use crate::scanner;

pub struct ScanEngine {
    config: AppConfig,
    classifier: Classifier,
}

#[derive(Debug)]
pub struct ScanReport {
    pub entries: Vec<MediaMetadata>,
    pub scan_duration: Duration,
    pub analyze_duration: Duration,
    pub checksums_computed: usize,
    pub checksums_skipped: usize,
    pub checksums_failed: usize,
    pub unknown_platforms: usize,
}

impl ScanReport {
    pub fn total_files(&self) -> usize {
        self.entries.len()
    }
}

impl ScanEngine {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            classifier: Classifier::default(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the identification pipeline:
    /// 1. Walk the root for files on the extension allow-list
    /// 2. Classify each file and checksum it under the size ceiling
    pub fn scan(
        &self,
        root: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<ScanReport, Error> {
        info!("Scanning {} for media files...", root.display());
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let files = scanner::scan_media_files(root, &self.config)?;
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(files.len(), scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s — {} candidate files",
            scan_duration.as_secs_f64(),
            files.len()
        );

        info!("Analyzing {} files...", files.len());
        reporter.on_analyze_start(files.len());
        let analyze_start = Instant::now();
        let entries = if self.config.worker_threads > 1 {
            self.analyze_parallel(files, reporter)
        } else {
            self.analyze_sequential(files, reporter)
        };
        let analyze_duration = analyze_start.elapsed();
        reporter.on_analyze_complete(entries.len(), analyze_duration.as_secs_f64());
        debug!(
            "Analysis completed in {:.2}s",
            analyze_duration.as_secs_f64()
        );

        let mut checksums_computed = 0;
        let mut checksums_skipped = 0;
        let mut checksums_failed = 0;
        let mut unknown_platforms = 0;
        for entry in &entries {
            match entry.checksum {
                Checksum::Crc32(_) => checksums_computed += 1,
                Checksum::Skipped => checksums_skipped += 1,
                Checksum::Failed(_) => checksums_failed += 1,
            }
            if entry.platform() == Platform::Unknown {
                unknown_platforms += 1;
            }
        }

        Ok(ScanReport {
            entries,
            scan_duration,
            analyze_duration,
            checksums_computed,
            checksums_skipped,
            checksums_failed,
            unknown_platforms,
        })
    }

    /// Analyze one file outside a directory scan.
    pub fn analyze_file(&self, path: &Path) -> Result<MediaMetadata, Error> {
        if !path.is_file() {
            return Err(Error::InvalidMedia(path.to_path_buf()));
        }
        let file = MediaFile::from_path(path)
            .ok_or_else(|| Error::InvalidMedia(path.to_path_buf()))?;
        Ok(self.analyze_media(file))
    }

    fn analyze_sequential(
        &self,
        files: Vec<MediaFile>,
        reporter: &dyn ProgressReporter,
    ) -> Vec<MediaMetadata> {
        let total = files.len();
        let mut entries = Vec::with_capacity(total);
        for (idx, file) in files.into_iter().enumerate() {
            let entry = self.analyze_media(file);
            reporter.on_file_analyzed(idx + 1, total, &entry.file.file_name);
            entries.push(entry);
        }
        entries
    }

    /// Bounded worker pool over the per-file analysis. Result order
    /// matches the scanner's ordering; a file's I/O trouble stays on
    /// that file's record and never aborts its siblings.
    fn analyze_parallel(
        &self,
        files: Vec<MediaFile>,
        reporter: &dyn ProgressReporter,
    ) -> Vec<MediaMetadata> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_threads)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Worker pool unavailable, analyzing sequentially: {}", e);
                return self.analyze_sequential(files, reporter);
            }
        };

        let total = files.len();
        let done = AtomicUsize::new(0);
        pool.install(|| {
            files
                .into_par_iter()
                .map(|file| {
                    let entry = self.analyze_media(file);
                    let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                    reporter.on_file_analyzed(finished, total, &entry.file.file_name);
                    entry
                })
                .collect()
        })
    }

    fn analyze_media(&self, file: MediaFile) -> MediaMetadata {
        let evidence = Evidence::gather(&file.path);
        let classification = self.classifier.classify(&evidence);
        let size_bytes = evidence.size_bytes.unwrap_or(0);
        let checksum = checksum::checksum_file(
            &file.path,
            self.config.checksum_block_bytes,
            self.config.checksum_max_bytes,
        );
        MediaMetadata {
            file,
            classification,
            size_bytes,
            checksum,
        }
    }
}
