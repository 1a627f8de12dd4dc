/// Trait for reporting scan progress.
///
/// The CLI implements this with indicatif; library callers that want a
/// quiet run use `SilentReporter`. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_analyze_start(&self, _total_files: usize) {}
    fn on_file_analyzed(&self, _files_done: usize, _total_files: usize, _file_name: &str) {}
    fn on_analyze_complete(&self, _total_files: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
