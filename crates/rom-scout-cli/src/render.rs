use colored::*;
use rom_scout_core::{DeviceProfile, MediaMetadata, RecommendationConfig, ScanReport};

const FILE_WIDTH: usize = 44;

pub fn print_scan_table(report: &ScanReport) {
    println!(
        "{} {} {} {} {}",
        format!("{:<width$}", "FILE", width = FILE_WIDTH).bold(),
        format!("{:<9}", "PLATFORM").bold(),
        format!("{:<7}", "BASIS").bold(),
        format!("{:>9}", "SIZE (GB)").bold(),
        format!("{:>8}", "CRC32").bold(),
    );

    for entry in &report.entries {
        println!(
            "{:<width$} {:<9} {:<7} {:>9} {:>8}",
            truncate(&entry.file.file_name, FILE_WIDTH),
            entry.platform().to_string(),
            entry.classification.basis.to_string(),
            format!("{:.2}", entry.size_gb()),
            entry.checksum.to_string(),
            width = FILE_WIDTH,
        );
    }
}

pub fn print_metadata(meta: &MediaMetadata) {
    println!("{}", "Media File".bold());
    print_row("File", &meta.file.file_name);
    print_row("Path", &meta.file.path.display().to_string());
    print_row(
        "Platform",
        &format!("{} ({})", meta.platform(), meta.classification.basis),
    );
    print_row("Size (MB)", &format!("{:.2}", meta.size_mb()));
    print_row("CRC32", &meta.checksum.to_string());
}

pub fn print_device(device: &DeviceProfile) {
    println!("{}", "Android Device".bold());
    print_row("Model", &device.model);
    print_row("CPU", &device.cpu);
    print_row("Serial", &device.serial);
}

pub fn print_recommendation(config: &RecommendationConfig) {
    println!("{}", "Emulator Recommendation".bold());
    for (setting, value) in config {
        print_row(setting, value);
    }
}

fn print_row(key: &str, value: &str) {
    println!("  {} {}", format!("{:<18}", key).cyan(), value);
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let kept: String = name.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
