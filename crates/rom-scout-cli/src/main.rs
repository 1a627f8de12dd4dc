mod commands;
mod logging;
mod progress;
mod render;

use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use rom_scout_core::{
    recommend, AppConfig, DeviceProbe, Platform, ScanEngine, SummaryCache,
};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match rom_scout_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan { path }) => {
            if let Err(err) = run_scan(&config, &path) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Inspect { file }) => {
            if let Err(err) = run_inspect(&config, &file) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Annotate { file, summary }) => {
            if let Err(err) = run_annotate(&config, &file, &summary.join(" ")) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Device) => {
            run_device(&config);
        }
        Some(Commands::Recommend { platform, cpu }) => {
            run_recommend(&config, platform, cpu);
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_scan(config: &AppConfig, root: &Path) -> anyhow::Result<()> {
    let engine = ScanEngine::new(config.clone());
    let reporter = CliReporter::new();
    let report = engine.scan(root, &reporter)?;

    println!();
    render::print_scan_table(&report);

    println!();
    info!(
        "Scan: {}, Analysis: {}",
        format!("{:.2}s", report.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", report.analyze_duration.as_secs_f64()).green(),
    );
    info!(
        "{} files, {} checksummed, {} skipped, {} failed, {} unknown platform",
        format!("{}", report.total_files()).cyan(),
        format!("{}", report.checksums_computed).green(),
        format!("{}", report.checksums_skipped).yellow(),
        format!("{}", report.checksums_failed).red(),
        format!("{}", report.unknown_platforms).yellow(),
    );

    Ok(())
}

fn run_inspect(config: &AppConfig, file: &Path) -> anyhow::Result<()> {
    let engine = ScanEngine::new(config.clone());
    let meta = engine.analyze_file(file)?;

    render::print_metadata(&meta);

    let cache = SummaryCache::new(config.cache_dir.clone());
    println!();
    match cache.get(&meta.file.file_name) {
        Some(summary) => {
            println!("{}", "Cached analysis".bold());
            println!("{}", summary);
        }
        None => {
            println!("No cached analysis for this file.");
        }
    }

    let device = DeviceProbe::new(config).probe();
    println!();
    render::print_device(&device);

    println!();
    render::print_recommendation(&recommend(meta.platform(), &device.cpu));

    Ok(())
}

fn run_annotate(config: &AppConfig, file: &Path, summary: &str) -> anyhow::Result<()> {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("path '{}' has no file name", file.display()))?;

    let cache = SummaryCache::new(config.cache_dir.clone());
    cache.put(&file_name, summary)?;

    info!(
        "Cached summary for {} at {}",
        file_name,
        cache.entry_path(&file_name).display()
    );
    Ok(())
}

fn run_device(config: &AppConfig) {
    let device = DeviceProbe::new(config).probe();
    render::print_device(&device);
}

fn run_recommend(config: &AppConfig, platform: Platform, cpu: Option<String>) {
    let cpu = cpu.unwrap_or_else(|| DeviceProbe::new(config).probe().cpu);
    info!("Recommending for {} on '{}'", platform, cpu);
    render::print_recommendation(&recommend(platform, &cpu));
}
