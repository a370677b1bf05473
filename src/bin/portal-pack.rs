//! portal-pack - Main binary entry point

use portal_pack::cli::args::{CliArgs, parse_args};
use portal_pack::cli::output::{format_failure, format_report};
use portal_pack::cli::spinner::{DEFAULT_TICK, Spinner};
use portal_pack::io::config_file::load_overrides;
use portal_pack::services::progress::ProgressTracker;
use portal_pack::{CompressionLevel, RunConfiguration};
use std::io::IsTerminal;
use std::process;
use std::str::FromStr;

#[tokio::main]
async fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug portal-pack static output.zip
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_help();
        process::exit(1);
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            print_help();
            process::exit(1);
        }
    };

    process::exit(run(cli_args).await);
}

async fn run(args: CliArgs) -> i32 {
    let cli_level = match args.compression_level.as_deref().map(CompressionLevel::from_str) {
        Some(Ok(level)) => Some(level),
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            return 1;
        }
        None => None,
    };

    let mut config = match RunConfiguration::new(&args.source_dir, &args.output_file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: Failed to resolve paths: {e}");
            return 1;
        }
    };

    if let Some(config_path) = &args.config_file {
        match load_overrides(config_path) {
            Ok(overrides) => {
                for warning in overrides.apply(&mut config) {
                    eprintln!("Warning: {warning}");
                }
            }
            Err(e) => {
                eprintln!("Warning: Could not load config from {config_path} ({e}), using defaults");
            }
        }
    }

    if let Some(level) = cli_level {
        config.level = level;
    }

    println!("Starting compression of {}", config.source_dir.display());
    println!("Output: {}", config.output_path.display());
    println!(
        "Compression level: {} ({})",
        config.level,
        config.level.numeric()
    );

    let tracker = ProgressTracker::new();
    let spinner = if std::io::stdout().is_terminal() {
        Spinner::start("Compressing files", tracker.clone(), DEFAULT_TICK)
    } else {
        Spinner::disabled()
    };

    let outcome = portal_pack::archive_directory(&config, &tracker).await;
    spinner.stop().await;

    match outcome {
        Ok(report) => {
            print!("{}", format_report(&report));
            0
        }
        Err(failure) => {
            eprint!("{}", format_failure(&failure));
            1
        }
    }
}

fn print_help() {
    println!("portal-pack - Package a directory into a zip archive");
    println!();
    println!("USAGE:");
    println!("    portal-pack <SOURCE_DIRECTORY> <OUTPUT_FILE> [COMPRESSION_LEVEL] [CONFIG_FILE]");
    println!();
    println!("ARGUMENTS:");
    println!("    SOURCE_DIRECTORY   Directory to compress");
    println!("    OUTPUT_FILE        Output zip file path");
    println!("    COMPRESSION_LEVEL  store, fast, default, best (default: best)");
    println!("    CONFIG_FILE        Optional JSON configuration file");
    println!();
    println!("COMPRESSION LEVELS:");
    println!("    store     No compression (fastest)");
    println!("    fast      Fast compression");
    println!("    default   Balanced compression");
    println!("    best      Maximum compression (slowest)");
    println!();
    println!("CONFIG KEYS:");
    println!("    compressionLevel, excludePatterns, maxFileSize, retryAttempts,");
    println!("    retryDelay (ms), overwrite");
    println!();
    println!("EXAMPLES:");
    println!("    portal-pack static output.zip");
    println!("    portal-pack static output.zip fast");
    println!("    portal-pack static output.zip best config.json");
    println!();
    println!(
        "Version {} ({} {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("GIT_DATE"),
        env!("BUILD_TARGET")
    );
}
