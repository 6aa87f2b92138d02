//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `addr_lookup` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process;

use addr_lookup::initialization::init_logger_with;
use addr_lookup::{
    first_word, map_location_url, run_lookup, AddressRecord, Config, QueryResult,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let maps_api_key = config.maps_api_key.clone();

    match run_lookup(config).await {
        Ok(report) => {
            for result in &report.results {
                print_result(result, &maps_api_key);
            }
            println!(
                "Queried {} famil{} ({} succeeded, {} failed) in {:.1}s",
                report.total_families,
                if report.total_families == 1 { "y" } else { "ies" },
                report.successful,
                report.failed,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("addr_lookup error: {e:#}");
            process::exit(1);
        }
    }
}

fn print_result(result: &QueryResult, maps_api_key: &str) {
    match result {
        QueryResult::Address(record) => {
            match describe_location(record) {
                Some(place) => println!(
                    "{}: {} ({place})",
                    record.family,
                    record.remote_addr.green()
                ),
                None => println!("{}: {}", record.family, record.remote_addr.green()),
            }
            if let Some(user_agent) = &record.user_agent {
                println!("  seen as: {}", first_word(user_agent));
            }
            let map_url = map_location_url(record, maps_api_key);
            if !map_url.is_empty() {
                println!("  map: {map_url}");
            }
        }
        QueryResult::Error(record) => {
            println!("{}: {}", record.family, record.error.red());
        }
    }
}

fn describe_location(record: &AddressRecord) -> Option<String> {
    let parts: Vec<&str> = [&record.city, &record.region, &record.country]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
