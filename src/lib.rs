//! addr_lookup library: concurrent address lookup aggregation
//!
//! This library queries a configurable set of address-family-specific lookup
//! servers (for example an IPv4-only and an IPv6-only host) concurrently,
//! and accumulates each settled outcome into an ordered result list. A slow
//! or failing family never blocks the others; failures are recorded as data
//! alongside successes.
//!
//! # Example
//!
//! ```no_run
//! use addr_lookup::{run_lookup, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     host: Some("example.com".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_lookup(config).await?;
//! println!(
//!     "{} of {} families answered",
//!     report.successful, report.total_families
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call it from within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
mod fetch;
pub mod initialization;
mod location;
pub mod models;
mod utils;

// Re-export public API
pub use config::{Config, FamilyEndpoint, LogFormat, LogLevel, ValidationError};
pub use fetch::{build_query_url, query_all, query_family};
pub use location::map_location_url;
pub use models::{AddressRecord, ErrorRecord, QueryResult, ResultList};
pub use run::{run_lookup, LookupReport};
pub use utils::first_word;

// Internal run module (top-level orchestration)
mod run {
    use anyhow::{Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::initialization::init_client;
    use crate::models::{QueryResult, ResultList};

    /// Results of one lookup run.
    ///
    /// `results` holds exactly one entry per configured family, in the order
    /// the lookups completed.
    #[derive(Debug, Clone)]
    pub struct LookupReport {
        /// Number of address families that were queried
        pub total_families: usize,
        /// Number of families whose lookup produced an address record
        pub successful: usize,
        /// Number of families whose lookup failed
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// The settled outcomes, in completion order
        pub results: Vec<QueryResult>,
    }

    /// Runs one lookup across all configured families.
    ///
    /// This is the main entry point for the library. It validates the
    /// configuration, builds the HTTP client, fans out one request per
    /// family, and waits for every family to settle.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built. Per-family lookup failures are not errors; they
    /// appear as [`QueryResult::Error`] entries in the report.
    pub async fn run_lookup(config: Config) -> Result<LookupReport> {
        config.validate().context("Invalid configuration")?;

        let client = init_client(&config).context("Failed to initialize HTTP client")?;

        info!(
            "Querying {} lookup server(s) over {}",
            config.servers.len(),
            config.scheme
        );

        let start_time = std::time::Instant::now();
        let results = ResultList::new();

        crate::fetch::query_all(client, &config, &results).await;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        let snapshot = results.snapshot();
        let failed = snapshot.iter().filter(|r| r.is_error()).count();

        Ok(LookupReport {
            total_families: config.servers.len(),
            successful: snapshot.len() - failed,
            failed,
            elapsed_seconds,
            results: snapshot,
        })
    }
}
