//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT, USER_AGENT};
use crate::error_handling::InitializationError;

/// Builds the shared HTTP client used for all lookup requests.
///
/// The client carries the configured global timeout plus a shorter connect
/// timeout, so an unreachable family fails fast instead of holding its slot
/// for the full request timeout. The aggregator itself imposes no further
/// deadline on top of this.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(TCP_CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
