//! Configuration constants.

use std::time::Duration;

/// Default lookup servers, one per address family, as `FAMILY=HOST` specs.
pub const DEFAULT_SERVERS: [&str; 2] = ["IPv4=ip4.bramp.net", "IPv6=ip6.bramp.net"];

/// Default URL scheme for lookup requests.
pub const DEFAULT_SCHEME: &str = "https";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// TCP connect timeout, kept shorter than the global request timeout so an
/// unreachable server fails fast.
pub const TCP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// User-Agent header sent with lookup requests.
pub const USER_AGENT: &str = concat!("addr_lookup/", env!("CARGO_PKG_VERSION"));

/// Status text substituted when a failed response carries none.
pub const UNKNOWN_STATUS_TEXT: &str = "unknown error";

/// Base URL of the Google static map endpoint.
pub const STATIC_MAP_BASE: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Fixed image size requested for static maps.
pub const STATIC_MAP_SIZE: &str = "640x400";
