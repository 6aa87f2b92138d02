//! Wire and result types for address lookups.
//!
//! Lookup servers answer `GET /json` with a PascalCase JSON object describing
//! the remote address they observed for the client, plus optional geolocation
//! fields. This module defines that wire shape, the per-family failure shape,
//! and the shared list the fan-out accumulates results into.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Successful lookup result from one family's `/json` endpoint.
///
/// Servers omit fields they have no data for, so everything beyond the
/// address and family tag is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressRecord {
    /// The remote address the server observed for this client.
    #[serde(rename = "RemoteAddr")]
    pub remote_addr: String,

    /// Address-family tag (e.g. "IPv4", "IPv6") correlating the result to
    /// the request that produced it.
    #[serde(rename = "RemoteAddrFamily")]
    pub family: String,

    /// City the address geolocates to, when known.
    #[serde(rename = "City", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Region the address geolocates to, when known.
    #[serde(rename = "Region", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Country the address geolocates to, when known.
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Latitude, when known. Servers omit the field for a zero value.
    #[serde(rename = "Lat", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Longitude, when known. Servers omit the field for a zero value.
    #[serde(rename = "Long", skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,

    /// Raw user agent string the server saw, when it echoes one.
    #[serde(rename = "UserAgent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Terminal failure outcome for one family's request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Address-family tag of the request that failed.
    #[serde(rename = "RemoteAddrFamily")]
    pub family: String,

    /// Human-readable failure description, e.g. `"500: Server Error"`.
    #[serde(rename = "Error")]
    pub error: String,
}

/// One settled outcome: a lookup either produced an address or failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// The family's server answered with an address record.
    Address(AddressRecord),
    /// The family's request failed; see [`ErrorRecord::error`].
    Error(ErrorRecord),
}

impl QueryResult {
    /// Address-family tag shared by both variants.
    pub fn family(&self) -> &str {
        match self {
            QueryResult::Address(record) => &record.family,
            QueryResult::Error(record) => &record.family,
        }
    }

    /// True for the failure variant.
    pub fn is_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }
}

/// Shared accumulator of per-family outcomes for one lookup run.
///
/// Append-only: entries land in completion order and are never removed or
/// reordered. Cloning is cheap and shares the underlying list, which is how
/// the concurrently settling lookup tasks all write into the same run.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    entries: Arc<Mutex<Vec<QueryResult>>>,
}

impl ResultList {
    /// Creates an empty list for a fresh run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one settled outcome. Atomic with respect to concurrent
    /// appends from other lookup tasks.
    pub fn append(&self, result: QueryResult) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }

    /// Copies the entries accumulated so far, in completion order.
    pub fn snapshot(&self) -> Vec<QueryResult> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries accumulated so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no lookup has settled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
