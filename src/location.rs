//! Static map URL construction for located address records.

use crate::config::{STATIC_MAP_BASE, STATIC_MAP_SIZE};
use crate::models::AddressRecord;

/// Builds a static map image URL for a record's location.
///
/// The marker location is chosen by priority: lat/long when both are present
/// and non-zero, then city, region, country. Returns an empty string when the
/// record carries no usable location, or when `api_key` is empty (no key
/// means no map rendering at all).
pub fn map_location_url(record: &AddressRecord, api_key: &str) -> String {
    if api_key.is_empty() {
        return String::new();
    }

    let Some(location) = marker_location(record) else {
        return String::new();
    };

    format!("{STATIC_MAP_BASE}?key={api_key}&size={STATIC_MAP_SIZE}&markers=color:red%7C{location}")
}

fn marker_location(record: &AddressRecord) -> Option<String> {
    if let (Some(lat), Some(long)) = (record.lat, record.long) {
        if lat != 0.0 && long != 0.0 {
            return Some(format!("{lat},{long}"));
        }
    }

    [&record.city, &record.region, &record.country]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .map(|name| urlencoding::encode(name).into_owned())
}
