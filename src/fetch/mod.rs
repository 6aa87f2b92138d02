//! Lookup request construction and the concurrent per-family fan-out.
//!
//! Each configured family gets exactly one request, dispatched without
//! waiting on any other family. Every request settles into exactly one
//! [`QueryResult`] appended to the shared [`ResultList`]: a decoded address
//! record on success, an error record otherwise. A slow or failing family
//! never blocks the rest, and nothing is retried.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use reqwest::Client;

use crate::config::{Config, FamilyEndpoint};
use crate::error_handling::EndpointFailure;
use crate::models::{AddressRecord, ErrorRecord, QueryResult, ResultList};


/// Builds the request URL for one family:
/// `{scheme}://{base}/json?family={family}`, plus `&host={host}` when a
/// non-empty target host is given. The host is forwarded verbatim.
pub fn build_query_url(scheme: &str, base_url: &str, family: &str, host: Option<&str>) -> String {
    let mut url = format!("{scheme}://{base_url}/json?family={family}");
    if let Some(host) = host {
        if !host.is_empty() {
            url.push_str("&host=");
            url.push_str(host);
        }
    }
    url
}

/// Issues one family's lookup request and settles it into a [`QueryResult`].
///
/// Failures (non-2xx status, transport error, undecodable body) are data,
/// not errors: they come back as the [`QueryResult::Error`] variant tagged
/// with this family.
pub async fn query_family(
    client: &Client,
    endpoint: &FamilyEndpoint,
    host: Option<&str>,
    scheme: &str,
) -> QueryResult {
    let url = build_query_url(scheme, &endpoint.base_url, &endpoint.family, host);
    debug!("Querying {} endpoint: {url}", endpoint.family);

    match fetch_record(client, &url).await {
        Ok(record) => QueryResult::Address(record),
        Err(failure) => {
            warn!("{} lookup failed: {failure}", endpoint.family);
            QueryResult::Error(ErrorRecord {
                family: endpoint.family.clone(),
                error: failure.to_string(),
            })
        }
    }
}

async fn fetch_record(client: &Client, url: &str) -> Result<AddressRecord, EndpointFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| EndpointFailure::Transport {
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(EndpointFailure::from_status(
            status.as_u16(),
            status.canonical_reason(),
        ));
    }

    response
        .json::<AddressRecord>()
        .await
        .map_err(|_| EndpointFailure::Decode {
            status: status.as_u16(),
        })
}

/// Dispatches one lookup per configured family, all concurrently, appending
/// each settled outcome to `results` as it completes.
///
/// Entries land in completion order, which is non-deterministic. Once all
/// families have settled the list holds exactly one entry per family. The
/// caller keeps its own handle on `results` and may observe it while the
/// fan-out is still in flight.
pub async fn query_all(client: Arc<Client>, config: &Config, results: &ResultList) {
    let mut tasks = FuturesUnordered::new();

    for endpoint in &config.servers {
        let client = Arc::clone(&client);
        let endpoint = endpoint.clone();
        let host = config.host.clone();
        let scheme = config.scheme.clone();
        let results = results.clone();

        tasks.push(tokio::spawn(async move {
            let result = query_family(&client, &endpoint, host.as_deref(), &scheme).await;
            if let QueryResult::Address(record) = &result {
                info!("{}: {}", record.family, record.remote_addr);
            }
            results.append(result);
        }));
    }

    while let Some(task_result) = tasks.next().await {
        if let Err(join_error) = task_result {
            warn!("Lookup task panicked: {join_error:?}");
        }
    }
}
