//! End-to-end fan-out tests against in-process HTTP servers.
//!
//! Each test binds one loopback listener per address family, runs a lookup
//! against them, and checks the accumulated results. No external network is
//! involved.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use addr_lookup::{run_lookup, Config, FamilyEndpoint, QueryResult};

/// Spawns a one-shot HTTP server that answers with `response` after `delay`.
///
/// Returns the listener's `host:port` plus a slot that captures the request
/// target (the path of the first request line) once a request arrives.
async fn spawn_server(response: String, delay: Duration) -> (String, Arc<Mutex<Option<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr").to_string();
    let captured = Arc::new(Mutex::new(None));
    let captured_slot = Arc::clone(&captured);

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            if let Some(target) = request.split_whitespace().nth(1) {
                *captured_slot.lock().expect("capture lock") = Some(target.to_string());
            }
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (addr, captured)
}

fn ok_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn error_response(status: u16, reason: &str) -> String {
    format!("HTTP/1.1 {status} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
}

fn record_body(family: &str, addr: &str) -> String {
    format!(r#"{{"RemoteAddr": "{addr}", "RemoteAddrFamily": "{family}"}}"#)
}

fn endpoint(family: &str, addr: &str) -> FamilyEndpoint {
    FamilyEndpoint {
        family: family.to_string(),
        base_url: addr.to_string(),
    }
}

fn config_for(servers: Vec<FamilyEndpoint>, host: Option<&str>) -> Config {
    Config {
        servers,
        host: host.map(String::from),
        scheme: "http".to_string(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn every_family_settles_even_when_one_fails() {
    // One immediate failure and two delayed successes: all three families
    // must still produce exactly one entry each.
    let (fail_addr, _) = spawn_server(error_response(500, "Server Error"), Duration::ZERO).await;
    let (slow_addr, _) = spawn_server(
        ok_response(&record_body("IPv6", "2001:db8::1")),
        Duration::from_millis(400),
    )
    .await;
    let (mid_addr, _) = spawn_server(
        ok_response(&record_body("IPv4", "203.0.113.7")),
        Duration::from_millis(200),
    )
    .await;

    let config = config_for(
        vec![
            endpoint("broken", &fail_addr),
            endpoint("IPv6", &slow_addr),
            endpoint("IPv4", &mid_addr),
        ],
        None,
    );

    let report = run_lookup(config).await.expect("lookup runs");

    assert_eq!(report.total_families, 3);
    assert_eq!(report.results.len(), 3, "one entry per family, none lost");
    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 1);

    let mut families: Vec<&str> = report.results.iter().map(|r| r.family()).collect();
    families.sort_unstable();
    assert_eq!(families, ["IPv4", "IPv6", "broken"], "no entry duplicated");

    // The instant failure settles long before the delayed successes, so it
    // must not have waited on them.
    assert!(report.results[0].is_error());
    match &report.results[0] {
        QueryResult::Error(record) => {
            assert_eq!(record.family, "broken");
            assert!(
                record.error.starts_with("500:"),
                "unexpected error text: {}",
                record.error
            );
        }
        QueryResult::Address(_) => unreachable!(),
    }
}

#[tokio::test]
async fn host_parameter_is_appended_to_every_request() {
    let (addr4, captured4) = spawn_server(
        ok_response(&record_body("IPv4", "203.0.113.7")),
        Duration::ZERO,
    )
    .await;
    let (addr6, captured6) = spawn_server(
        ok_response(&record_body("IPv6", "2001:db8::1")),
        Duration::ZERO,
    )
    .await;

    let config = config_for(
        vec![endpoint("IPv4", &addr4), endpoint("IPv6", &addr6)],
        Some("example.com"),
    );
    run_lookup(config).await.expect("lookup runs");

    for (captured, family) in [(captured4, "IPv4"), (captured6, "IPv6")] {
        let target = captured
            .lock()
            .expect("capture lock")
            .clone()
            .expect("request was made");
        assert!(
            target.ends_with("&host=example.com"),
            "{family} request target missing host: {target}"
        );
        assert!(target.contains(&format!("family={family}")));
    }
}

#[tokio::test]
async fn omitted_host_appears_in_no_request() {
    let (addr4, captured4) = spawn_server(
        ok_response(&record_body("IPv4", "203.0.113.7")),
        Duration::ZERO,
    )
    .await;

    let config = config_for(vec![endpoint("IPv4", &addr4)], None);
    run_lookup(config).await.expect("lookup runs");

    let target = captured4
        .lock()
        .expect("capture lock")
        .clone()
        .expect("request was made");
    assert_eq!(target, "/json?family=IPv4");
}

#[tokio::test]
async fn malformed_body_is_recorded_as_failure() {
    let (addr, _) = spawn_server(ok_response("surprise, not json"), Duration::ZERO).await;

    let config = config_for(vec![endpoint("IPv4", &addr)], None);
    let report = run_lookup(config).await.expect("lookup runs");

    assert_eq!(report.results.len(), 1);
    match &report.results[0] {
        QueryResult::Error(record) => {
            assert_eq!(record.family, "IPv4");
            assert_eq!(record.error, "200: malformed response body");
        }
        QueryResult::Address(record) => panic!("expected failure, got {record:?}"),
    }
}

#[tokio::test]
async fn transport_failure_is_recorded_not_raised() {
    // Bind and immediately drop a listener so the port refuses connections.
    let refused_addr = {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        listener.local_addr().expect("local addr").to_string()
    };

    let (ok_addr, _) = spawn_server(
        ok_response(&record_body("IPv4", "203.0.113.7")),
        Duration::ZERO,
    )
    .await;

    let config = config_for(
        vec![endpoint("IPv6", &refused_addr), endpoint("IPv4", &ok_addr)],
        None,
    );
    let report = run_lookup(config).await.expect("lookup still runs");

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.successful, 1);
    assert_eq!(report.failed, 1);

    let failure = report
        .results
        .iter()
        .find(|r| r.is_error())
        .expect("refused family recorded");
    assert_eq!(failure.family(), "IPv6");
    match failure {
        QueryResult::Error(record) => assert!(
            record.error.starts_with("request error:"),
            "unexpected error text: {}",
            record.error
        ),
        QueryResult::Address(_) => unreachable!(),
    }
}
