//! Common harness for the integration tests.

use std::sync::Once;

use serde_json::{json, Value};
use verifalia::{Client, EndpointSet, UsernamePasswordConfig};
use wiremock::MockServer;

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Starts `count` mock endpoints.
pub async fn start_servers(count: usize) -> Vec<MockServer> {
    init_tracing();
    let mut servers = Vec::with_capacity(count);
    for _ in 0..count {
        servers.push(MockServer::start().await);
    }
    servers
}

/// Builds a client failing over across `servers`, in order.
pub fn client_for(servers: &[MockServer]) -> Client {
    client_for_uris(servers.iter().map(|s| s.uri()))
}

/// Builds a client from raw endpoint URIs.
#[allow(clippy::unwrap_used)]
pub fn client_for_uris(uris: impl IntoIterator<Item = String>) -> Client {
    Client::builder()
        .credentials(UsernamePasswordConfig::new("samantha", "42"))
        .endpoints(EndpointSet::parse(uris).unwrap())
        .timeout(std::time::Duration::from_secs(2))
        .insecure()
        .build()
        .unwrap()
}

/// A base URI nothing listens on.
pub fn refused_uri() -> String {
    "http://127.0.0.1:1".to_string()
}

/// A completed job with one deliverable entry per address.
pub fn completed_job(id: &str, addresses: &[&str]) -> Value {
    let data: Vec<Value> = addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            json!({
                "index": index,
                "inputData": address,
                "classification": "Deliverable",
                "status": "Success"
            })
        })
        .collect();

    json!({
        "overview": {
            "id": id,
            "status": "Completed",
            "submittedOn": "2026-03-01T08:00:00Z",
            "completedOn": "2026-03-01T08:00:02Z",
            "noOfEntries": addresses.len()
        },
        "entries": {
            "meta": {"isTruncated": false},
            "data": data
        }
    })
}
