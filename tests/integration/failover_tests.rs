//! Failover across endpoints, through the public API.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use verifalia::transport::{InvokeRequest, StatusCode};
use verifalia::{CancellationToken, ErrorKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{client_for, client_for_uris, refused_uri, start_servers};

const BALANCE: &str = "/v2.6/credits/balance";

#[tokio::test]
async fn test_first_healthy_endpoint_serves_the_call() {
    let servers = start_servers(3).await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&servers[0])
        .await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"creditPacks": 5.0})))
        .expect(1)
        .mount(&servers[1])
        .await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&servers[2])
        .await;

    let client = client_for(&servers);
    let balance = client.credits().get_balance().await.unwrap();

    assert_eq!(balance.credit_packs, 5.0);
    let stats = client.stats();
    assert_eq!(stats.calls, 1);
    assert_eq!(stats.attempts, 2);
    assert_eq!(stats.failovers, 1);
}

#[tokio::test]
async fn test_mixed_failures_report_every_attempt_in_order() {
    let servers = start_servers(2).await;
    for server in &servers {
        Mock::given(path(BALANCE))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(server)
            .await;
    }

    let uris = vec![refused_uri(), servers[0].uri(), servers[1].uri()];
    let client = client_for_uris(uris);
    let err = client.credits().get_balance().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServiceUnreachable);
    let attempts = err.attempts();
    assert_eq!(attempts.len(), 3);
    assert!(attempts[0].status_code().is_none());
    assert_eq!(attempts[1].status_code(), Some(500));
    assert_eq!(attempts[2].status_code(), Some(500));
    assert!(attempts[1].endpoint().as_str().starts_with(&servers[0].uri()));
    assert_eq!(client.stats().unreachable, 1);
}

#[tokio::test]
async fn test_client_errors_do_not_fail_over() {
    let servers = start_servers(2).await;
    Mock::given(path(BALANCE))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({"message": "not enough credits"})),
        )
        .expect(1)
        .mount(&servers[0])
        .await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&servers[1])
        .await;

    let err = client_for(&servers).credits().get_balance().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientCredit);
    assert_eq!(err.message(), "not enough credits");
    assert!(err.attempts().is_empty());
}

#[tokio::test]
async fn test_raw_transport_call_returns_status() {
    let servers = start_servers(1).await;
    Mock::given(method("GET"))
        .and(path("/v2.6/contact-methods"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&servers[0])
        .await;

    let client = client_for(&servers);
    let response = client
        .transport()
        .invoke(InvokeRequest::get("v2.6/contact-methods"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.to_error().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_cancellation_interrupts_slow_endpoint() {
    let servers = start_servers(2).await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&servers[0])
        .await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&servers[1])
        .await;

    let client = client_for(&servers);
    let token = CancellationToken::new();
    let request = InvokeRequest::get("v2.6/credits/balance").with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let err = client.transport().invoke(request).await.unwrap_err();
    canceller.await.unwrap();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(client.stats().cancelled, 1);
}

#[tokio::test]
async fn test_concurrent_calls_share_the_client() {
    let servers = start_servers(2).await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&servers[0])
        .await;
    Mock::given(path(BALANCE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"creditPacks": 1.0})))
        .expect(4)
        .mount(&servers[1])
        .await;

    let client = client_for(&servers);
    let calls = (0..4).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.credits().get_balance().await })
    });

    for handle in futures::future::join_all(calls).await {
        assert_eq!(handle.unwrap().unwrap().credit_packs, 1.0);
    }
    assert_eq!(client.stats().attempts, 8);
}
