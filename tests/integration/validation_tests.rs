//! Email validation flows, through the public API.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use verifalia::{Classification, ErrorKind, ValidationRequest, WaitOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{client_for, completed_job, start_servers};

#[tokio::test]
async fn test_submit_fails_over_and_completes() {
    let servers = start_servers(2).await;
    Mock::given(method("POST"))
        .and(path("/v2.6/email-validations"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&servers[0])
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.6/email-validations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completed_job("job-1", &["batman@gmail.com", "robin@gotham.com"])),
        )
        .expect(1)
        .mount(&servers[1])
        .await;

    let validation = client_for(&servers)
        .email_validations()
        .submit(
            ValidationRequest::new(["batman@gmail.com", "robin@gotham.com"]),
            WaitOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(validation.id(), "job-1");
    assert_eq!(validation.entries.len(), 2);
    assert!(validation
        .entries
        .iter()
        .all(|e| e.classification == Classification::Deliverable));
}

#[tokio::test]
async fn test_polling_reports_progress_until_completion() {
    let servers = start_servers(1).await;
    let in_progress = json!({
        "overview": {
            "id": "job-2",
            "status": "InProgress",
            "submittedOn": "2026-03-01T08:00:00Z",
            "noOfEntries": 1,
            "progress": {"percentage": 0.4}
        }
    });

    Mock::given(method("POST"))
        .and(path("/v2.6/email-validations"))
        .respond_with(ResponseTemplate::new(202).set_body_json(in_progress.clone()))
        .expect(1)
        .mount(&servers[0])
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.6/email-validations/job-2"))
        .respond_with(ResponseTemplate::new(202).set_body_json(in_progress))
        .up_to_n_times(1)
        .expect(1)
        .mount(&servers[0])
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.6/email-validations/job-2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completed_job("job-2", &["batman@gmail.com"])),
        )
        .expect(1)
        .mount(&servers[0])
        .await;

    let reports = Arc::new(AtomicUsize::new(0));
    let counter = reports.clone();
    let wait = WaitOptions::new()
        .with_poll_delay(Duration::from_millis(10))
        .with_jitter(0.0)
        .with_progress(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    let validation = client_for(&servers)
        .email_validations()
        .submit(ValidationRequest::new(["batman@gmail.com"]), wait)
        .await
        .unwrap();

    assert!(validation.is_completed());
    assert!(reports.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_missing_job_is_none() {
    let servers = start_servers(1).await;
    Mock::given(method("GET"))
        .and(path("/v2.6/email-validations/gone/overview"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&servers[0])
        .await;

    let overview = client_for(&servers)
        .email_validations()
        .get_overview("gone")
        .await
        .unwrap();
    assert!(overview.is_none());
}

#[tokio::test]
async fn test_unauthorized_submit() {
    let servers = start_servers(1).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&servers[0])
        .await;

    let err = client_for(&servers)
        .email_validations()
        .submit(ValidationRequest::new(["batman@gmail.com"]), WaitOptions::no_wait())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}
