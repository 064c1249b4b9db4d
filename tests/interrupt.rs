//! Interrupt handling during the wait loop.
#![cfg(unix)]

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use macchiato::cromwell::CromwellClient;
use macchiato::runner::wait_for_completion;

const RUN_ID: &str = "3f8e2c5a-1111-2222-3333-444455556666";

/// An interrupt raised while a status request is in flight must still end
/// the wait: the signal listener stays alive across the poll, so the
/// signal is latched and observed on the next pass of the loop.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn interrupt_during_a_status_request_ends_the_wait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/workflows/v1"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": RUN_ID, "status": "Submitted"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/workflows/v1/{RUN_ID}/status")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": RUN_ID, "status": "Running"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client =
        CromwellClient::new(Url::parse(&server.uri()).unwrap(), Duration::from_secs(5)).unwrap();

    let wdl_dir = tempfile::tempdir().unwrap();
    let source = wdl_dir.path().join("workflow.wdl");
    std::fs::write(&source, "version 1.0\nworkflow W {}\n").unwrap();
    let handle = client
        .submit(&macchiato::cromwell::WorkflowSubmission {
            source: source.to_string_lossy().into_owned(),
            ..Default::default()
        })
        .await
        .unwrap();

    let waiter = tokio::spawn(async move {
        wait_for_completion(&client, &handle, Duration::from_millis(20)).await
    });

    // the first status response is still pending when the signal arrives
    tokio::time::sleep(Duration::from_millis(200)).await;
    unsafe {
        libc::raise(libc::SIGINT);
    }

    let result = tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("wait did not observe the interrupt")
        .unwrap()
        .unwrap();
    assert_eq!(result, None);
}
