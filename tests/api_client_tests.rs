mod common;

use common::{MockApi, spawn_mock_api, test_config};
use folio::ApiError;
use folio::api::ApiClient;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

async fn client(api: &MockApi, retry_max_times: usize) -> ApiClient {
    let base_url = spawn_mock_api(api.clone()).await;
    let mut cfg = test_config(&base_url);
    cfg.api.retry_max_times = retry_max_times;
    ApiClient::new(&cfg.api).expect("failed to build client")
}

#[tokio::test]
async fn get_is_retried_after_a_bad_gateway() {
    let api = MockApi::default();
    let client = client(&api, 2).await;

    let envelope = client
        .get::<Value>("/flaky", None)
        .await
        .expect("second attempt succeeds");
    assert_eq!(envelope.data, Some(json!({ "hits": 2 })));
    assert_eq!(api.calls(), ["GET /flaky", "GET /flaky"]);
}

#[tokio::test]
async fn post_is_sent_once() {
    let api = MockApi::default();
    let client = client(&api, 2).await;

    let err = client
        .send::<Value, Value>(Method::POST, "/flaky", None, Some(&json!({})))
        .await
        .expect_err("no retry for writes");
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.user_message(), "Upstream hiccup");
    assert_eq!(api.calls(), ["POST /flaky"]);
}

#[tokio::test]
async fn failed_envelope_on_success_status_is_an_error() {
    let api = MockApi::default();
    let client = client(&api, 2).await;

    let err = client
        .get::<Value>("/rejected", None)
        .await
        .expect_err("envelope reports failure");
    assert!(matches!(&err, ApiError::Rejected { message } if message == "Title already taken"));
    assert_eq!(err.server_message(), Some("Title already taken"));
    // Rejections are final.
    assert_eq!(api.calls(), ["GET /rejected"]);
}

#[tokio::test]
async fn empty_success_body_is_accepted() {
    let api = MockApi::default();
    let client = client(&api, 0).await;

    let envelope = client
        .send::<(), Value>(Method::DELETE, "/empty", None, None)
        .await
        .expect("empty body is fine");
    assert!(envelope.success);
    assert!(envelope.data.is_none());
    assert!(envelope.message().is_none());
}
