//! Integration tests for `AgentClient` and `poll_task` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use tabscout_embeddings::{
    poll_task, AgentClient, CancellationToken, EmbeddingsError, PollPolicy, ProcessOutcome,
    TaskStatus,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AgentClient {
    AgentClient::new(base_url, 5, "tabscout-test/0.1")
        .expect("client construction should not fail")
}

fn fast_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(10),
        max_attempts,
    }
}

// ---------------------------------------------------------------------------
// POST /process
// ---------------------------------------------------------------------------

#[tokio::test]
async fn process_sends_url_and_html_and_returns_task_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_json(json!({
            "url": "https://example.com/article",
            "html_content": "<html><body>hi</body></html>"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "processing", "task_id": "1718.25"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client
        .process(
            "https://example.com/article",
            Some("<html><body>hi</body></html>"),
        )
        .await
        .expect("process should succeed");

    assert_eq!(
        outcome,
        ProcessOutcome::Processing {
            task_id: "1718.25".to_string()
        }
    );
}

#[tokio::test]
async fn process_surfaces_agent_error_body_as_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "URL is required"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client.process("", None).await.expect("400 with body is an outcome");
    assert_eq!(outcome, ProcessOutcome::Rejected("URL is required".to_string()));
}

#[tokio::test]
async fn process_reports_unexpected_status_without_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .process("https://example.com", None)
        .await
        .expect_err("502 should fail");
    assert!(
        matches!(err, EmbeddingsError::UnexpectedStatus { status: 502, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn search_returns_malformed_json_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("rust").await.expect_err("should fail to parse");
    assert!(matches!(err, EmbeddingsError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn preview_returns_title_and_lead() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/preview"))
        .and(body_json(json!({"url": "https://example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "title": "Example Domain",
            "preview": "This domain is for use in examples."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let preview = client.preview("https://example.com").await.expect("preview");
    assert!(preview.success);
    assert_eq!(preview.title.as_deref(), Some("Example Domain"));
}

// ---------------------------------------------------------------------------
// Task polling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn processing_status_triggers_exactly_one_more_poll() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/t-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "processing", "task_id": "t-1"})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/task/t-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "chunks_processed": 4})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let task = poll_task(&client, "t-1", fast_policy(10), &CancellationToken::new())
        .await
        .expect("task should complete");

    assert_eq!(task.status, TaskStatus::Success);
    assert_eq!(task.chunks_processed, Some(4));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn terminal_status_is_never_polled_again() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/t-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "error": "Failed to fetch page"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let task = poll_task(&client, "t-2", fast_policy(10), &CancellationToken::new())
        .await
        .expect("error task is still a terminal result");

    assert_eq!(task.status, TaskStatus::Error);
    assert_eq!(task.error.as_deref(), Some("Failed to fetch page"));
}

#[tokio::test]
async fn polling_stops_at_attempt_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/t-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "processing"})))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = poll_task(&client, "t-3", fast_policy(3), &CancellationToken::new())
        .await
        .expect_err("should give up");

    assert!(
        matches!(err, EmbeddingsError::PollLimit { attempts: 3, ref task_id } if task_id == "t-3"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn cancelled_token_stops_polling_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/t-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "processing"})))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = test_client(&server.uri());
    let err = poll_task(&client, "t-4", fast_policy(10), &cancel)
        .await
        .expect_err("should be cancelled");
    assert!(matches!(err, EmbeddingsError::Cancelled { .. }), "got: {err:?}");
}

#[tokio::test]
async fn cancelling_during_the_delay_ends_the_poll() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/t-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "processing"})))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let client = test_client(&server.uri());
    let policy = PollPolicy {
        interval: Duration::from_secs(30),
        max_attempts: 10,
    };
    let err = poll_task(&client, "t-5", policy, &cancel)
        .await
        .expect_err("should be cancelled");
    assert!(matches!(err, EmbeddingsError::Cancelled { .. }), "got: {err:?}");
}
