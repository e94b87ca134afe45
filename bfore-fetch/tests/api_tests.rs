//! Integration tests for the API client and pipeline against a mock server.

use std::sync::Arc;

use bfore_core::{Session, TimeWindow, parse_timestamp};
use bfore_fetch::{
    ApiClient, CountingProgress, FetchContext, FetchError, FetchOutcome, HttpClient, NoProgress,
    ReportQuery, SampleQuery, fetch_window,
};
use chrono::Duration;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(HttpClient::new(&server.uri()).unwrap())
}

fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::new(parse_timestamp(start).unwrap(), parse_timestamp(end).unwrap()).unwrap()
}

fn session() -> Session {
    Session::new("secret-token", "alice")
}

#[tokio::test]
async fn test_domain_list_sends_query_and_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .and(query_param("c", "100"))
        .and(query_param("d", "0.75"))
        .and(query_param("s", "2024-01-01T00:00:00"))
        .and(query_param("e", "2024-01-01T00:30:00"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Id": 1, "Name": "a.com", "DomainCreated": "2023-12-01T00:00:00",
             "ScoreCreated": "2024-01-01T00:20:00", "Score": 0.91},
            {"Id": 2, "Name": "b.com", "DomainCreated": "2023-12-02T00:00:00",
             "ScoreCreated": "2024-01-01T00:05:00", "Score": 0.8}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server)
        .domain_list(
            &window("2024-01-01T00:00:00", "2024-01-01T00:30:00"),
            &session(),
            &SampleQuery::new(100, 0.75),
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "a.com");
    assert_eq!(items[1].score_created, "2024-01-01T00:05:00");
}

#[tokio::test]
async fn test_domain_list_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let items = client(&server)
        .domain_list(
            &window("2024-01-01T00:00:00", "2024-01-01T00:30:00"),
            &session(),
            &SampleQuery::new(10, 0.5),
        )
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_server_error_becomes_failed_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let api = client(&server);
    let progress = Arc::new(CountingProgress::new());
    let outcome = fetch_window(
        &api,
        window("2024-01-01T00:00:00", "2024-01-01T00:30:00"),
        &session(),
        &SampleQuery::new(10, 0.5),
        progress.clone(),
    )
    .await;

    assert_eq!(progress.done(), 1);
    match outcome {
        FetchOutcome::Failure {
            cause: FetchError::Status { status, body },
            ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client(&server)
        .domain_list(
            &window("2024-01-01T00:00:00", "2024-01-01T00:30:00"),
            &session(),
            &SampleQuery::new(10, 0.5),
        )
        .await;
    assert!(matches!(result, Err(FetchError::Json(_))));
}

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(json!({"username": "alice", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1", "username": "alice"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = client(&server).login(" alice ", "hunter2\n").await.unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("tok-1"));
    assert_eq!(session.username, "alice");
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "", "username": "alice"})))
        .mount(&server)
        .await;

    let result = client(&server).login("alice", "pw").await;
    assert!(matches!(result, Err(FetchError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = client(&server).login("alice", "wrong").await.unwrap_err();
    assert!(err.to_string().contains("bad credentials"));
}

#[tokio::test]
async fn test_report_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report/list"))
        .and(query_param("d", "example.com"))
        .and(query_param("n", "true"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reports": [{
                "Id": "r-7",
                "Created": "2024-01-01T00:00:00",
                "Certificate": {"Issuer": "R3", "Subject": "example.com"},
                "Records": [
                    {"DomainName": "example.com", "RecordType": "A", "Address": "93.184.216.34"},
                    {"DomainName": "example.com", "RecordType": "TXT", "Texts": ["v=spf1 -all"]}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let query = ReportQuery {
        domain: "example.com".to_string(),
        dns: "true".to_string(),
        ..Default::default()
    };
    let report = client(&server).report_list(&session(), &query).await.unwrap();

    assert_eq!(report.reports.len(), 1);
    let records = report.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].texts, vec!["v=spf1 -all".to_string()]);
}

#[tokio::test]
async fn test_pipeline_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .and(query_param("s", "2024-01-01T00:00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Id": 1, "Name": "late.com", "DomainCreated": "", "ScoreCreated": "2024-01-01T00:25:00", "Score": 0.9},
            {"Id": 2, "Name": "early.com", "DomainCreated": "", "ScoreCreated": "2024-01-01T00:01:00", "Score": 0.9}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .and(query_param("s", "2024-01-01T00:30:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Id": 3, "Name": "mid.com", "DomainCreated": "", "ScoreCreated": "2024-01-01T00:31:00", "Score": 0.9}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain/list"))
        .and(query_param("s", "2024-01-01T01:00:00"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ctx = FetchContext::builder()
        .base_url(server.uri())
        .max_concurrency(2)
        .build()
        .unwrap();
    let report = ctx
        .sample_pipeline(Arc::new(NoProgress))
        .run_range(
            parse_timestamp("2024-01-01T00:00:00").unwrap(),
            parse_timestamp("2024-01-01T01:30:00").unwrap(),
            Duration::minutes(30),
            &session(),
            &SampleQuery::new(50, 0.9),
        )
        .await
        .unwrap();

    let names: Vec<&str> = report.items.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["early.com", "late.com", "mid.com"]);
    assert_eq!(report.windows_total, 3);
    assert_eq!(report.windows_failed(), 1);
}
