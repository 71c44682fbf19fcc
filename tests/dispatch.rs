//! Tests for request dispatch: authentication, status mapping and
//! last-response tracking.
//!
//! Uses wiremock to stand in for the football-data API.

use footballdata::{Competition, FootballClient, FootballError, Get, Team};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FootballClient {
    FootballClient::with_base_url("test-key", &server.uri()).unwrap()
}

fn team_json() -> serde_json::Value {
    serde_json::json!({
        "_links": {
            "self": {"href": "http://api.football-data.org/v1/teams/66"},
            "fixtures": {"href": "http://api.football-data.org/v1/teams/66/fixtures"},
            "players": {"href": "http://api.football-data.org/v1/teams/66/players"}
        },
        "name": "Manchester United FC",
        "code": "MUFC",
        "shortName": "ManU",
        "squadMarketValue": null,
        "crestUrl": "http://upload.wikimedia.org/wikipedia/de/d/da/Manchester_United_FC.svg"
    })
}

#[tokio::test]
async fn test_api_key_sent_as_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .and(header("X-Auth-Token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(team_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let team = Team::get(&client, 66).await.expect("get should succeed");

    assert_eq!(team.name.as_deref(), Some("Manchester United FC"));
}

#[tokio::test]
async fn test_missing_key_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    let err = FootballClient::with_base_url("", &mock_server.uri()).unwrap_err();
    assert!(matches!(err, FootballError::Configuration(_)));

    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_last_response_before_any_call_is_none() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    assert!(client.last_response().is_none());
}

#[tokio::test]
async fn test_last_response_records_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(team_json())
                .insert_header("X-Requests-Available", "49")
                .insert_header("X-RequestCounter-Reset", "60"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    Team::get(&client, 66).await.expect("get should succeed");

    let last = client.last_response().expect("response should be recorded");
    assert_eq!(last.status_code(), Some(200));
    assert!(last.is_success());
    assert_eq!(last.url().path(), "/teams/66");
    assert_eq!(last.requests_available(), Some(49));
    assert_eq!(last.request_counter_reset(), Some(60));
    assert!(last.body().contains("Manchester United FC"));
}

#[tokio::test]
async fn test_last_response_is_replaced_not_merged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(team_json())
                .insert_header("X-Requests-Available", "49"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/teams/9999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "The resource you are looking for does not exist."})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    Team::get(&client, 66).await.expect("get should succeed");
    let _ = Team::get(&client, 9999).await;

    let last = client.last_response().unwrap();
    assert_eq!(last.status_code(), Some(404));
    assert_eq!(last.url().path(), "/teams/9999");
    // Nothing carried over from the first response.
    assert!(last.requests_available().is_none());
    assert!(!last.body().contains("Manchester"));
}

#[tokio::test]
async fn test_401_is_authentication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions/445"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "The API token is invalid."})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Competition::get(&client, 445).await.unwrap_err();

    match err {
        FootballError::Authentication { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "The API token is invalid.");
        }
        other => panic!("Expected Authentication, got {other:?}"),
    }
    assert_eq!(client.last_response().unwrap().status_code(), Some(401));
}

#[tokio::test]
async fn test_403_is_authentication_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions/445"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Competition::get(&client, 445).await.unwrap_err();

    assert!(matches!(err, FootballError::Authentication { status: 403, .. }));
}

#[tokio::test]
async fn test_404_is_not_found_naming_the_entity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/9999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Team::get(&client, 9999).await.unwrap_err();

    match &err {
        FootballError::NotFound { entity_type, id } => {
            assert_eq!(*entity_type, "team");
            assert_eq!(id, "9999");
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert_eq!(err.to_string(), "team '9999' not found");
}

#[tokio::test]
async fn test_500_is_request_error_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Team::get(&client, 66).await.unwrap_err();

    match err {
        FootballError::Request { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected Request, got {other:?}"),
    }

    let last = client.last_response().unwrap();
    assert_eq!(last.status_code(), Some(500));
    assert_eq!(last.body(), "upstream exploded");
}

#[tokio::test]
async fn test_429_is_rate_limited_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-Requests-Available", "0")
                .insert_header("X-RequestCounter-Reset", "42")
                .set_body_json(serde_json::json!({"error": "You reached your request limit."})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Team::get(&client, 66).await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.status(), Some(429));

    let last = client.last_response().unwrap();
    assert_eq!(last.requests_available(), Some(0));
    assert_eq!(last.request_counter_reset(), Some(42));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Team::get(&client, 66).await.unwrap_err();

    assert!(matches!(err, FootballError::Parse(_)));
    // The raw body is still there to look at.
    assert_eq!(client.last_response().unwrap().body(), "<html>not json</html>");
}

#[tokio::test]
async fn test_transport_failure_is_recorded_without_status() {
    // Nothing listens on port 1.
    let client = FootballClient::with_base_url("test-key", "http://127.0.0.1:1").unwrap();

    let err = Team::get(&client, 66).await.unwrap_err();
    assert!(matches!(err, FootballError::Transport(_)));

    let last = client.last_response().expect("failure should be recorded");
    assert_eq!(last.status_code(), None);
    assert!(!last.is_success());
    assert_eq!(last.url().path(), "/teams/66");
}

#[tokio::test]
async fn test_separate_clients_do_not_share_last_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/66"))
        .respond_with(ResponseTemplate::new(200).set_body_json(team_json()))
        .mount(&mock_server)
        .await;

    let first = client_for(&mock_server);
    let second = client_for(&mock_server);
    let cloned = first.clone();

    Team::get(&first, 66).await.expect("get should succeed");

    assert!(first.last_response().is_some());
    assert!(cloned.last_response().is_some());
    assert!(second.last_response().is_none());
}

#[tokio::test]
async fn test_verify_rejected_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitions"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.verify().await.unwrap_err();

    assert!(matches!(err, FootballError::Authentication { .. }));
}

#[tokio::test]
async fn test_dispatch_stays_on_base_url() {
    let api_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&other_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/66"))
        .and(header("X-Auth-Token", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(team_json()))
        .expect(1)
        .mount(&api_server)
        .await;

    let base = format!("{}/v1", api_server.uri());
    let client = FootballClient::with_base_url("secret-key", &base).unwrap();

    // Another origin never sees the key.
    let err = client
        .dispatch(&format!("{}/steal", other_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, FootballError::InvalidArgument(_)));

    let err = client
        .dispatch_with_query(&format!("{}/steal", other_server.uri()), &[("a", "b")])
        .await
        .unwrap_err();
    assert!(matches!(err, FootballError::InvalidArgument(_)));

    let received = other_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());

    // A leading slash would drop the /v1 prefix.
    let err = client.dispatch("/teams/66").await.unwrap_err();
    assert!(matches!(err, FootballError::InvalidArgument(_)));
    assert!(client.last_response().is_none());

    // Relative paths resolve under the prefix.
    client.dispatch("teams/66").await.expect("dispatch should succeed");
    assert_eq!(client.last_response().unwrap().url().path(), "/v1/teams/66");
}
