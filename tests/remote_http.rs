// Tests for the HTTP remote classifier against a simulated endpoint.
//
// The mock server checks the outbound request shape (method, path, headers,
// body) and plays back success, error status, malformed and slow responses.

use std::time::Duration;

use serde_json::json;
use veil::config::RemoteConfig;
use veil::remote::{Category, CategoryScore, ClassifierError, HttpClassifier, RemoteClassifier};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote_config(server: &MockServer) -> RemoteConfig {
    RemoteConfig {
        api_key: "test-key".to_string(),
        api_host: "moderation.example".to_string(),
        api_url: format!("{}/v1/moderate", server.uri()),
        timeout: Duration::from_secs(2),
        ..RemoteConfig::default()
    }
}

#[tokio::test]
async fn sends_text_with_key_and_host_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/moderate"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "moderation.example"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"text": "hello there"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "moderation_classes": {"available": ["toxic", "sexual"], "toxic": 0.1, "sexual": 0.02}
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClassifier::new(&remote_config(&server)).unwrap();
    let scores = client.classify_remote("hello there").await.unwrap();

    assert_eq!(
        scores,
        vec![
            CategoryScore {
                category: Category::Toxic,
                score: 0.1
            },
            CategoryScore {
                category: Category::Sexual,
                score: 0.02
            },
        ]
    );
}

#[tokio::test]
async fn custom_header_names_are_used() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("X-Api-Key", "test-key"))
        .and(header("X-Api-Host", "moderation.example"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"moderation_classes": {"toxic": 0.3}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = RemoteConfig {
        key_header: "X-Api-Key".to_string(),
        host_header: "X-Api-Host".to_string(),
        ..remote_config(&server)
    };
    let client = HttpClassifier::new(&config).unwrap();
    assert!(client.classify_remote("anything").await.is_ok());
}

#[tokio::test]
async fn host_header_defaults_to_url_host() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("X-RapidAPI-Host", "127.0.0.1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"moderation_classes": {"toxic": 0.3}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = RemoteConfig {
        api_host: String::new(),
        ..remote_config(&server)
    };
    let client = HttpClassifier::new(&config).unwrap();
    assert!(client.classify_remote("anything").await.is_ok());
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HttpClassifier::new(&remote_config(&server)).unwrap();
    let err = client.classify_remote("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::UpstreamStatus(503)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_unexpected_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = HttpClassifier::new(&remote_config(&server)).unwrap();
    let err = client.classify_remote("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::UnexpectedShape(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_classes_are_not_treated_as_clean() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"moderation_classes": {"available": []}})),
        )
        .mount(&server)
        .await;

    let client = HttpClassifier::new(&remote_config(&server)).unwrap();
    let err = client.classify_remote("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::UnexpectedShape(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_endpoint_times_out_as_unreachable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"moderation_classes": {"toxic": 0.1}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = RemoteConfig {
        timeout: Duration::from_millis(200),
        ..remote_config(&server)
    };
    let client = HttpClassifier::new(&config).unwrap();
    let err = client.classify_remote("text").await.unwrap_err();
    assert!(
        matches!(err, ClassifierError::Unreachable { timed_out: true, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    let config = RemoteConfig {
        api_key: "test-key".to_string(),
        api_url: "http://127.0.0.1:1/v1/moderate".to_string(),
        timeout: Duration::from_secs(2),
        ..RemoteConfig::default()
    };
    let client = HttpClassifier::new(&config).unwrap();
    let err = client.classify_remote("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Unreachable { .. }), "got {err:?}");
}

#[test]
fn invalid_header_name_is_misconfigured() {
    let config = RemoteConfig {
        api_key: "test-key".to_string(),
        api_url: "https://moderation.example/v1".to_string(),
        key_header: "bad header".to_string(),
        ..RemoteConfig::default()
    };
    assert!(matches!(
        HttpClassifier::new(&config),
        Err(ClassifierError::Misconfigured(_))
    ));
}
