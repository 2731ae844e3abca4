use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qwen_image::{Enhancement, EnhancementSuffix, GenerationParameters, QwenClient, QwenError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn no_suffix() -> EnhancementSuffix {
    EnhancementSuffix::new(Enhancement::None)
}

#[tokio::test]
async fn test_backend_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("OOM"))
        .mount(&server)
        .await;

    let client = QwenClient::new_with_url(&server.uri()).unwrap();
    let params = GenerationParameters::new("A cat");

    let err = client.generate(&params, &no_suffix()).await.unwrap_err();

    match err {
        QwenError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "OOM");
        }
        other => panic!("expected Api error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_prompt_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = QwenClient::new_with_url(&server.uri()).unwrap();

    for prompt in ["", "   ", "\n\t "] {
        let err = client
            .generate(&GenerationParameters::new(prompt), &no_suffix())
            .await
            .unwrap_err();
        assert!(matches!(err, QwenError::EmptyPrompt));
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "image_base64": STANDARD.encode(b"png") }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut client = QwenClient::new_with_url(&server.uri()).unwrap();
    client.timeout_override = Some(Duration::from_millis(50));

    let err = client
        .generate(&GenerationParameters::new("A cat"), &no_suffix())
        .await
        .unwrap_err();

    assert!(matches!(err, QwenError::Timeout));
}

#[tokio::test]
async fn test_connection_failure_maps_to_unreachable() {
    // Grab a port that is guaranteed to be free again once the server drops.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = QwenClient::new_with_url(&uri).unwrap();

    let err = client
        .generate(&GenerationParameters::new("A cat"), &no_suffix())
        .await
        .unwrap_err();

    match err {
        QwenError::Unreachable { endpoint } => {
            assert!(endpoint.contains("/generate"));
        }
        other => panic!("expected Unreachable error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_image_payload_maps_to_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image_base64": "this is not base64!!!"
        })))
        .mount(&server)
        .await;

    let client = QwenClient::new_with_url(&server.uri()).unwrap();

    let err = client
        .generate(&GenerationParameters::new("A cat"), &no_suffix())
        .await
        .unwrap_err();

    assert!(matches!(err, QwenError::Unknown { .. }));
}
