use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn setup_mock_server() -> MockServer {
    let server = MockServer::start().await;

    // Mock for check_health
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gpu_info": {
                "gpu_count": 2,
                "gpu_memory": ["24.0 GB", "24.0 GB"]
            }
        })))
        .mount(&server)
        .await;

    server
}
