use std::env;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ProbeError, QwenError};
use crate::prompt::EnhancementSuffix;
use crate::types::{
    build_request, GenerateResponse, GenerationParameters, GenerationResult, HealthStatus,
    ResolvedParameters, Seed,
};

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// How long a generation request may run before it is abandoned.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(180);

/// How long the health probe waits for an answer.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// The main client for interacting with the Qwen-Image service.
///
/// It holds the shared `reqwest::Client` and the base URL for all API
/// requests. It is designed to be cloneable and safe to share across threads.
#[derive(Clone)]
pub struct QwenClient {
    client: reqwest::Client,
    base_url: Url,
    /// Replaces the fixed request timeouts when set. Intended for tests
    /// against a mock server.
    pub timeout_override: Option<Duration>,
}

impl QwenClient {
    /// Creates a new `QwenClient`.
    ///
    /// This method initializes the client with a service base URL. It first
    /// checks the `base_url` parameter. If it's `None`, it falls back to the
    /// `API_URL` environment variable, and finally to `http://localhost:8000`.
    ///
    /// # Errors
    ///
    /// - `QwenError::UrlParseFailed` if the resolved base URL is invalid.
    /// - `QwenError::Unknown` if the internal HTTP client fails to build.
    pub fn new(base_url: Option<String>) -> Result<Self, QwenError> {
        let base_url = base_url
            .or_else(|| env::var("API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new_with_url(&base_url)
    }

    /// Creates a new `QwenClient` with an explicit base URL.
    ///
    /// This is useful for testing or for connecting to a different service
    /// instance.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the service (e.g., for a mock server).
    ///
    /// # Errors
    ///
    /// - `QwenError::UrlParseFailed` if `base_url` is invalid.
    /// - `QwenError::Unknown` if the internal HTTP client fails to build.
    pub fn new_with_url(base_url: &str) -> Result<Self, QwenError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| QwenError::Unknown {
                message: e.to_string(),
            })?;

        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            timeout_override: None,
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submits one generation request and waits for the image.
    ///
    /// The prompt is first extended with the enhancement suffix, then the
    /// payload is POSTed to `/generate`. The call is synchronous from the
    /// caller's perspective: it suspends until the service answers, the
    /// 180-second timeout fires, or the connection fails. There are no
    /// retries; a timeout does not abort the generation on the server side.
    ///
    /// # Arguments
    ///
    /// * `params` - The parameter set for this request.
    /// * `enhancement` - The quality suffix to fold into the prompt.
    ///
    /// # Returns
    ///
    /// A [`GenerationResult`] holding the decoded image bytes and the
    /// metadata of the request, including the seed the service actually used.
    ///
    /// # Errors
    ///
    /// - `QwenError::EmptyPrompt` if the prompt is blank. No request is sent.
    /// - `QwenError::Api` if the service answers with a non-200 status.
    /// - `QwenError::Timeout` if the request exceeds the timeout.
    /// - `QwenError::Unreachable` if no connection could be established.
    /// - `QwenError::Unknown` for any other request or decode failure.
    pub async fn generate(
        &self,
        params: &GenerationParameters,
        enhancement: &EnhancementSuffix,
    ) -> Result<GenerationResult, QwenError> {
        params.validate()?;

        let url = self.base_url.join("generate")?;
        let enhanced_prompt = enhancement.apply(&params.prompt);
        let request_body = build_request(params, &enhanced_prompt);

        debug!(
            steps = params.num_inference_steps,
            cfg_scale = params.true_cfg_scale,
            resolution = %params.aspect_ratio,
            seed = %params.seed,
            "submitting generation request"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(url.clone())
            .timeout(self.timeout_override.unwrap_or(GENERATE_TIMEOUT))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_request_error(e, &url))?;
        let elapsed = started.elapsed();

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "generation request failed");
            return Err(QwenError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| classify_request_error(e, &url))?;

        let image = decode_image(&data.image_base64)?;

        // The service reports which seed it picked; this matters when the
        // request asked for a random one.
        let seed = data
            .seed_used
            .and_then(|s| u32::try_from(s).ok())
            .map(Seed::Fixed)
            .unwrap_or(params.seed);

        let (width, height) = params.aspect_ratio.dimensions();

        info!(
            elapsed_secs = elapsed.as_secs_f64(),
            image_bytes = image.len(),
            %seed,
            "image generated"
        );

        Ok(GenerationResult {
            image,
            prompt: enhanced_prompt,
            original_prompt: params.prompt.clone(),
            negative_prompt: params.negative_prompt.clone(),
            elapsed,
            timestamp: chrono::Utc::now().timestamp(),
            parameters: ResolvedParameters {
                steps: params.num_inference_steps,
                cfg_scale: params.true_cfg_scale,
                width,
                height,
                aspect_ratio: params.aspect_ratio,
                seed,
            },
        })
    }

    /// Probes the service's health endpoint.
    ///
    /// Issues a GET to `/health` with a 10-second timeout and parses the
    /// optional GPU details from the answer.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on any failure: non-200 answer, timeout,
    /// connection failure or malformed body. The probe deliberately does not
    /// distinguish between them.
    pub async fn check_health(&self) -> Result<HealthStatus, ProbeError> {
        let url = self.base_url.join("health").map_err(|_| ProbeError {
            endpoint: self.base_url.to_string(),
        })?;
        let probe_failed = || ProbeError {
            endpoint: url.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout_override.unwrap_or(HEALTH_TIMEOUT))
            .send()
            .await
            .map_err(|_| probe_failed())?;

        if response.status() != reqwest::StatusCode::OK {
            warn!(status = response.status().as_u16(), "service unhealthy");
            return Err(probe_failed());
        }

        response.json().await.map_err(|_| probe_failed())
    }
}

/// Maps a transport-level failure onto the error taxonomy.
fn classify_request_error(err: reqwest::Error, endpoint: &Url) -> QwenError {
    if err.is_timeout() {
        QwenError::Timeout
    } else if err.is_connect() {
        QwenError::Unreachable {
            endpoint: endpoint.to_string(),
        }
    } else {
        QwenError::Unknown {
            message: err.to_string(),
        }
    }
}

/// Decodes the base64 image payload from the response body.
fn decode_image(image_base64: &str) -> Result<Vec<u8>, QwenError> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    STANDARD
        .decode(image_base64)
        .map_err(|e| QwenError::Unknown {
            message: format!("invalid image payload: {}", e),
        })
}
