/// Represents the possible errors that can occur when submitting a generation request.
#[derive(Debug, thiserror::Error)]
pub enum QwenError {
    /// The prompt was empty or whitespace-only. No request was sent.
    #[error("Prompt is empty. Please enter a prompt before generating.")]
    EmptyPrompt,
    /// The service answered with a non-200 status. The response body is kept verbatim.
    #[error("Generation failed: {status} - {body}")]
    Api {
        /// The HTTP status code returned by the service.
        status: u16,
        /// The response body text, unparsed.
        body: String,
    },
    /// The request did not complete within the generation timeout.
    #[error("Request timed out. The model might be loading or overloaded.")]
    Timeout,
    /// No connection could be established to the service.
    #[error("Cannot connect to API at {endpoint}. Make sure the service is running.")]
    Unreachable {
        /// The endpoint that could not be reached.
        endpoint: String,
    },
    /// URL parsing failed, typically on the configured base URL.
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    /// An error occurred during file I/O operations.
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Any other failure during the request or while decoding the response.
    #[error("Error: {message}")]
    Unknown {
        /// A description of what went wrong.
        message: String,
    },
}

/// The single failure signal reported by the health probe.
///
/// The probe does not distinguish between timeouts, connection failures and
/// unhealthy responses; callers only need to know the service cannot be used.
#[derive(Debug, thiserror::Error)]
#[error("Cannot reach service at {endpoint}")]
pub struct ProbeError {
    /// The health endpoint that was probed.
    pub endpoint: String,
}
