//! Session state and the submit/display lifecycle.
//!
//! A [`Session`] owns what a form UI needs between interactions: the prompt
//! being edited, the last successful result, and whether a request is in
//! flight. One session drives one user; nothing here is shared.

use crate::client::QwenClient;
use crate::error::QwenError;
use crate::prompt::EnhancementSuffix;
use crate::types::{GenerationParameters, GenerationResult};

/// The prompt a fresh session starts with.
pub const DEFAULT_PROMPT: &str = "A beautiful landscape with mountains and lakes";

/// UI-bound state for one generation session.
///
/// The generated image and its metadata live together inside one
/// [`GenerationResult`], so one can never be present without the other.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The prompt currently being edited.
    pub current_prompt: String,
    result: Option<GenerationResult>,
    generating: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_prompt: DEFAULT_PROMPT.to_string(),
            result: None,
            generating: false,
        }
    }
}

impl SessionState {
    /// The last successful result, if any.
    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Whether a request is currently in flight.
    ///
    /// This flag is advisory display state, not a mutex; the driving UI is
    /// expected to allow only one submission at a time.
    pub fn is_generating(&self) -> bool {
        self.generating
    }
}

/// Orchestrates one generation cycle from form submission to stored result.
pub struct Session {
    client: QwenClient,
    state: SessionState,
}

impl Session {
    /// Creates a session with default state.
    pub fn new(client: QwenClient) -> Self {
        Self {
            client,
            state: SessionState::default(),
        }
    }

    /// The session's current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The last successful result, if any.
    pub fn result(&self) -> Option<&GenerationResult> {
        self.state.result()
    }

    /// Whether a request is currently in flight.
    pub fn is_generating(&self) -> bool {
        self.state.is_generating()
    }

    /// The prompt currently being edited.
    pub fn current_prompt(&self) -> &str {
        &self.state.current_prompt
    }

    /// Replaces the prompt being edited, e.g. when the user picks an example.
    pub fn set_current_prompt(&mut self, prompt: impl Into<String>) {
        self.state.current_prompt = prompt.into();
    }

    /// Submits one generation request and records the outcome.
    ///
    /// A blank prompt fails immediately without touching the session state or
    /// the network. Otherwise the prior result is cleared before the outcome
    /// is known, so a failed resubmission leaves the display empty rather
    /// than showing a stale image.
    ///
    /// Whatever the outcome, the in-flight flag is false by the time this
    /// returns.
    ///
    /// # Returns
    ///
    /// A reference to the stored [`GenerationResult`] on success.
    ///
    /// # Errors
    ///
    /// See [`QwenClient::generate`] for the error taxonomy. Errors are
    /// terminal for this submission only; the session accepts new attempts.
    pub async fn submit(
        &mut self,
        params: &GenerationParameters,
        enhancement: &EnhancementSuffix,
    ) -> Result<&GenerationResult, QwenError> {
        params.validate()?;

        self.state.result = None;
        self.state.generating = true;

        let outcome = self.client.generate(params, enhancement).await;
        self.state.generating = false;

        match outcome {
            Ok(result) => Ok(&*self.state.result.insert(result)),
            Err(e) => Err(e),
        }
    }

    /// Drops the stored result — image and metadata together.
    pub fn clear(&mut self) {
        self.state.result = None;
    }
}
