//! An unofficial Rust client for the Qwen-Image inference service.
//!
//! This crate provides a convenient, asynchronous interface for submitting
//! text-to-image generation requests to a self-hosted Qwen-Image backend and
//! working with the returned images. It handles payload construction, error
//! handling and saving results to disk, allowing you to focus on your
//! application's core logic.
//!
//! ## Features
//! - Single-shot image generation with typed parameters.
//! - Session state tracking for form-style frontends.
//! - Prompt quality enhancement with built-in or custom suffixes.
//! - Health probing with GPU details.
//! - Helper for saving generated images.
//!
//! ## Example
//!
//! ```no_run
//! use qwen_image::{EnhancementSuffix, GenerationParameters, QwenClient, Session};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = QwenClient::new(None)?;
//! let mut session = Session::new(client);
//!
//! let params = GenerationParameters::new("A cat wearing a tiny wizard hat");
//! let result = session.submit(&params, &EnhancementSuffix::default()).await?;
//! println!("Generated {} bytes in {:.1}s", result.image.len(), result.elapsed.as_secs_f64());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod prompt;
pub mod session;
pub mod types;

pub use client::QwenClient;
pub use error::{ProbeError, QwenError};
pub use prompt::{Enhancement, EnhancementSuffix, CHINESE_SUFFIX, ENGLISH_SUFFIX, EXAMPLE_PROMPTS};
pub use session::{Session, SessionState, DEFAULT_PROMPT};
pub use types::{
    AspectRatio, GenerationParameters, GenerationResult, GpuInfo, HealthStatus,
    ResolvedParameters, Seed,
};
