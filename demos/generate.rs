//! This example demonstrates a full generation cycle:
//! 1. Taking a prompt from the command line (or using the session default).
//! 2. Submitting a generation request and waiting for the image.
//! 3. Saving the result to the current directory.
//!
//! The service base URL is taken from the `API_URL` environment variable and
//! defaults to `http://localhost:8000`.
//!
//! Usage:
//! `cargo run --example generate [PROMPT]`

use qwen_image::{AspectRatio, EnhancementSuffix, GenerationParameters, QwenClient, Session};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Initialize the client from the API_URL environment variable.
    let client = QwenClient::new(None)?;
    let mut session = Session::new(client);

    if let Some(prompt) = env::args().nth(1) {
        session.set_current_prompt(prompt);
    }

    let params = GenerationParameters::new(session.current_prompt())
        .with_steps(50)
        .with_aspect_ratio(AspectRatio::Square);

    println!("Generating image for prompt: '{}'", params.prompt);
    println!("This may take 30-60 seconds...");

    match session.submit(&params, &EnhancementSuffix::default()).await {
        Ok(result) => {
            println!("Generated in {:.1} seconds!", result.elapsed.as_secs_f64());
            println!("Resolution: {}", result.parameters.resolution());
            println!("Seed: {}", result.parameters.seed);

            let path = result.save_to_dir(".").await?;
            println!("Saved to {}", path.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
