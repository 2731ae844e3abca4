use std::fs;
use std::time::Duration;

use qwen_image::{AspectRatio, GenerationResult, ResolvedParameters, Seed};

fn sample_result() -> GenerationResult {
    GenerationResult {
        image: b"not really a png".to_vec(),
        prompt: "A cat, Ultra HD, 4K, cinematic composition.".to_string(),
        original_prompt: "A cat".to_string(),
        negative_prompt: String::new(),
        elapsed: Duration::from_secs_f64(12.3),
        timestamp: 1722945600,
        parameters: ResolvedParameters {
            steps: 50,
            cfg_scale: 4.0,
            width: 1328,
            height: 1328,
            aspect_ratio: AspectRatio::Square,
            seed: Seed::Fixed(1234),
        },
    }
}

#[test]
fn test_file_name_format() {
    assert_eq!(sample_result().file_name(), "qwen_image_1722945600.png");
}

#[tokio::test]
async fn test_save_to_dir_writes_image_bytes() {
    let dest_dir = tempfile::tempdir().unwrap();
    let result = sample_result();

    let path = result.save_to_dir(dest_dir.path()).await.unwrap();

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("qwen_image_1722945600.png")
    );
    assert_eq!(fs::read(&path).unwrap(), result.image);
}

#[tokio::test]
async fn test_save_to_dir_creates_missing_directories() {
    let dest_dir = tempfile::tempdir().unwrap();
    let nested = dest_dir.path().join("outputs").join("today");

    let path = sample_result().save_to_dir(&nested).await.unwrap();

    assert!(path.starts_with(&nested));
    assert!(path.exists());
}
