use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::QwenError;

/// Lower bound for the inference step count.
pub const MIN_INFERENCE_STEPS: u32 = 10;
/// Upper bound for the inference step count.
pub const MAX_INFERENCE_STEPS: u32 = 100;
/// Lower bound for the classifier-free-guidance scale.
pub const MIN_CFG_SCALE: f64 = 1.0;
/// Upper bound for the classifier-free-guidance scale.
pub const MAX_CFG_SCALE: f64 = 10.0;

/// The fixed output resolutions supported by the service, by aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 1328 × 1328
    #[default]
    Square,
    /// 1664 × 928
    Landscape,
    /// 928 × 1664
    Portrait,
    /// 1472 × 1140
    Photo,
    /// 1140 × 1472
    PortraitPhoto,
    /// 1584 × 1056
    Wide,
    /// 1056 × 1584
    Tall,
}

impl AspectRatio {
    /// All supported ratios, in the order a selection UI should offer them.
    pub const ALL: [AspectRatio; 7] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Photo,
        AspectRatio::PortraitPhoto,
        AspectRatio::Wide,
        AspectRatio::Tall,
    ];

    /// The output resolution as `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1328, 1328),
            AspectRatio::Landscape => (1664, 928),
            AspectRatio::Portrait => (928, 1664),
            AspectRatio::Photo => (1472, 1140),
            AspectRatio::PortraitPhoto => (1140, 1472),
            AspectRatio::Wide => (1584, 1056),
            AspectRatio::Tall => (1056, 1584),
        }
    }

    /// A human-readable label for the ratio.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Landscape => "Landscape (16:9)",
            AspectRatio::Portrait => "Portrait (9:16)",
            AspectRatio::Photo => "Photo (4:3)",
            AspectRatio::PortraitPhoto => "Portrait Photo (3:4)",
            AspectRatio::Wide => "Wide (3:2)",
            AspectRatio::Tall => "Tall (2:3)",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Controls determinism of the generation.
///
/// `Random` asks the service to pick a seed; the seed it actually used is
/// reported back in [`GenerationResult`]. On the wire `Random` is the
/// sentinel value `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seed {
    /// Let the service pick a fresh seed for each generation.
    #[default]
    Random,
    /// A fixed seed for reproducible results.
    Fixed(u32),
}

impl Seed {
    /// The integer representation the service expects.
    pub fn to_wire(self) -> i64 {
        match self {
            Seed::Random => -1,
            Seed::Fixed(value) => i64::from(value),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_wire())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Random => f.write_str("random"),
            Seed::Fixed(value) => write!(f, "{}", value),
        }
    }
}

/// The full parameter set for one generation request.
///
/// Defaults match the service's recommended settings: 50 inference steps,
/// CFG scale 4.0, square output and a random seed.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    /// The text description of the image to generate.
    pub prompt: String,
    /// What should not appear in the image. Blank means "use the service default".
    pub negative_prompt: String,
    /// Number of denoising steps. More steps trade speed for quality.
    pub num_inference_steps: u32,
    /// The output resolution preset.
    pub aspect_ratio: AspectRatio,
    /// How closely the model follows the prompt.
    pub true_cfg_scale: f64,
    /// Seed selection for this request.
    pub seed: Seed,
}

impl GenerationParameters {
    /// Creates a parameter set for `prompt` with default settings.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: String::new(),
            num_inference_steps: 50,
            aspect_ratio: AspectRatio::default(),
            true_cfg_scale: 4.0,
            seed: Seed::default(),
        }
    }

    /// Sets the negative prompt.
    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    /// Sets the inference step count, clamped to `[10, 100]`.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.num_inference_steps = steps.clamp(MIN_INFERENCE_STEPS, MAX_INFERENCE_STEPS);
        self
    }

    /// Sets the output resolution preset.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Sets the CFG scale, clamped to `[1.0, 10.0]`.
    pub fn with_cfg_scale(mut self, cfg_scale: f64) -> Self {
        self.true_cfg_scale = cfg_scale.clamp(MIN_CFG_SCALE, MAX_CFG_SCALE);
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the local precondition: the prompt must not be blank.
    pub fn validate(&self) -> Result<(), QwenError> {
        if self.prompt.trim().is_empty() {
            return Err(QwenError::EmptyPrompt);
        }
        Ok(())
    }

    /// The negative prompt as it must cross the wire.
    ///
    /// The service treats an empty string as malformed; a blank negative
    /// prompt is sent as a single space instead.
    pub(crate) fn wire_negative_prompt(&self) -> &str {
        if self.negative_prompt.trim().is_empty() {
            " "
        } else {
            &self.negative_prompt
        }
    }
}

/// A private struct for serializing the generation request body.
#[derive(Serialize, Debug)]
pub(crate) struct GenerateRequest<'a> {
    pub(crate) prompt: &'a str,
    pub(crate) negative_prompt: &'a str,
    pub(crate) num_inference_steps: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) true_cfg_scale: f64,
    pub(crate) seed: Seed,
}

/// (Internal) The response body of a successful generation call.
#[derive(Deserialize, Debug)]
pub(crate) struct GenerateResponse {
    /// The generated image, base64-encoded.
    pub(crate) image_base64: String,
    /// The seed the service actually used. Older service builds omit it.
    #[serde(default)]
    pub(crate) seed_used: Option<i64>,
}

/// The parameter set a result was actually produced with.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    /// Inference step count.
    pub steps: u32,
    /// CFG scale.
    pub cfg_scale: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// The resolution preset the dimensions were derived from.
    pub aspect_ratio: AspectRatio,
    /// The seed that produced the image. Stays `Random` only if the service
    /// never reported which seed it picked.
    pub seed: Seed,
}

impl ResolvedParameters {
    /// The output resolution formatted as `{width}x{height}`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// A successfully generated image together with its metadata.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The decoded image bytes (PNG).
    pub image: Vec<u8>,
    /// The prompt actually sent, with any enhancement suffix applied.
    pub prompt: String,
    /// The prompt as the caller wrote it.
    pub original_prompt: String,
    /// The negative prompt as the caller wrote it.
    pub negative_prompt: String,
    /// Wall-clock time the generation took.
    pub elapsed: Duration,
    /// Unix timestamp of when the result was received.
    pub timestamp: i64,
    /// The resolved parameter set, including the seed actually used.
    pub parameters: ResolvedParameters,
}

impl GenerationResult {
    /// The file name the image is saved under: `qwen_image_{unix_timestamp}.png`.
    pub fn file_name(&self) -> String {
        format!("qwen_image_{}.png", self.timestamp)
    }

    /// Writes the image to `dest_dir`, creating the directory if needed.
    ///
    /// # Returns
    ///
    /// The path of the newly written file.
    ///
    /// # Errors
    ///
    /// Returns [`QwenError::Io`] if the directory or file cannot be created
    /// or written.
    pub async fn save_to_dir<P: AsRef<Path>>(&self, dest_dir: P) -> Result<PathBuf, QwenError> {
        fs::create_dir_all(dest_dir.as_ref()).await?;

        let file_path = dest_dir.as_ref().join(self.file_name());
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(&self.image).await?;

        Ok(file_path)
    }
}

/// The service's health report.
#[derive(Debug, Deserialize, Clone)]
pub struct HealthStatus {
    /// GPU details, when the service chooses to report them.
    #[serde(default)]
    pub gpu_info: Option<GpuInfo>,
}

/// GPU details reported by the health endpoint. Every field is optional on
/// the wire; absent fields are omitted from display, not errors.
#[derive(Debug, Deserialize, Clone)]
pub struct GpuInfo {
    /// Number of GPUs available to the service.
    #[serde(default)]
    pub gpu_count: Option<u32>,
    /// Per-GPU memory descriptions, e.g. `"24.0 GB"`.
    #[serde(default)]
    pub gpu_memory: Vec<String>,
}

/// Builds the wire payload for a request.
pub(crate) fn build_request<'a>(
    params: &'a GenerationParameters,
    enhanced_prompt: &'a str,
) -> GenerateRequest<'a> {
    let (width, height) = params.aspect_ratio.dimensions();
    GenerateRequest {
        prompt: enhanced_prompt,
        negative_prompt: params.wire_negative_prompt(),
        num_inference_steps: params.num_inference_steps,
        width,
        height,
        true_cfg_scale: params.true_cfg_scale,
        seed: params.seed,
    }
}
