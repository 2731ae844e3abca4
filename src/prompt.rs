//! Prompt enhancement.
//!
//! The service produces noticeably better output when the prompt ends with a
//! short quality suffix. The suffix is language-specific; callers can also
//! supply their own.

/// Quality suffix appended to English prompts.
pub const ENGLISH_SUFFIX: &str = ", Ultra HD, 4K, cinematic composition.";

/// Quality suffix appended to Chinese prompts.
pub const CHINESE_SUFFIX: &str = ", 超清，4K，电影级构图.";

/// The built-in, language-based quality suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enhancement {
    /// Append [`ENGLISH_SUFFIX`].
    #[default]
    English,
    /// Append [`CHINESE_SUFFIX`].
    Chinese,
    /// Submit the prompt as written.
    None,
}

impl Enhancement {
    /// The suffix text for this choice.
    pub fn suffix(self) -> &'static str {
        match self {
            Enhancement::English => ENGLISH_SUFFIX,
            Enhancement::Chinese => CHINESE_SUFFIX,
            Enhancement::None => "",
        }
    }
}

/// A language-based suffix plus an optional custom override.
///
/// A non-empty `custom` string always wins over the language choice. The
/// resolved suffix is folded into the prompt by plain concatenation; it is
/// not persisted separately.
#[derive(Debug, Clone, Default)]
pub struct EnhancementSuffix {
    /// The language-based suffix choice.
    pub language: Enhancement,
    /// Free-form override. Empty means "use the language suffix".
    pub custom: String,
}

impl EnhancementSuffix {
    /// A suffix with no custom override.
    pub fn new(language: Enhancement) -> Self {
        Self {
            language,
            custom: String::new(),
        }
    }

    /// A custom suffix, overriding any language choice.
    pub fn custom(text: impl Into<String>) -> Self {
        Self {
            language: Enhancement::None,
            custom: text.into(),
        }
    }

    /// The suffix that will actually be appended.
    pub fn resolve(&self) -> &str {
        if self.custom.is_empty() {
            self.language.suffix()
        } else {
            &self.custom
        }
    }

    /// Appends the resolved suffix to `prompt`. An empty suffix is a no-op.
    pub fn apply(&self, prompt: &str) -> String {
        let suffix = self.resolve();
        if suffix.is_empty() {
            prompt.to_string()
        } else {
            format!("{}{}", prompt, suffix)
        }
    }
}

/// Prompts that show off the model's text-rendering strengths. Intended as
/// one-click starting points for a driving UI.
pub const EXAMPLE_PROMPTS: [&str; 7] = [
    "A coffee shop entrance features a chalkboard sign reading \"Qwen Coffee 😊 $2 per cup,\" with a neon light beside it displaying \"通义千问\"",
    "A beautiful Chinese woman holding a marker with text '人工智能' written on a whiteboard behind her",
    "A street scene with a shop sign displaying both English 'WELCOME' and Chinese '欢迎光临' in neon lights",
    "A book cover with the title 'AI Revolution' in elegant typography, with Chinese subtitle '人工智能革命'",
    "A vintage poster showing '1984' in bold letters with Chinese characters '一九八四' underneath",
    "A modern office building with a large LED display showing 'INNOVATION 创新' in glowing letters",
    "A traditional Chinese restaurant with a wooden sign reading '老北京饭店 Beijing Restaurant' in calligraphy",
];
