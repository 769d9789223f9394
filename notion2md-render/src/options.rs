use serde::{Deserialize, Serialize};

/// How image captions are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptionMode {
    /// Caption becomes the image alt text: `![caption](url)`
    #[serde(rename = "alt")]
    Alt,
    /// Captionless image followed by an emphasized caption line
    #[default]
    #[serde(rename = "em")]
    Emphasis,
    /// Caption is dropped
    #[serde(rename = "none")]
    Omit,
}

impl CaptionMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "alt" => Some(CaptionMode::Alt),
            "em" => Some(CaptionMode::Emphasis),
            "none" => Some(CaptionMode::Omit),
            _ => None,
        }
    }
}

/// Render options resolved once per conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Delimiter joining multi-valued properties (multi-select, people, ...)
    pub list_delimiter: String,

    /// Prefix applied to every line of nested list children
    pub indent_string: String,

    /// Image caption placement
    pub image_caption: CaptionMode,

    /// Characters removed from rendered frontmatter values
    pub strip_meta_chars: String,

    /// Extension of written Markdown files, without the leading dot
    pub extension: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            list_delimiter: ",".to_string(),
            indent_string: "    ".to_string(),
            image_caption: CaptionMode::Emphasis,
            strip_meta_chars: String::new(),
            extension: "md".to_string(),
        }
    }
}
