//! Rich-text spans and their inline annotations.

use super::Node;
use serde::Deserialize;
use serde_json::{Map, Value};

/// An inline style flag carried by a rich-text span.
///
/// [`Annotation::ALL`] is the discovery order used by the balancer. Marks opened
/// by the same span nest so that the later entry ends up outermost, which is
/// why bold + strikethrough renders as `**~~text~~**`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Strikethrough,
    Bold,
    Italic,
    Underline,
    Code,
}

impl Annotation {
    pub const ALL: [Annotation; 5] = [
        Annotation::Strikethrough,
        Annotation::Bold,
        Annotation::Italic,
        Annotation::Underline,
        Annotation::Code,
    ];

    /// The Markdown delimiter emitted on both sides of the marked text
    pub fn delimiter(self) -> &'static str {
        match self {
            Annotation::Strikethrough => "~~",
            Annotation::Bold => "**",
            Annotation::Italic => "*",
            Annotation::Underline => "__",
            Annotation::Code => "`",
        }
    }
}

/// The annotation set attached to a span. `color` is kept but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Annotations {
    pub fn is_set(&self, annotation: Annotation) -> bool {
        match annotation {
            Annotation::Strikethrough => self.strikethrough,
            Annotation::Bold => self.bold,
            Annotation::Italic => self.italic,
            Annotation::Underline => self.underline,
            Annotation::Code => self.code,
        }
    }
}

/// A rich-text span: `text`, `equation` or `mention` payload plus styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Display text as reported by the API, or the text payload when absent
    pub plain_text: String,
    /// Hyperlink target
    pub href: Option<String>,
    pub annotations: Option<Annotations>,
    /// The payload named by the span's `type`
    pub content: Box<Node>,
}

impl Span {
    pub(crate) fn from_map(map: &Map<String, Value>) -> Self {
        let content = map
            .get("type")
            .and_then(Value::as_str)
            .and_then(|kind| map.get(kind))
            .map(Node::from)
            .unwrap_or(Node::Null);

        let plain_text = map
            .get("plain_text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                map.get("text")
                    .and_then(|text| text.get("content"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let href = map
            .get("href")
            .and_then(Value::as_str)
            .filter(|href| !href.is_empty())
            .map(str::to_string);

        let annotations = map
            .get("annotations")
            .filter(|value| value.is_object())
            .and_then(|value| Annotations::deserialize(value).ok());

        Span {
            plain_text,
            href,
            annotations,
            content: Box::new(content),
        }
    }

    /// Whether this span carries `annotation`
    pub fn has(&self, annotation: Annotation) -> bool {
        self.annotations
            .as_ref()
            .is_some_and(|set| set.is_set(annotation))
    }

    /// A lone space or line break. A run of marks is closed before such a span
    /// rather than carried across it.
    pub fn is_trivial(&self) -> bool {
        matches!(self.plain_text.as_str(), " " | "\n")
    }
}
