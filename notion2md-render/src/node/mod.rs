//! The source tree as a closed union of node shapes.
//!
//!     Values handed over by the fetch layer are untyped JSON. [`Node::from`] classifies
//!     each value once, testing shapes in the same priority order the renderer uses:
//!
//!     | #  | Shape                                        | Variant                  |
//!     |----|----------------------------------------------|--------------------------|
//!     | 1  | array                                        | `Sequence`               |
//!     | 2  | mapping with a non-empty `href`              | `Span` (rendered as link)|
//!     | 3  | mapping with `type` and `annotations`        | `Span`                   |
//!     | 4  | mapping with a string `start`                | `Date`                   |
//!     | 5  | mapping with `object: block`/`has_children`  | `Block`                  |
//!     | 5  | mapping with a string `expression`           | `Equation` (inline)      |
//!     | 6  | mapping with a string `type`                 | `Typed`                  |
//!     | 7  | mapping with `name` or `content`             | `Field`                  |
//!     | 7  | mapping with a string `id`                   | `Identifier`             |
//!     | 8  | mapping with `text.content`                  | `Content`                |
//!     | 9  | string / number / boolean                    | `Text` / `Scalar`        |
//!     | 10 | null                                         | `Null`                   |
//!     |    | anything else                                | `Opaque`                 |
//!
//!     Several shapes overlap (a span also has a `type`, a block also has an `id`), so
//!     the order is load-bearing; `tests::classification_order` pins it down.
//!
//!     A `type` whose payload is missing or opaque does not classify as `Typed`; the
//!     mapping falls through to rule 7 so user objects still render by `name`.

mod block;
mod page;
mod span;

pub use block::{Block, BlockKind};
pub use page::Page;
pub use span::{Annotation, Annotations, Span};

use serde_json::{Map, Value};

/// A classified node of the source tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Sequence(Vec<Node>),
    Span(Span),
    Date(DateRange),
    Block(Block),
    /// Inline equation payload
    Equation(String),
    /// A mapping unwrapped through its `type` discriminant
    Typed {
        kind: String,
        payload: Box<Node>,
    },
    /// A mapping rendered through its `name` or `content` field
    Field(Box<Node>),
    /// A hyphen-stripped object identifier
    Identifier(String),
    /// A literal `text.content`
    Content(String),
    Text(String),
    /// A number or boolean, already in textual form
    Scalar(String),
    Null,
    /// An unrecognized leaf shape; renders as empty text
    Opaque,
}

/// A date property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

/// Strips hyphens from an API identifier
pub fn normalize_id(id: &str) -> String {
    id.replace('-', "")
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::String(text) => Node::Text(text.clone()),
            Value::Bool(flag) => Node::Scalar(flag.to_string()),
            Value::Number(number) => Node::Scalar(number.to_string()),
            Value::Array(items) => Node::Sequence(items.iter().map(Node::from).collect()),
            Value::Object(map) => classify_map(map),
        }
    }
}

fn classify_map(map: &Map<String, Value>) -> Node {
    let has_href = map
        .get("href")
        .and_then(Value::as_str)
        .is_some_and(|href| !href.is_empty());
    let is_annotated =
        map.contains_key("type") && map.get("annotations").is_some_and(Value::is_object);
    if has_href || is_annotated {
        return Node::Span(Span::from_map(map));
    }

    if let Some(start) = map.get("start").and_then(Value::as_str) {
        return Node::Date(DateRange {
            start: start.to_string(),
            end: map
                .get("end")
                .and_then(Value::as_str)
                .filter(|end| !end.is_empty())
                .map(str::to_string),
        });
    }

    let is_block = map.get("object").and_then(Value::as_str) == Some("block")
        || map.contains_key("has_children");
    if is_block {
        return Node::Block(Block::from_map(map));
    }

    if let Some(expression) = map.get("expression").and_then(Value::as_str) {
        return Node::Equation(expression.to_string());
    }

    if let Some(kind) = map.get("type").and_then(Value::as_str) {
        let payload = map.get(kind).map(Node::from).unwrap_or(Node::Opaque);
        if payload != Node::Opaque {
            return Node::Typed {
                kind: kind.to_string(),
                payload: Box::new(payload),
            };
        }
    }

    for key in ["name", "content"] {
        if let Some(field) = map.get(key) {
            return Node::Field(Box::new(Node::from(field)));
        }
    }
    if let Some(id) = map.get("id").and_then(Value::as_str) {
        return Node::Identifier(normalize_id(id));
    }

    if let Some(content) = map
        .get("text")
        .and_then(|text| text.get("content"))
        .and_then(Value::as_str)
    {
        return Node::Content(content.to_string());
    }

    Node::Opaque
}

impl Node {
    /// The discriminant used for separators and error reports
    pub fn kind(&self) -> &str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::Span(_) => "rich_text",
            Node::Date(_) => "date",
            Node::Block(block) => block.kind.name(),
            Node::Equation(_) => "equation",
            Node::Typed { kind, .. } => kind,
            Node::Field(_) => "field",
            Node::Identifier(_) => "id",
            Node::Content(_) | Node::Text(_) => "text",
            Node::Scalar(_) => "scalar",
            Node::Null => "null",
            Node::Opaque => "opaque",
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_span(&self) -> Option<&Span> {
        match self {
            Node::Span(span) => Some(span),
            _ => None,
        }
    }

    /// Whether this node continues a run of `annotation`.
    ///
    /// Trivial whitespace spans never continue a run, so the previous span closes
    /// its marks instead of leaving them to a span that cannot hold them.
    pub fn carries(&self, annotation: Annotation) -> bool {
        self.as_span()
            .is_some_and(|span| !span.is_trivial() && span.has(annotation))
    }

    /// Unstyled text of a leaf, used where Markdown marks must not appear
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            Node::Span(span) => Some(&span.plain_text),
            Node::Text(text) | Node::Content(text) | Node::Scalar(text) => Some(text),
            Node::Equation(expression) => Some(expression),
            _ => None,
        }
    }
}
