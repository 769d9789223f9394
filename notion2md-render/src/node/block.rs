//! Structural blocks.
//!
//! A block arrives as `{"object": "block", "type": "<kind>", "<kind>": {payload},
//! "has_children": bool, "children": [...]}`. The payload is read into the
//! matching [`BlockKind`] variant; kinds without a renderer are kept as
//! [`BlockKind::Unsupported`] so the assembler can report them by name.

use super::Node;
use serde_json::{Map, Value};

/// A block node with its pre-fetched children
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub has_children: bool,
    pub children: Vec<Node>,
    pub kind: BlockKind,
}

/// The closed set of block kinds the engine knows how to render
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading { level: u8, text: Vec<Node> },
    Paragraph { text: Vec<Node> },
    BulletedListItem { text: Vec<Node> },
    NumberedListItem { text: Vec<Node> },
    Quote { text: Vec<Node> },
    Callout { icon: Box<Node>, text: Vec<Node> },
    ToDo { checked: bool, text: Vec<Node> },
    Code { language: String, text: Vec<Node> },
    Table,
    TableRow { cells: Vec<Vec<Node>> },
    Toggle { text: Vec<Node> },
    Image { url: String, caption: Vec<Node> },
    Bookmark { url: String, caption: Vec<Node> },
    Divider,
    Equation { expression: String },
    /// A kind with no renderer, keeping the raw discriminant
    Unsupported(String),
}

impl BlockKind {
    /// The API discriminant for this kind (`heading_2`, `to_do`, ...)
    pub fn name(&self) -> &str {
        match self {
            BlockKind::Heading { level, .. } => match level {
                1 => "heading_1",
                2 => "heading_2",
                3 => "heading_3",
                4 => "heading_4",
                5 => "heading_5",
                _ => "heading_6",
            },
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Callout { .. } => "callout",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Code { .. } => "code",
            BlockKind::Table => "table",
            BlockKind::TableRow { .. } => "table_row",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Image { .. } => "image",
            BlockKind::Bookmark { .. } => "bookmark",
            BlockKind::Divider => "divider",
            BlockKind::Equation { .. } => "equation",
            BlockKind::Unsupported(kind) => kind,
        }
    }

    /// Kinds whose same-kind runs are rendered without blank lines between them
    pub fn is_tight(&self) -> bool {
        matches!(
            self,
            BlockKind::BulletedListItem { .. }
                | BlockKind::NumberedListItem { .. }
                | BlockKind::ToDo { .. }
                | BlockKind::TableRow { .. }
        )
    }
}

impl Block {
    pub(crate) fn from_map(map: &Map<String, Value>) -> Self {
        let kind_name = map.get("type").and_then(Value::as_str).unwrap_or_default();
        let empty = Map::new();
        let payload = map
            .get(kind_name)
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let children: Vec<Node> = map
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.iter().map(Node::from).collect())
            .unwrap_or_default();
        let has_children = map
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(!children.is_empty());

        Block {
            id: map
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            has_children,
            children,
            kind: read_kind(kind_name, payload),
        }
    }

    /// Children to render; empty unless `has_children` is set
    pub fn child_nodes(&self) -> &[Node] {
        if self.has_children {
            &self.children
        } else {
            &[]
        }
    }
}

fn read_kind(kind: &str, payload: &Map<String, Value>) -> BlockKind {
    if let Some(level) = heading_level(kind) {
        return BlockKind::Heading {
            level,
            text: rich_text(payload, "rich_text"),
        };
    }

    match kind {
        "paragraph" => BlockKind::Paragraph {
            text: rich_text(payload, "rich_text"),
        },
        "bulleted_list_item" => BlockKind::BulletedListItem {
            text: rich_text(payload, "rich_text"),
        },
        "numbered_list_item" => BlockKind::NumberedListItem {
            text: rich_text(payload, "rich_text"),
        },
        "quote" => BlockKind::Quote {
            text: rich_text(payload, "rich_text"),
        },
        "callout" => BlockKind::Callout {
            icon: Box::new(payload.get("icon").map(Node::from).unwrap_or(Node::Null)),
            text: rich_text(payload, "rich_text"),
        },
        "to_do" => BlockKind::ToDo {
            checked: payload
                .get("checked")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            text: rich_text(payload, "rich_text"),
        },
        "code" => BlockKind::Code {
            language: string_field(payload, "language"),
            text: rich_text(payload, "rich_text"),
        },
        "table" => BlockKind::Table,
        "table_row" => BlockKind::TableRow {
            cells: payload
                .get("cells")
                .and_then(Value::as_array)
                .map(|cells| {
                    cells
                        .iter()
                        .map(|cell| match cell {
                            Value::Array(spans) => spans.iter().map(Node::from).collect(),
                            Value::Null => Vec::new(),
                            other => vec![Node::from(other)],
                        })
                        .collect()
                })
                .unwrap_or_default(),
        },
        "toggle" => BlockKind::Toggle {
            text: rich_text(payload, "rich_text"),
        },
        "image" => BlockKind::Image {
            url: file_url(payload),
            caption: rich_text(payload, "caption"),
        },
        "bookmark" => BlockKind::Bookmark {
            url: string_field(payload, "url"),
            caption: rich_text(payload, "caption"),
        },
        "divider" => BlockKind::Divider,
        "equation" => BlockKind::Equation {
            expression: string_field(payload, "expression"),
        },
        other => BlockKind::Unsupported(other.to_string()),
    }
}

fn heading_level(kind: &str) -> Option<u8> {
    kind.strip_prefix("heading_")
        .and_then(|level| level.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}

fn rich_text(payload: &Map<String, Value>, key: &str) -> Vec<Node> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|spans| spans.iter().map(Node::from).collect())
        .unwrap_or_default()
}

fn string_field(payload: &Map<String, Value>, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Files are either `{"type": "external", "external": {"url"}}` or
// `{"type": "file", "file": {"url", "expiry_time"}}`.
fn file_url(payload: &Map<String, Value>) -> String {
    payload
        .get("type")
        .and_then(Value::as_str)
        .and_then(|source| payload.get(source))
        .and_then(|file| file.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
