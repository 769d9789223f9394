//! JSON builders for block and rich-text fixtures.

#![allow(dead_code)]

use notion2md_render::{Node, RenderOptions};
use serde_json::{json, Value};

pub fn plain(text: &str) -> Value {
    styled(text, &[])
}

/// A text span with the named annotations set
pub fn styled(text: &str, marks: &[&str]) -> Value {
    let mut annotations = json!({
        "bold": false,
        "italic": false,
        "strikethrough": false,
        "underline": false,
        "code": false,
        "color": "default",
    });
    for mark in marks {
        annotations[*mark] = json!(true);
    }
    json!({
        "type": "text",
        "text": {"content": text, "link": null},
        "annotations": annotations,
        "plain_text": text,
        "href": null,
    })
}

pub fn link(text: &str, url: &str) -> Value {
    json!({
        "type": "text",
        "text": {"content": text, "link": {"url": url}},
        "annotations": {"bold": false, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "default"},
        "plain_text": text,
        "href": url,
    })
}

/// A block of `kind` whose payload is `payload`
pub fn block(kind: &str, payload: Value, children: Vec<Value>) -> Value {
    let mut value = json!({
        "object": "block",
        "id": format!("{kind}-0000"),
        "type": kind,
        "has_children": !children.is_empty(),
        "children": children,
    });
    value[kind] = payload;
    value
}

/// A block whose payload is just `rich_text`
pub fn text_block(kind: &str, spans: Vec<Value>, children: Vec<Value>) -> Value {
    block(kind, json!({"rich_text": spans}), children)
}

pub fn paragraph(text: &str) -> Value {
    text_block("paragraph", vec![plain(text)], vec![])
}

pub fn bullet(text: &str, children: Vec<Value>) -> Value {
    text_block("bulleted_list_item", vec![plain(text)], children)
}

pub fn numbered(text: &str, children: Vec<Value>) -> Value {
    text_block("numbered_list_item", vec![plain(text)], children)
}

pub fn table_row(cells: &[&str]) -> Value {
    let cells: Vec<Value> = cells.iter().map(|cell| json!([plain(cell)])).collect();
    block("table_row", json!({"cells": cells}), vec![])
}

pub fn table(rows: Vec<Value>) -> Value {
    let width = rows
        .first()
        .and_then(|row| row["table_row"]["cells"].as_array())
        .map_or(0, Vec::len);
    block(
        "table",
        json!({"table_width": width, "has_column_header": true, "has_row_header": false}),
        rows,
    )
}

pub fn nodes(blocks: &[Value]) -> Vec<Node> {
    blocks.iter().map(Node::from).collect()
}

pub fn options() -> RenderOptions {
    RenderOptions::default()
}
