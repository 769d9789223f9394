//! Block renderers through the public assembler

use crate::common::*;
use notion2md_render::{CaptionMode, Converter, RenderOptions};
use proptest::prelude::*;
use serde_json::{json, Value};

fn render_with(options: &RenderOptions, blocks: &[Value]) -> String {
    Converter::new(options)
        .render_blocks(&nodes(blocks))
        .expect("blocks render")
}

fn render(blocks: &[Value]) -> String {
    render_with(&options(), blocks)
}

#[test]
fn test_heading_two() {
    let heading = text_block("heading_2", vec![plain("Title")], vec![]);
    assert_eq!(render(&[heading]), "## Title\n");
}

#[test]
fn test_all_heading_levels() {
    for level in 1..=6 {
        let heading = text_block(&format!("heading_{level}"), vec![plain("H")], vec![]);
        assert_eq!(render(&[heading]), format!("{} H\n", "#".repeat(level)));
    }
}

#[test]
fn test_bulleted_item_with_numbered_child() {
    let text = render(&[bullet("parent", vec![numbered("child", vec![])])]);
    assert_eq!(text, "- parent\n    1. child\n");
}

#[test]
fn test_three_levels_of_nesting() {
    let text = render(&[bullet(
        "a",
        vec![bullet("b", vec![bullet("c", vec![])])],
    )]);
    assert_eq!(text, "- a\n    - b\n        - c\n");
}

#[test]
fn test_numbered_children_count_independently() {
    let text = render(&[
        numbered("one", vec![numbered("inner one", vec![]), numbered("inner two", vec![])]),
        numbered("two", vec![]),
    ]);
    assert_eq!(
        text,
        "1. one\n    1. inner one\n    2. inner two\n2. two\n"
    );
}

#[test]
fn test_to_do_children_are_nested() {
    let todo = block(
        "to_do",
        json!({"rich_text": [plain("ship it")], "checked": true}),
        vec![paragraph("notes")],
    );
    assert_eq!(render(&[todo]), "- [x] ship it\n    notes\n");
}

#[test]
fn test_list_child_paragraphs_keep_blank_lines_unindented() {
    let text = render(&[bullet("item", vec![paragraph("a"), paragraph("b")])]);
    assert_eq!(text, "- item\n    a\n\n    b\n");
}

#[test]
fn test_callout_with_children() {
    let callout = block(
        "callout",
        json!({
            "rich_text": [plain("Heads up")],
            "icon": {"type": "emoji", "emoji": "💡"},
        }),
        vec![bullet("first", vec![]), bullet("second", vec![])],
    );
    assert_eq!(
        render(&[callout]),
        "> 💡\n> Heads up\n>\n> - first\n> - second\n"
    );
}

#[test]
fn test_quote_with_multiline_text() {
    let quote = text_block("quote", vec![plain("one\ntwo")], vec![]);
    assert_eq!(render(&[quote]), "> one\n> two\n");
}

#[test]
fn test_table_line_count() {
    let table = table(vec![
        table_row(&["Name", "Qty", "Note"]),
        table_row(&["apple", "3", ""]),
        table_row(&["pear", "1", "ripe"]),
    ]);
    let text = render(&[table]);
    assert_eq!(
        text,
        "|Name|Qty|Note|\n|---|---|---|\n|apple|3||\n|pear|1|ripe|\n"
    );
}

#[test]
fn test_table_cells_keep_annotations() {
    let row = block(
        "table_row",
        json!({"cells": [[styled("bold", &["bold"])], [plain("x")]]}),
        vec![],
    );
    let text = render(&[table(vec![row])]);
    assert_eq!(text, "|**bold**|x|\n|---|---|\n");
}

#[test]
fn test_toggle_with_list() {
    let toggle = text_block("toggle", vec![plain("Details")], vec![bullet("hidden", vec![])]);
    assert_eq!(
        render(&[toggle]),
        "<details>\n<summary>Details</summary>\n\n- hidden\n\n</details>\n"
    );
}

#[test]
fn test_image_alt_caption() {
    let image = block(
        "image",
        json!({
            "type": "file",
            "file": {"url": "https://files/cat.png", "expiry_time": "2024-01-01T00:00:00.000Z"},
            "caption": [styled("A cat", &["italic"])],
        }),
        vec![],
    );
    let options = RenderOptions {
        image_caption: CaptionMode::Alt,
        ..RenderOptions::default()
    };
    assert_eq!(render_with(&options, &[image]), "![A cat](https://files/cat.png)\n");
}

#[test]
fn test_code_block_with_backticks() {
    let code = block(
        "code",
        json!({"rich_text": [plain("echo ```nested```")], "language": "shell"}),
        vec![],
    );
    assert_eq!(render(&[code]), "````shell\necho ```nested```\n````\n");
}

proptest! {
    #[test]
    fn prop_table_has_rows_plus_two_lines(width in 1usize..6, rows in 0usize..8) {
        let header: Vec<String> = (0..width).map(|i| format!("h{i}")).collect();
        let header: Vec<&str> = header.iter().map(String::as_str).collect();
        let mut children = vec![table_row(&header)];
        for _ in 0..rows {
            children.push(table_row(&vec!["c"; width]));
        }

        let text = render(&[table(children)]);
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), rows + 2);
        prop_assert_eq!(lines[1].matches("---").count(), width);
    }
}
