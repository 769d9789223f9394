//! Property rendering for frontmatter

use crate::common::*;
use notion2md_render::{Metadata, Page, RenderOptions};
use serde_json::{json, Value};

fn metadata_with(options: &RenderOptions, properties: Value) -> Metadata {
    let page: Page = serde_json::from_value(json!({"id": "p", "properties": properties})).unwrap();
    Metadata::from_page(&page, options).unwrap()
}

fn metadata(properties: Value) -> Metadata {
    metadata_with(&options(), properties)
}

#[test]
fn test_property_types() {
    let metadata = metadata(json!({
        "Title": {"id": "title", "type": "title", "title": [plain("Post")]},
        "Summary": {"type": "rich_text", "rich_text": [plain("Short "), plain("text")]},
        "Status": {"type": "select", "select": {"id": "s1", "name": "Published", "color": "green"}},
        "Authors": {"type": "people", "people": [
            {"object": "user", "id": "u-1", "name": "Ann", "type": "person", "person": {}},
            {"object": "user", "id": "u-2", "name": "Bo", "type": "person", "person": {}},
        ]},
        "Url": {"type": "url", "url": "https://example.com"},
        "Score": {"type": "number", "number": 4.5},
        "Range": {"type": "date", "date": {"start": "2024-03-01", "end": "2024-03-04"}},
        "Related": {"type": "relation", "relation": [{"id": "aaaa-bbbb"}]},
        "Formula": {"type": "formula", "formula": {"type": "string", "string": "computed"}},
    }));

    let entries: Vec<_> = metadata.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("Title", "Post"),
            ("Summary", "Short text"),
            ("Status", "Published"),
            ("Authors", "Ann,Bo"),
            ("Url", "https://example.com"),
            ("Score", "4.5"),
            ("Range", "Mar 1, 2024 → Mar 4, 2024"),
            ("Related", "aaaabbbb"),
            ("Formula", "computed"),
        ]
    );
    assert_eq!(metadata.title(), Some("Post"));
}

#[test]
fn test_custom_list_delimiter() {
    let options = RenderOptions {
        list_delimiter: ", ".to_string(),
        ..RenderOptions::default()
    };
    let metadata = metadata_with(
        &options,
        json!({"Tags": {"type": "multi_select", "multi_select": [{"name": "a"}, {"name": "b"}]}}),
    );
    assert_eq!(metadata.get("Tags"), Some("a, b"));
}

#[test]
fn test_datetime_is_kept_raw() {
    let metadata = metadata(json!({
        "When": {"type": "date", "date": {"start": "2024-03-01T10:00:00.000+00:00", "end": null}},
    }));
    assert_eq!(metadata.get("When"), Some("2024-03-01T10:00:00.000+00:00"));
}

#[test]
fn test_empty_properties_are_omitted() {
    let metadata = metadata(json!({
        "Blank": {"type": "rich_text", "rich_text": []},
        "None": {"type": "select", "select": null},
        "NoPeople": {"type": "people", "people": []},
    }));
    assert!(metadata.is_empty());
    assert_eq!(metadata.to_frontmatter(), "");
}

#[test]
fn test_annotated_title_keeps_marks() {
    let metadata = metadata(json!({
        "Name": {"type": "title", "title": [plain("A "), styled("bold", &["bold"]), plain(" title")]},
    }));
    assert_eq!(metadata.title(), Some("A **bold** title"));
}
