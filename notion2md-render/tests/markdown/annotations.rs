//! Inline annotation balancing

use crate::common::*;
use notion2md_render::{Converter, Node};
use proptest::prelude::*;
use regex::Regex;
use serde_json::{json, Value};

fn render_run(spans: Vec<Value>) -> String {
    let options = options();
    Converter::new(&options)
        .render_leaf(&Node::from(&Value::Array(spans)))
        .expect("rich text renders")
}

#[test]
fn test_documented_examples() {
    let bold = styled("hello", &["bold"]);
    let bold_strike = styled("hello", &["bold", "strikethrough"]);
    let strike = styled("hello", &["strikethrough"]);

    assert_eq!(render_run(vec![bold.clone()]), "**hello**");
    assert_eq!(render_run(vec![bold_strike.clone()]), "**~~hello~~**");
    assert_eq!(render_run(vec![bold, bold_strike.clone()]), "**hello~~hello~~**");
    assert_eq!(render_run(vec![strike, bold_strike]), "~~hello**hello**~~");
}

#[test]
fn test_run_shares_one_pair_of_delimiters() {
    let text = render_run(vec![
        styled("one ", &["italic"]),
        styled("two ", &["italic"]),
        styled("three", &["italic"]),
    ]);
    assert_eq!(text, "*one two three*");
}

#[test]
fn test_each_mark_has_its_delimiter() {
    for (mark, expected) in [
        ("bold", "**x**"),
        ("italic", "*x*"),
        ("strikethrough", "~~x~~"),
        ("underline", "__x__"),
        ("code", "`x`"),
    ] {
        assert_eq!(render_run(vec![styled("x", &[mark])]), expected, "for {mark}");
    }
}

#[test]
fn test_color_is_ignored() {
    let mut span = plain("red");
    span["annotations"]["color"] = json!("red_background");
    assert_eq!(render_run(vec![span]), "red");
}

#[test]
fn test_plain_links_and_styled_links() {
    assert_eq!(
        render_run(vec![plain("see "), link("docs", "https://example.com")]),
        "see [docs](https://example.com)"
    );

    let mut bold_link = link("docs", "https://example.com");
    bold_link["annotations"]["bold"] = json!(true);
    assert_eq!(render_run(vec![bold_link]), "**[docs](https://example.com)**");
}

#[test]
fn test_line_break_span_closes_run() {
    let text = render_run(vec![
        styled("first", &["bold"]),
        styled("\n", &["bold"]),
        styled("second", &["bold"]),
    ]);
    assert_eq!(text, "**first**\n**second**");
}

#[test]
fn test_blank_spans_stay_inside_run() {
    let empty = render_run(vec![
        styled("a", &["bold"]),
        styled("", &["bold"]),
        styled("b", &["bold"]),
    ]);
    assert_eq!(empty, "**ab**");

    let tab = render_run(vec![
        styled("a", &["bold"]),
        styled("\t", &["bold"]),
        styled("b", &["bold"]),
    ]);
    assert_eq!(tab, "**a\tb**");
}

#[test]
fn test_space_span_splits_run() {
    let text = render_run(vec![
        styled("a", &["bold"]),
        styled(" ", &["bold"]),
        styled("b", &["bold"]),
    ]);
    assert_eq!(text, "**a** **b**");
}

#[test]
fn test_paragraph_run_in_block() {
    let options = options();
    let block = text_block(
        "paragraph",
        vec![plain("a "), styled("b", &["code"]), plain(" c")],
        vec![],
    );
    let text = Converter::new(&options)
        .render_blocks(&nodes(&[block]))
        .unwrap();
    assert_eq!(text, "a `b` c\n");
}

#[test]
fn test_state_does_not_leak_between_blocks() {
    let options = options();
    let blocks = [
        text_block("paragraph", vec![styled("one", &["bold"])], vec![]),
        text_block("paragraph", vec![styled("two", &["bold"])], vec![]),
    ];
    let text = Converter::new(&options)
        .render_blocks(&nodes(&blocks))
        .unwrap();
    assert_eq!(text, "**one**\n\n**two**\n");
}

const MARKS: [&str; 4] = ["strikethrough", "bold", "underline", "code"];

fn delimiter(mark: &str) -> &'static str {
    match mark {
        "strikethrough" => "~~",
        "bold" => "**",
        "underline" => "__",
        _ => "`",
    }
}

/// Reads delimiters left to right and checks they close in reverse opening order
fn is_well_nested(text: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let token = MARKS
            .iter()
            .map(|mark| delimiter(mark))
            .find(|delimiter| rest.starts_with(*delimiter));
        match token {
            Some(token) => {
                if stack.last() == Some(&token) {
                    stack.pop();
                } else if stack.contains(&token) {
                    return false;
                } else {
                    stack.push(token);
                }
                rest = &rest[token.len()..];
            }
            None => rest = &rest[c.len_utf8()..],
        }
    }
    stack.is_empty()
}

fn span_strategy() -> impl Strategy<Value = (String, Vec<bool>)> {
    ("[a-z]{1,6}", proptest::collection::vec(any::<bool>(), MARKS.len()))
}

fn build(spans: &[(String, Vec<bool>)]) -> Vec<Value> {
    spans
        .iter()
        .map(|(word, flags)| {
            let marks: Vec<&str> = MARKS
                .iter()
                .zip(flags)
                .filter(|(_, on)| **on)
                .map(|(mark, _)| *mark)
                .collect();
            styled(word, &marks)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_marks_are_well_nested(spans in proptest::collection::vec(span_strategy(), 0..12)) {
        let text = render_run(build(&spans));
        prop_assert!(is_well_nested(&text), "unbalanced: {}", text);
    }

    #[test]
    fn prop_text_survives_marks(spans in proptest::collection::vec(span_strategy(), 0..12)) {
        let text = render_run(build(&spans));
        let stripped: String = text.chars().filter(|c| !"~*_`".contains(*c)).collect();
        let words: String = spans.iter().map(|(word, _)| word.as_str()).collect();
        prop_assert_eq!(stripped, words);
    }

    #[test]
    fn prop_one_delimiter_pair_per_run(flags in proptest::collection::vec(any::<bool>(), 1..16)) {
        let spans: Vec<Value> = flags
            .iter()
            .map(|on| if *on { styled("w", &["strikethrough"]) } else { plain("w") })
            .collect();
        let runs = flags
            .iter()
            .zip(std::iter::once(&false).chain(flags.iter()))
            .filter(|(on, before)| **on && !**before)
            .count();
        let text = render_run(spans);
        prop_assert_eq!(text.matches("~~").count(), runs * 2);
    }

    #[test]
    fn prop_delimiters_hug_text(
        spans in proptest::collection::vec((" {0,2}", "[a-z]{1,5}", " {0,2}", any::<bool>()), 1..10)
    ) {
        let values: Vec<Value> = spans
            .iter()
            .map(|(lead, word, trail, bold)| {
                let text = format!("{lead}{word}{trail}");
                if *bold { styled(&text, &["bold"]) } else { plain(&text) }
            })
            .collect();
        let text = render_run(values);
        let bold = Regex::new(r"\*\*([^*]*)\*\*").unwrap();
        for capture in bold.captures_iter(&text) {
            let inner = &capture[1];
            prop_assert!(!inner.is_empty());
            prop_assert_eq!(inner.trim(), inner, "whitespace inside marks in {:?}", text);
        }
    }

    #[test]
    fn prop_every_line_is_balanced(
        words in proptest::collection::vec(("[a-z]{1,5}", any::<bool>(), any::<bool>()), 1..10)
    ) {
        let spans: Vec<Value> = words
            .iter()
            .map(|(word, bold, newline)| {
                let text = if *newline { format!("{word}\n") } else { word.clone() };
                if *bold { styled(&text, &["bold"]) } else { plain(&text) }
            })
            .collect();
        let text = render_run(spans);
        for line in text.lines() {
            prop_assert_eq!(line.matches("**").count() % 2, 0, "line {:?} of {:?}", line, text);
        }
    }
}
