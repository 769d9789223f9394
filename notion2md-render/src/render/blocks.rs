//! One renderer per block kind.
//!
//!     Every renderer returns its own markup terminated by a newline, followed by
//!     the assembled markup of the block's children. Unsupported kinds decline
//!     with [`Rendered::NoMatch`]; reporting them is the assembler's job.

use super::{Converter, Rendered};
use crate::error::ConvertError;
use crate::node::{Block, BlockKind, Node};
use crate::options::CaptionMode;

impl Converter<'_> {
    pub(crate) fn render_block(&mut self, block: &Block) -> Result<Rendered, ConvertError> {
        let text = match &block.kind {
            BlockKind::Heading { level, text } => {
                let heading = format!(
                    "{} {}\n",
                    "#".repeat(usize::from(*level)),
                    self.render_sequence(text)?
                );
                self.append_children(heading, block)?
            }
            BlockKind::Paragraph { text } => {
                let paragraph = format!("{}\n", self.render_sequence(text)?);
                self.append_children(paragraph, block)?
            }
            BlockKind::BulletedListItem { text } => {
                self.lists.reset();
                let item = format!("- {}\n", self.render_sequence(text)?);
                self.nest_children(item, block)?
            }
            BlockKind::NumberedListItem { text } => {
                let number = self.lists.advance();
                let item = format!("{number}. {}\n", self.render_sequence(text)?);
                self.nest_children(item, block)?
            }
            BlockKind::ToDo { checked, text } => {
                let mark = if *checked { 'x' } else { ' ' };
                let item = format!("- [{mark}] {}\n", self.render_sequence(text)?);
                self.nest_children(item, block)?
            }
            BlockKind::Quote { text } => {
                let body = format!("{}\n", self.render_sequence(text)?);
                quote_lines(&self.append_children(body, block)?)
            }
            BlockKind::Callout { icon, text } => {
                let mut body = self.render_leaf(icon)?;
                if !body.is_empty() {
                    body.push('\n');
                }
                body.push_str(&self.render_sequence(text)?);
                body.push('\n');
                quote_lines(&self.append_children(body, block)?)
            }
            BlockKind::Code { language, text } => render_code(language, text),
            BlockKind::Table => self.render_table(block)?,
            BlockKind::TableRow { cells } => {
                let row = self.render_row(cells, cells.len())?;
                format!("{row}\n")
            }
            BlockKind::Toggle { text } => {
                let mut details = format!(
                    "<details>\n<summary>{}</summary>\n",
                    self.render_sequence(text)?
                );
                let children = self.render_blocks(block.child_nodes())?;
                if !children.is_empty() {
                    details.push('\n');
                    details.push_str(&children);
                    details.push('\n');
                }
                details.push_str("</details>\n");
                details
            }
            BlockKind::Image { url, caption } => {
                let caption = plain_text(caption);
                let image = match self.options.image_caption {
                    CaptionMode::Alt => format!("![{caption}]({url})\n"),
                    CaptionMode::Emphasis if !caption.is_empty() => {
                        format!("![]({url})\n*{}*\n", caption.replace('*', "\\*"))
                    }
                    CaptionMode::Emphasis | CaptionMode::Omit => format!("![]({url})\n"),
                };
                self.append_children(image, block)?
            }
            BlockKind::Bookmark { url, caption } => {
                let caption = plain_text(caption);
                let label = if caption.is_empty() { url } else { &caption };
                format!("[{label}]({url})\n")
            }
            BlockKind::Divider => "***\n".to_string(),
            BlockKind::Equation { expression } => {
                let escaped = expression.replace('\\', "\\\\").replace('_', "\\_");
                format!("$$\n{escaped}\n$$\n")
            }
            BlockKind::Unsupported(_) => return Ok(Rendered::NoMatch),
        };
        Ok(Rendered::Text(text))
    }

    /// Children follow the block after a blank line, at the same depth
    fn append_children(&mut self, mut markup: String, block: &Block) -> Result<String, ConvertError> {
        let children = self.render_blocks(block.child_nodes())?;
        if !children.is_empty() {
            markup.push('\n');
            markup.push_str(&children);
        }
        Ok(markup)
    }

    /// Children sit directly under the item, indented one level
    fn nest_children(&mut self, mut markup: String, block: &Block) -> Result<String, ConvertError> {
        let children = self.render_blocks(block.child_nodes())?;
        markup.push_str(&indent_lines(&children, &self.options.indent_string));
        Ok(markup)
    }

    /// Header row, separator, then one row per remaining child row
    fn render_table(&mut self, block: &Block) -> Result<String, ConvertError> {
        let rows: Vec<&Vec<Vec<Node>>> = block
            .child_nodes()
            .iter()
            .filter_map(Node::as_block)
            .filter_map(|child| match &child.kind {
                BlockKind::TableRow { cells } => Some(cells),
                _ => None,
            })
            .collect();

        let Some((header, body)) = rows.split_first() else {
            return Ok(String::new());
        };
        let width = header.len();

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(self.render_row(header, width)?);
        lines.push(format!("|{}|", vec!["---"; width].join("|")));
        for row in body {
            lines.push(self.render_row(row, width)?);
        }

        let mut table = lines.join("\n");
        table.push('\n');
        Ok(table)
    }

    fn render_row(&mut self, cells: &[Vec<Node>], width: usize) -> Result<String, ConvertError> {
        let mut rendered = Vec::with_capacity(width);
        for i in 0..width {
            let cell = match cells.get(i) {
                Some(spans) => escape_cell(&self.render_sequence(spans)?),
                None => String::new(),
            };
            rendered.push(cell);
        }
        Ok(format!("|{}|", rendered.join("|")))
    }
}

fn render_code(language: &str, text: &[Node]) -> String {
    let body = plain_text(text);
    let body = body.trim_end_matches('\n');
    let language = match language {
        "plain text" => "",
        other => other,
    };
    let fence = "`".repeat(fence_length(body));
    format!("{fence}{language}\n{body}\n{fence}\n")
}

/// Shortest backtick fence longer than every backtick run in `content`
fn fence_length(content: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run.max(2) + 1
}

fn plain_text(spans: &[Node]) -> String {
    spans.iter().filter_map(Node::plain_text).collect()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

/// Prefixes every non-blank line; blank lines stay empty
pub(crate) fn indent_lines(text: &str, indent: &str) -> String {
    prefix_lines(text, |line| {
        if line.trim().is_empty() {
            String::new()
        } else {
            format!("{indent}{line}")
        }
    })
}

fn quote_lines(text: &str) -> String {
    prefix_lines(text, |line| {
        if line.is_empty() {
            ">".to_string()
        } else {
            format!("> {line}")
        }
    })
}

fn prefix_lines(text: &str, prefix: impl Fn(&str) -> String) -> String {
    let mut out: String = text
        .lines()
        .map(prefix)
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}
