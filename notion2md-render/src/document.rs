//! Document assembly: sibling sequencing and page composition.
//!
//!     [`Converter::render_blocks`] renders a sequence of sibling blocks. It is the
//!     only place where a block without a renderer is an error: silently dropping
//!     a block would change the structure of the page.
//!
//!     Siblings are separated by a blank line unless both are of the same tight
//!     kind (list items, to-dos and table rows), which keeps lists together. Two
//!     adjacent callouts additionally get an empty HTML comment between them;
//!     quote-style renderers would otherwise merge the two blockquotes into one.
//!
//!     [`render_page`] composes a whole page: frontmatter, title heading, body.

use crate::error::ConvertError;
use crate::metadata::Metadata;
use crate::node::{BlockKind, Node, Page};
use crate::options::RenderOptions;
use crate::render::{Converter, Rendered};

const CALLOUT_BREAK: &str = "\n<!-- -->\n\n";

impl Converter<'_> {
    /// Renders sibling blocks in order, failing on the first unsupported kind
    pub fn render_blocks(&mut self, blocks: &[Node]) -> Result<String, ConvertError> {
        self.lists.enter();
        let assembled = self.assemble(blocks);
        self.lists.leave();
        assembled
    }

    fn assemble(&mut self, blocks: &[Node]) -> Result<String, ConvertError> {
        let mut out = String::new();

        for (i, node) in blocks.iter().enumerate() {
            let next = blocks.get(i + 1);

            if !is_numbered(node) {
                self.lists.reset();
            }

            match self.render(node, next)? {
                Rendered::Text(text) => out.push_str(&text),
                Rendered::NoMatch => return Err(unsupported(node)),
            }

            if let Some(next) = next {
                out.push_str(separator(node, next));
            }
        }

        Ok(out)
    }
}

fn is_numbered(node: &Node) -> bool {
    matches!(
        node.as_block().map(|block| &block.kind),
        Some(BlockKind::NumberedListItem { .. })
    )
}

fn is_callout(node: &Node) -> bool {
    matches!(
        node.as_block().map(|block| &block.kind),
        Some(BlockKind::Callout { .. })
    )
}

fn separator(current: &Node, next: &Node) -> &'static str {
    if is_callout(current) && is_callout(next) {
        return CALLOUT_BREAK;
    }
    let tight = current.kind() == next.kind()
        && current.as_block().is_some_and(|block| block.kind.is_tight());
    if tight {
        ""
    } else {
        "\n"
    }
}

fn unsupported(node: &Node) -> ConvertError {
    let id = node
        .as_block()
        .map(|block| block.id.clone())
        .unwrap_or_default();
    tracing::warn!(kind = node.kind(), id = %id, "no renderer for block");
    ConvertError::UnsupportedNodeKind {
        kind: node.kind().to_string(),
        id,
    }
}

/// Renders a full page: frontmatter, title heading, then the body blocks.
pub fn render_page(
    page: &Page,
    blocks: &[Node],
    options: &RenderOptions,
) -> Result<String, ConvertError> {
    let metadata = Metadata::from_page(page, options)?;
    let body = Converter::new(options).render_blocks(blocks)?;
    Ok(compose(&metadata, &body))
}

/// Joins rendered metadata and body into the final page text
pub fn compose(metadata: &Metadata, body: &str) -> String {
    let mut page = metadata.to_frontmatter();
    if !page.is_empty() {
        page.push('\n');
    }
    if let Some(title) = metadata.title() {
        page.push_str(&format!("# {title}\n\n"));
    }
    page.push_str(body);
    page
}
