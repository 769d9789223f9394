//! Rule dispatch over classified nodes.
//!
//!     [`Converter`] is the conversion context for one document. It owns the mutable
//!     state the rules share (the open annotation stack and the numbered-list
//!     counters), so two documents never see each other's state; convert pages
//!     concurrently by giving each its own converter.
//!
//!     [`Converter::render`] applies the rules in priority order (see `crate::node`
//!     for the shape table). The result is [`Rendered::Text`], which may be empty,
//!     or [`Rendered::NoMatch`] when no rule applies. Only a block of an unsupported
//!     kind produces `NoMatch`; every other shape has a leaf rule, and leaf callers
//!     go through [`Converter::render_leaf`], which turns `NoMatch` into empty text.

mod annotations;
mod blocks;
mod date;
pub mod whitespace;

pub use annotations::AnnotationState;

use crate::error::ConvertError;
use crate::node::Node;
use crate::options::RenderOptions;

/// Outcome of applying the rules to one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    NoMatch,
}

impl Rendered {
    pub fn into_option(self) -> Option<String> {
        match self {
            Rendered::Text(text) => Some(text),
            Rendered::NoMatch => None,
        }
    }

    pub fn unwrap_or_empty(self) -> String {
        self.into_option().unwrap_or_default()
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Rendered::NoMatch)
    }
}

/// Numbered-list counters, one level per block sequence being assembled
#[derive(Debug, Default)]
pub struct ListState {
    levels: Vec<Option<usize>>,
}

impl ListState {
    pub(crate) fn enter(&mut self) {
        self.levels.push(None);
    }

    pub(crate) fn leave(&mut self) {
        self.levels.pop();
    }

    /// Ends the current numbered run
    pub(crate) fn reset(&mut self) {
        if let Some(current) = self.levels.last_mut() {
            *current = None;
        }
    }

    /// Next number of the current run, starting at 1
    pub(crate) fn advance(&mut self) -> usize {
        if self.levels.is_empty() {
            self.enter();
        }
        let mut next = 1;
        if let Some(current) = self.levels.last_mut() {
            next = current.map_or(1, |n| n + 1);
            *current = Some(next);
        }
        next
    }
}

/// Conversion context for a single document
pub struct Converter<'o> {
    options: &'o RenderOptions,
    delimiter: &'o str,
    pub(crate) marks: AnnotationState,
    pub(crate) lists: ListState,
}

impl<'o> Converter<'o> {
    /// Converter for page content; non-span sequences join without a delimiter
    pub fn new(options: &'o RenderOptions) -> Self {
        Self::with_delimiter(options, "")
    }

    /// Converter for page properties; multi-valued properties join with the
    /// configured list delimiter
    pub fn for_metadata(options: &'o RenderOptions) -> Self {
        Self::with_delimiter(options, &options.list_delimiter)
    }

    fn with_delimiter(options: &'o RenderOptions, delimiter: &'o str) -> Self {
        Self {
            options,
            delimiter,
            marks: AnnotationState::default(),
            lists: ListState::default(),
        }
    }

    /// Applies the first matching rule to `node`. `next` is the following
    /// sibling, which decides where annotation runs close.
    pub fn render(&mut self, node: &Node, next: Option<&Node>) -> Result<Rendered, ConvertError> {
        let text = match node {
            Node::Sequence(items) => self.render_sequence(items)?,
            Node::Span(span) => return self.render_span(span, next),
            Node::Date(range) => date::render_range(range),
            Node::Block(block) => return self.render_block(block),
            Node::Equation(expression) => format!("${expression}$"),
            Node::Typed { payload, .. } => self.render_leaf(payload)?,
            Node::Field(field) => self.render_leaf(field)?,
            Node::Identifier(text)
            | Node::Content(text)
            | Node::Text(text)
            | Node::Scalar(text) => text.clone(),
            Node::Null | Node::Opaque => String::new(),
        };
        Ok(Rendered::Text(text))
    }

    /// Renders a leaf value; anything without a rule renders as empty text
    pub fn render_leaf(&mut self, node: &Node) -> Result<String, ConvertError> {
        self.render(node, None).map(Rendered::unwrap_or_empty)
    }

    /// Renders each element with its neighbours and joins the results.
    ///
    /// Rich-text runs join with no delimiter. Elements that produced `NoMatch`
    /// are dropped, and marks still open when the run ends are closed so the
    /// stack is balanced at the end of every run.
    pub fn render_sequence(&mut self, items: &[Node]) -> Result<String, ConvertError> {
        let depth = self.marks.depth();
        let delimiter = if items.iter().any(|item| item.as_span().is_some()) {
            ""
        } else {
            self.delimiter
        };

        let mut parts = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if let Rendered::Text(text) = self.render(item, items.get(i + 1))? {
                parts.push(text);
            }
        }

        let mut joined = parts.join(delimiter);
        joined.push_str(&self.marks.close_above(depth));
        Ok(joined)
    }
}
