//! Annotation balancing for rich-text runs.
//!
//!     Spans arrive as a flat run, each with its own annotation set. Markdown needs
//!     the same information as properly nested delimiters, opened once where a run
//!     of an annotation starts and closed once where it ends:
//!
//!         [strike "hello"] [strike+bold "hello"]  =>  ~~hello**hello**~~
//!
//!     [`AnnotationState`] is the stack of marks currently open. For each span:
//!
//!     1. Marks set on the span but not on the stack open here. Marks opened by the
//!        same span nest with the later [`Annotation::ALL`] entry outermost.
//!     2. Walking the stack, the lowest mark the next sibling does not carry is
//!        closed together with every mark above it, innermost first. Marks above it
//!        that the next sibling does carry are reopened by that sibling.
//!
//!     Delimiters only touch non-blank text: openings go after a line's leading
//!     whitespace, closings before its trailing whitespace. A line break inside a
//!     span closes every open mark before the break and reopens them at the next
//!     non-blank text, since emphasis does not span lines. Opening emission follows
//!     the stack rather than the previous sibling's flags, which keeps the output
//!     balanced when a mark has to be reopened after its run was cut.

use super::whitespace::split_whitespace;
use super::{Converter, Rendered};
use crate::error::ConvertError;
use crate::node::{Annotation, Node, Span};

/// Stack of open annotation marks for one document
#[derive(Debug, Default)]
pub struct AnnotationState {
    open: Vec<Annotation>,
    // Open marks were closed at a line break and not yet reopened.
    suspended: bool,
}

impl AnnotationState {
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_balanced(&self) -> bool {
        self.open.is_empty()
    }

    /// Wraps `text` in the delimiters needed for `span`, given whether the next
    /// sibling continues each annotation.
    pub fn wrap(
        &mut self,
        text: &str,
        span: &Span,
        continues: impl Fn(Annotation) -> bool,
    ) -> String {
        let mut pending: Vec<Annotation> = Annotation::ALL
            .into_iter()
            .filter(|annotation| span.has(*annotation) && !self.open.contains(annotation))
            .collect();

        let mut out = String::with_capacity(text.len() + 8);
        let lines: Vec<&str> = text.split('\n').collect();
        let last = lines.len() - 1;

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let (leading, core, trailing) = split_whitespace(line);

            if core.is_empty() {
                if i == last {
                    out.push_str(&self.close_finished(&continues));
                } else {
                    out.push_str(&self.suspend());
                }
                out.push_str(line);
                continue;
            }

            out.push_str(leading);
            out.push_str(&self.resume());
            for annotation in pending.drain(..).rev() {
                out.push_str(annotation.delimiter());
                self.open.push(annotation);
            }
            out.push_str(core);
            if i == last {
                out.push_str(&self.close_finished(&continues));
            } else {
                out.push_str(&self.suspend());
            }
            out.push_str(trailing);
        }

        out
    }

    /// Closes every mark opened above `depth`
    pub fn close_above(&mut self, depth: usize) -> String {
        if self.open.len() <= depth {
            return String::new();
        }
        let closed: Vec<Annotation> = self.open.drain(depth..).collect();
        self.emit_closings(&closed)
    }

    fn close_finished(&mut self, continues: &impl Fn(Annotation) -> bool) -> String {
        let Some(lowest) = self.open.iter().position(|a| !continues(*a)) else {
            return String::new();
        };
        let closed: Vec<Annotation> = self.open.drain(lowest..).collect();
        self.emit_closings(&closed)
    }

    fn emit_closings(&mut self, closed: &[Annotation]) -> String {
        let physical = !self.suspended;
        if self.open.is_empty() {
            self.suspended = false;
        }
        if physical {
            closed.iter().rev().map(|a| a.delimiter()).collect()
        } else {
            String::new()
        }
    }

    fn suspend(&mut self) -> String {
        if self.suspended || self.open.is_empty() {
            return String::new();
        }
        self.suspended = true;
        self.open.iter().rev().map(|a| a.delimiter()).collect()
    }

    fn resume(&mut self) -> String {
        if !self.suspended {
            return String::new();
        }
        self.suspended = false;
        self.open.iter().map(|a| a.delimiter()).collect()
    }
}

impl Converter<'_> {
    /// Renders a rich-text span, balancing its annotations against its siblings.
    ///
    /// A span with a hyperlink renders as `[plain_text](href)`, and that link is
    /// what the annotations wrap. When the span's own text has no rule the span
    /// declines instead of wrapping it.
    pub(crate) fn render_span(
        &mut self,
        span: &Span,
        next: Option<&Node>,
    ) -> Result<Rendered, ConvertError> {
        let text = match &span.href {
            Some(href) => format!("[{}]({href})", span.plain_text),
            None => match self.render(&span.content, None)? {
                Rendered::Text(text) => text,
                Rendered::NoMatch => return Ok(Rendered::NoMatch),
            },
        };

        if span.annotations.is_none() && self.marks.is_balanced() {
            return Ok(Rendered::Text(text));
        }

        let continues = |annotation| next.is_some_and(|node| node.carries(annotation));
        Ok(Rendered::Text(self.marks.wrap(&text, span, continues)))
    }
}
