//! Rendering fatal errors against the source text.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::Error;

/// Builder for rendering a fatal [`Error`] with various options.
///
/// With a source attached, errors that carry a byte offset render as an
/// annotated snippet; everything else falls back to a plain one-liner.
pub struct ErrorPrinter<'e, 's> {
    error: &'e Error,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> ErrorPrinter<'e, 's> {
    pub fn new(error: &'e Error) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let message = self.error.to_string();

        let (Some(source), Some(offset)) = (self.source, self.error.offset()) else {
            return write!(w, "error: {message}");
        };
        if source.is_empty() {
            return write!(w, "error: {message}");
        }

        let range = annotation_range(offset, source.len());
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(range)
                .label(&message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }

        let report = vec![Level::ERROR.primary_title(&message).element(snippet)];
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        write!(w, "{}", renderer.render(&report))
    }
}

/// One byte wide at the error offset, clamped into the source.
fn annotation_range(offset: usize, limit: usize) -> std::ops::Range<usize> {
    let start = offset.min(limit.saturating_sub(1));
    start..(start + 1).min(limit)
}
