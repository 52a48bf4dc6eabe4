//! Structured parse errors and their rendering.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

/// A fatal parse failure for one document. No partial AST accompanies it.
///
/// `context` holds up to 80 bytes of input starting at the failure point;
/// `source_line` is the text of the failing line. `offset` is a byte offset
/// into the parsed text (which has a trailing newline appended when the
/// original input lacked one).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at [{file},{line}]: expected {expected}")]
pub struct ParseError {
    pub file: String,
    pub line: u32,
    pub offset: usize,
    pub expected: String,
    pub source_line: String,
    pub context: String,
}

impl ParseError {
    pub fn printer(&self) -> ParseErrorPrinter<'_> {
        ParseErrorPrinter::new(self)
    }
}

/// Builder for rendering a [`ParseError`].
///
/// Without a source it renders the classic banner block; with the document
/// source attached it renders an annotated snippet instead.
pub struct ParseErrorPrinter<'a> {
    error: &'a ParseError,
    source: Option<&'a str>,
    colored: bool,
}

impl<'a> ParseErrorPrinter<'a> {
    pub fn new(error: &'a ParseError) -> Self {
        Self {
            error,
            source: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        match self.source {
            Some(source) => self.render_snippet(source),
            None => self.render_banner(),
        }
    }

    fn render_banner(&self) -> String {
        let e = self.error;
        let mut out = String::new();
        out.push_str("-------------------------\n");
        if !e.context.is_empty() {
            out.push_str("Parsing failed\n");
            out.push_str(&format!("stopped at: \": {}...\"\n", e.context));
            out.push_str("-------------------------\n");
        }
        out.push_str(&format!("Error at position: [{},{}]\n", e.file, e.line));
        out.push_str(&format!("Expected a node of type '{}'\n", e.expected));
        out.push_str("--- Source Lines ---\n");
        out.push_str(&e.source_line);
        out.push('\n');
        out.push_str("-------------------------\n");
        out
    }

    fn render_snippet(&self, source: &str) -> String {
        let e = self.error;
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let label = format!("expected {}", e.expected);
        let snippet = Snippet::source(source)
            .line_start(1)
            .path(e.file.as_str())
            .annotation(
                AnnotationKind::Primary
                    .span(annotation_range(e.offset, source.len()))
                    .label(&label),
            );

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&label).element(snippet)];
        format!("{}", renderer.render(&report))
    }
}

fn annotation_range(offset: usize, limit: usize) -> std::ops::Range<usize> {
    let start = offset.min(limit.saturating_sub(1));
    start..(start + 1).min(limit)
}
