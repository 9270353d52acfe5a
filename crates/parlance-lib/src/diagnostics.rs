//! Rendering parse errors as annotated snippets.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::parser::ParseError;

/// Builder for rendering a [`ParseError`] with the offending chunk annotated.
pub struct ParseErrorPrinter<'e> {
    error: &'e ParseError,
    colored: bool,
}

impl<'e> ParseErrorPrinter<'e> {
    pub fn new(error: &'e ParseError) -> Self {
        Self {
            error,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let metadata = self.error.metadata.as_ref();
        let message = self.error.kind.to_string();
        let title = match metadata.and_then(|m| m.intent_name.as_deref()) {
            Some(intent) => format!("{message} (intent {intent})"),
            None => message.clone(),
        };

        let chunk = self.error.chunk.as_str();
        let span = if chunk.is_empty() { 0..0 } else { 0..chunk.len() };
        let line_start = metadata.and_then(|m| m.line_number).unwrap_or(1) as usize;

        let mut snippet = Snippet::source(chunk)
            .line_start(line_start)
            .annotation(AnnotationKind::Primary.span(span).label(&message));
        if let Some(path) = metadata.and_then(|m| m.file_name.as_deref()) {
            snippet = snippet.path(path);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&title).element(snippet)];
        renderer.render(&report).to_string()
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod diagnostics_tests;
