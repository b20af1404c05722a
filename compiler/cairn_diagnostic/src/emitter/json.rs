use std::io::Write;

use serde::Serialize;

use crate::span_utils::LineIndex;
use crate::{Diagnostic, ErrorCode, Severity};

use super::DiagnosticEmitter;

#[derive(Serialize)]
struct JsonLabel<'a> {
    start: u32,
    end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
    message: &'a str,
    primary: bool,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: ErrorCode,
    severity: Severity,
    message: &'a str,
    labels: Vec<JsonLabel<'a>>,
    notes: &'a [String],
    help: &'a [String],
}

/// Emits one JSON object per diagnostic, newline-delimited.
pub struct JsonEmitter<W: Write> {
    writer: W,
    index: Option<LineIndex>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            index: None,
        }
    }

    /// Resolve label spans to line/column pairs against `source`.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.index = Some(LineIndex::build(source));
        self
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let labels = diagnostic
            .labels
            .iter()
            .map(|label| {
                let position = self.index.as_ref().map(|i| i.line_col(label.span.start));
                JsonLabel {
                    start: label.span.start,
                    end: label.span.end,
                    line: position.map(|(line, _)| line),
                    column: position.map(|(_, col)| col),
                    message: &label.message,
                    primary: label.is_primary,
                }
            })
            .collect();
        let record = JsonDiagnostic {
            code: diagnostic.code,
            severity: diagnostic.severity,
            message: &diagnostic.message,
            labels,
            notes: &diagnostic.notes,
            help: &diagnostic.help,
        };
        if serde_json::to_writer(&mut self.writer, &record).is_ok() {
            let _ = writeln!(self.writer);
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {}
}
