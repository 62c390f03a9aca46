//! miette integration for rendering issues against their source text.

use crate::types::{Issue, Severity};

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};

/// An [`Issue`] bound to the text of the file it was found in.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct IssueDiagnostic {
    message: String,
    code: String,
    severity: Severity,
    src: NamedSource<String>,
    span: Option<SourceSpan>,
    label: String,
}

impl IssueDiagnostic {
    /// Binds an issue to the file it points into.
    #[must_use]
    pub fn new(issue: &Issue, file_name: &str, content: &str) -> Self {
        let span = issue
            .line
            .and_then(|line| line_span(content, line))
            .map(SourceSpan::from);
        Self {
            message: issue.message.clone(),
            code: issue.kind.name().to_string(),
            severity: issue.severity,
            src: NamedSource::new(file_name, content.to_string()),
            span,
            label: issue
                .key
                .as_ref()
                .map_or_else(|| "here".to_string(), |k| format!("'{k}'")),
        }
    }
}

impl Diagnostic for IssueDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.span.map(|_| &self.src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            span,
        ))))
    }
}

/// Byte offset and length of a 1-based line, without its line ending.
#[must_use]
pub fn line_span(content: &str, line: usize) -> Option<(usize, usize)> {
    let mut offset = 0;
    for (index, raw) in content.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let text = raw.trim_end_matches(['\n', '\r']);
            return Some((offset, text.len()));
        }
        offset += raw.len();
    }
    None
}
