//!
//! Diagnostic Module - Rich Error Reporting
//!
//! Renders scan errors with source context using miette: file name, line
//! and column, a labelled snippet and a hint where one helps.
//!
//! Usage:
//!   let reporter = DiagnosticReporter::new(&source_file);
//!   reporter.report_scan_errors(&errors);
//!

use miette::{Diagnostic, LabeledSpan, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::scanner::ScanError;
use crate::source::SourceFile;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct LitDiagnostic {
    message: String,
    src: NamedSource<String>,
    span: SourceSpan,
    label: String,
    help_text: Option<String>,
}

impl Diagnostic for LitDiagnostic {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help_text
            .as_ref()
            .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>)
    }
}

impl LitDiagnostic {
    pub fn from_scan_error(err: &ScanError, source: &SourceFile) -> Self {
        let span = err.span();
        let (line, col) = source.line_col(span.start);

        Self {
            message: format!("{} at {}:{}", err, line, col),
            src: NamedSource::new(&source.name, source.source.clone()),
            span: (span.start as usize, span.len() as usize).into(),
            label: label_for(err, source),
            help_text: err.help().map(str::to_string),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn label_for(err: &ScanError, source: &SourceFile) -> String {
    match err {
        ScanError::UnterminatedString { .. } => "string starts here".to_string(),
        ScanError::UnterminatedComment { .. } => "comment starts here".to_string(),
        ScanError::InvalidNumber { span } => format!("`{}` is not a number", source.slice(*span)),
    }
}

pub struct DiagnosticReporter<'a> {
    source: &'a SourceFile,
}

impl<'a> DiagnosticReporter<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        Self { source }
    }

    pub fn report_scan_error(&self, err: &ScanError) {
        let diag = LitDiagnostic::from_scan_error(err, self.source);
        let report = Report::new(diag);
        eprintln!("{:?}", report);
    }

    pub fn report_scan_errors(&self, errors: &[ScanError]) {
        for err in errors {
            self.report_scan_error(err);
        }
    }
}
