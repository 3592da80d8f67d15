//!
//! Scanner Error Types
//!
//! Errors found while pulling literals out of source text. Each carries the
//! Span of the offending bytes so the diagnostic module can point at them.
//! Scanning never stops at the first error; the scanner resynchronizes and
//! keeps collecting literals.
//!

use crate::source::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    #[error("invalid number literal")]
    InvalidNumber { span: Span },
}

impl ScanError {
    pub fn span(&self) -> Span {
        match self {
            ScanError::UnterminatedString { span }
            | ScanError::UnterminatedComment { span }
            | ScanError::InvalidNumber { span } => *span,
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            ScanError::UnterminatedString { .. } => {
                Some("close the string with a matching quote before the end of the line")
            }
            ScanError::UnterminatedComment { .. } => Some("close the comment with */"),
            ScanError::InvalidNumber { .. } => None,
        }
    }
}
