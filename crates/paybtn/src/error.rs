//! Error types for text parsing helpers.

use thiserror::Error;

/// Error raised when date, decimal, or hex text does not parse.
///
/// Blank input is never an error: the parsing helpers map blank to `None`
/// before any of these variants can occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("date {value:?} does not match pattern {pattern:?}")]
    DateMismatch { value: String, pattern: String },

    #[error("invalid {field} in date {value:?}")]
    DateFieldOutOfRange { field: &'static str, value: String },

    #[error("unsupported pattern token {token:?}")]
    UnsupportedPatternToken { token: char },

    #[error("malformed decimal {value:?}")]
    MalformedDecimal { value: String },

    #[error("decimal {value:?} exceeds the representable range")]
    DecimalOutOfRange { value: String },

    #[error("invalid hex digit {ch:?}")]
    InvalidHexDigit { ch: char },

    #[error("hex string has odd length {len}")]
    OddHexLength { len: usize },
}
