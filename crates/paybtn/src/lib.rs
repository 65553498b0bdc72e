//! Helper functions for payment-button generation.
//!
//! This crate collects the small, exacting pieces a button generator
//! needs to get right every time: blank-aware text handling, lowercase
//! hex encoding, content fingerprints for parameter signing, and
//! locale-independent date and amount formatting.
//!
//! # Overview
//!
//! Button parameters travel as text, so the helpers are built around
//! three rules:
//! - **Blank is data, not an error**: absent or whitespace-only input
//!   parses to `None`; absent values format to a well-defined default.
//! - **Fixed text forms**: dates render as `dd/MM/yyyy` /
//!   `dd/MM/yyyy HH:mm`, amounts with `.` and exactly two fraction
//!   digits, independent of the host locale.
//! - **No shared state**: every function is pure and safe under
//!   unlimited concurrency.
//!
//! # Quick Start
//!
//! ```rust
//! use paybtn::{format_date, format_decimal, md5_hex, parse_date, parse_decimal};
//!
//! // Amounts: exact decimals, canonical two-fraction-digit rendering
//! let amount = parse_decimal("19.9").unwrap();
//! assert_eq!(format_decimal(amount), "19.90");
//!
//! // Dates: day/month/year, strict calendar validation
//! let due = parse_date("05/03/2024").unwrap();
//! assert_eq!(format_date(due), "05/03/2024");
//!
//! // Blank input is absent, and absent formats to the default
//! assert_eq!(parse_decimal("   ").unwrap(), None);
//! assert_eq!(format_decimal(None), "0.00");
//!
//! // Parameter fingerprints: 32-char lowercase hex
//! assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
//! ```
//!
//! # Modules
//!
//! - [`text`]: blank detection and trim helpers
//! - [`hex`]: lowercase hex encoding/decoding
//! - [`digest`]: MD5 and SHA-256 content fingerprints
//! - [`datetime`]: pattern-driven date parsing/formatting
//! - [`decimal`]: exact fixed-point amount parsing/formatting
//! - [`error`]: error types
//!
//! # Compatibility
//!
//! MD5 is kept as the default fingerprint because existing button
//! signatures were produced with it; it is a content fingerprint, not a
//! security boundary. New integrations that do not need to verify old
//! signatures can use the SHA-256 variants instead.

pub mod datetime;
pub mod decimal;
pub mod digest;
pub mod error;
pub mod hex;
pub mod text;

// Re-export commonly used items at crate root
pub use datetime::{
    DATE_PATTERN, DATETIME_PATTERN, format_date, format_datetime, format_datetime_with,
    parse_date, parse_datetime, parse_datetime_with,
};
pub use decimal::{Decimal, format_decimal, parse_decimal};
pub use digest::{md5_bytes, md5_hex, sha256_bytes, sha256_hex};
pub use error::FormatError;
pub use hex::{decode_hex, encode_hex};
pub use text::{blank_to_none, eq, is_blank, none_to_blank};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
