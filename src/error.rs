//! # Error Types
//!
//! This module defines all error types for the typesync library.
//!
//! Errors are reserved for the edges of the system: undecodable input,
//! failing remote collaborators, and bad configuration. The sync engine
//! itself never fails while ticking; it reports what it did through outcome
//! enums instead.
//!
//! ## Error Types
//! - `ParseError` - Lyric input that is not decodable as text
//! - `LookupFailure` - A lyrics source failed to answer
//! - `SearchFailure` - Every video search query failed
//! - `ConfigError` - Invalid engine configuration
//! - `PreferencesError` - Preferences could not be read or written
//! - `InvalidResponse` - A remote JSON payload could not be decoded
//!
//! ## Usage
//! ```rust
//! use typesync::{parse_lrc_bytes, ParseOptions, TypesyncError};
//!
//! match parse_lrc_bytes(&[0xff, 0xfe], ParseOptions::default()) {
//!     Ok(track) => println!("{} lines", track.len()),
//!     Err(TypesyncError::ParseError { line, message }) => {
//!         eprintln!("Parse error at line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypesyncError {
    /// Lyric input is not decodable as text.
    ///
    /// Malformed timestamp lines are skipped silently and never produce this
    /// error; it only covers input that is not UTF-8 at all.
    ///
    /// # Example
    /// ```
    /// # use typesync::TypesyncError;
    /// let err = TypesyncError::ParseError {
    ///     line: 3,
    ///     message: "invalid utf-8 sequence".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 3: invalid utf-8 sequence");
    /// ```
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A lyrics source failed to answer a query.
    ///
    /// # Example
    /// ```
    /// # use typesync::TypesyncError;
    /// let err = TypesyncError::LookupFailure {
    ///     query: "eminem-without me".to_string(),
    ///     message: "503 Service Unavailable".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Lyrics lookup failed for 'eminem-without me': 503 Service Unavailable"
    /// );
    /// ```
    #[error("Lyrics lookup failed for '{query}': {message}")]
    LookupFailure { query: String, message: String },

    /// Every video search query failed.
    #[error("Video search failed: {0}")]
    SearchFailure(String),

    /// Engine configuration is malformed or out of range.
    ///
    /// # Example
    /// ```
    /// # use typesync::TypesyncError;
    /// let err = TypesyncError::ConfigError("tick-interval-ms must be greater than 0".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid configuration: tick-interval-ms must be greater than 0"
    /// );
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Preferences could not be loaded or saved.
    #[error("Preferences error: {0}")]
    PreferencesError(String),

    /// A remote payload could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
