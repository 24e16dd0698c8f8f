//! # Lyrics Module
//!
//! Parse timestamped lyrics and resolve which line is current at a given time.
//!
//! ## Purpose
//! This module turns LRC text into an immutable [`LyricTrack`] that the sync
//! engine can query on every tick:
//! 1. **Parsing** - `[mm:ss.hh]text` lines become [`LyricLine`] records sorted by time
//! 2. **Ad-lib filtering** - optional removal of parenthetical asides
//! 3. **Lookup** - the latest line whose timestamp is at or before a query time
//!
//! ## Sub-modules
//! - `types` - LyricLine and LyricTrack definitions, LRC rendering
//! - `parser` - LRC text parsing with [`ParseOptions`]
//! - `adlib` - The ad-lib text filter
//! - `lookup` - Time to index resolution
//!
//! ## Example
//! ```rust
//! use typesync::lyrics::{parse_lrc, ParseOptions};
//!
//! let source = "[00:00.00]a\n[00:02.00]bb\n[00:04.00]ccc\n";
//! let track = parse_lrc(source, ParseOptions::default());
//!
//! assert_eq!(track.len(), 3);
//! assert_eq!(track.index_at(2.1), Some(1));
//! assert_eq!(track.next_time(Some(1)), Some(4.0));
//! ```
//!
//! ## Parsing Rules
//!
//! - Only lines that start with a valid timestamp are kept; anything else is ignored
//! - Seconds must be two digits below 60; fractions may be hundredths or milliseconds
//! - Several leading timestamps on one line each produce a lyric line
//! - With ad-lib removal on, lines that end up empty are dropped entirely
//! - Output is always sorted by time; equal timestamps keep input order
//!
//! ## Related Modules
//! - `sync` - Consumes the track and lookup on every tick
//! - `source` - Fetches LRC text and falls back to the bundled sample

mod adlib;
mod lookup;
mod parser;
mod types;

#[cfg(test)]
mod tests;

pub use adlib::remove_ad_libs;
pub use lookup::{current_index, next_line_time};
pub use parser::{parse_lrc, parse_lrc_bytes, ParseOptions};
pub use types::{format_timestamp, LyricLine, LyricTrack};
