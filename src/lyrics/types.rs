//! Lyric track type definitions
//!
//! This module defines the immutable lyric data shared by the parser, the
//! lookup functions and the sync engine.

use serde::{Deserialize, Serialize};

use super::lookup;

/// One timestamped unit of text the user must type.
///
/// # Fields
/// - `time`: Start time in seconds from the beginning of the song (always >= 0)
/// - `text`: The text to type, already trimmed (and ad-lib filtered if requested)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    pub time: f64,
    pub text: String,
}

impl LyricLine {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }

    /// Length of the text in characters, the unit typing progress is measured in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// An ordered, immutable sequence of lyric lines for one song.
///
/// Lines are sorted by `time` ascending on construction. The sort is stable,
/// so lines sharing a timestamp keep their input order. A new song or a
/// lyrics refresh produces a whole new track; there is no way to mutate one
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LyricTrack {
    lines: Vec<LyricLine>,
}

impl LyricTrack {
    pub fn new(mut lines: Vec<LyricLine>) -> Self {
        lines.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { lines }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.lines.len().checked_sub(1)
    }

    /// Index of the latest line starting at or before `time`.
    pub fn index_at(&self, time: f64) -> Option<usize> {
        lookup::current_index(&self.lines, time)
    }

    /// Start time of the line following `index`, if there is one.
    pub fn next_time(&self, index: Option<usize>) -> Option<f64> {
        lookup::next_line_time(&self.lines, index)
    }

    /// Render the track back to LRC text, one `[mm:ss.hh]text` line per entry.
    pub fn to_lrc(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!("[{}]{}\n", format_timestamp(line.time), line.text));
        }
        out
    }
}

/// Format seconds as an LRC timestamp body: `mm:ss.hh` (hundredths).
///
/// # Example
/// ```
/// use typesync::format_timestamp;
///
/// assert_eq!(format_timestamp(83.5), "01:23.50");
/// assert_eq!(format_timestamp(0.0), "00:00.00");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    let total_cs = (seconds.max(0.0) * 100.0).round() as u64;
    let cs = total_cs % 100;
    let total_s = total_cs / 100;
    let s = total_s % 60;
    let m = total_s / 60;
    format!("{:02}:{:02}.{:02}", m, s, cs)
}
