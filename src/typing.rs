//! # Typing Session
//!
//! Tracks what the user has typed against the active lyric line and derives
//! live metrics from it.
//!
//! ## Rules
//! - A submission longer than the target line is rejected, so the typed text
//!   can never overflow the line
//! - The clock starts on the first non-empty submission after a reset and
//!   stops when the text is cleared
//! - Completion is length-based: a line is complete once as many characters
//!   have been typed as the line has, whether or not they are correct
//!
//! ## Metrics
//! - **Accuracy**: positionally correct characters / typed characters, as a
//!   rounded percentage; 100 when nothing is typed
//! - **WPM**: whitespace-delimited words / elapsed seconds x 60, rounded;
//!   reported as 0 until at least one second has elapsed
//!
//! The session does not decide anything about playback. The sync engine owns
//! it, swaps its target on every line change, and reads its completion state
//! at decision time.

use std::time::{Duration, Instant};

use serde::Serialize;

const MIN_WPM_ELAPSED: Duration = Duration::from_secs(1);

/// Result of proposing new typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// The text was longer than the target line and was ignored.
    Overflow,
}

/// Live statistics for the line being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: u64,
}

impl Default for TypingStats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            elapsed_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypingSession {
    target: String,
    target_len: usize,
    typed: String,
    typed_len: usize,
    started_at: Option<Instant>,
}

impl TypingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a new target line. Clears typed text and timing.
    pub fn set_target(&mut self, target: &str) {
        self.target = target.to_string();
        self.target_len = target.chars().count();
        self.clear();
    }

    /// Drop the target as well as the typed text.
    pub fn reset(&mut self) {
        self.set_target("");
    }

    fn clear(&mut self) {
        self.typed.clear();
        self.typed_len = 0;
        self.started_at = None;
    }

    /// Propose `text` as the full typed content of the current line.
    pub fn submit(&mut self, text: &str, now: Instant) -> Submission {
        let len = text.chars().count();
        if len > self.target_len {
            return Submission::Overflow;
        }

        if len == 0 {
            self.clear();
            return Submission::Accepted;
        }

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.typed = text.to_string();
        self.typed_len = len;
        Submission::Accepted
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn is_complete(&self) -> bool {
        self.typed_len >= self.target_len
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Count of typed characters matching the target at the same position.
    pub fn correct_chars(&self) -> usize {
        self.typed
            .chars()
            .zip(self.target.chars())
            .filter(|(typed, expected)| typed == expected)
            .count()
    }

    pub fn accuracy(&self) -> u32 {
        if self.typed_len == 0 {
            return 100;
        }
        (self.correct_chars() as f64 / self.typed_len as f64 * 100.0).round() as u32
    }

    pub fn word_count(&self) -> usize {
        self.typed.split_whitespace().count()
    }

    pub fn stats(&self, now: Instant) -> TypingStats {
        let Some(started) = self.started_at else {
            return TypingStats::default();
        };

        let elapsed = now.saturating_duration_since(started);
        let wpm = if elapsed >= MIN_WPM_ELAPSED {
            (self.word_count() as f64 / elapsed.as_secs_f64() * 60.0).round() as u32
        } else {
            0
        };

        TypingStats {
            wpm,
            accuracy: self.accuracy(),
            elapsed_secs: elapsed.as_secs(),
        }
    }
}
