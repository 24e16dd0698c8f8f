//! User sync offset
//!
//! A correction for systematic drift between the audio and the lyric
//! timestamps. Positive values delay the lyrics, negative values bring them
//! earlier. Always within [-3.0, 3.0] seconds at 0.1 s resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_OFFSET: f64 = -3.0;
pub const MAX_OFFSET: f64 = 3.0;
pub const FINE_STEP: f64 = 0.1;
pub const COARSE_STEP: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SyncOffset(f64);

impl SyncOffset {
    pub const ZERO: SyncOffset = SyncOffset(0.0);

    /// Clamp to the allowed range and round to the nearest tenth.
    /// Non-finite input becomes zero.
    ///
    /// # Example
    /// ```
    /// use typesync::SyncOffset;
    ///
    /// assert_eq!(SyncOffset::new(0.26).seconds(), 0.3);
    /// assert_eq!(SyncOffset::new(-7.0).seconds(), -3.0);
    /// ```
    pub fn new(seconds: f64) -> Self {
        if !seconds.is_finite() {
            return Self::ZERO;
        }
        let clamped = seconds.clamp(MIN_OFFSET, MAX_OFFSET);
        let rounded = (clamped * 10.0).round() / 10.0;
        // Avoid displaying "-0.0".
        Self(if rounded == 0.0 { 0.0 } else { rounded })
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn nudged(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for SyncOffset {
    fn from(seconds: f64) -> Self {
        SyncOffset::new(seconds)
    }
}

impl From<SyncOffset> for f64 {
    fn from(offset: SyncOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for SyncOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 >= 0.0 { "+" } else { "" };
        write!(f, "{}{:.1}s", sign, self.0)
    }
}

/// Offset change bound to a key: `[` earlier, `]` later, Shift for whole
/// seconds. `code` is a physical key code such as `"BracketLeft"`.
pub fn offset_delta_for_key(code: &str, shift: bool) -> Option<f64> {
    let step = if shift { COARSE_STEP } else { FINE_STEP };
    match code {
        "BracketLeft" => Some(-step),
        "BracketRight" => Some(step),
        _ => None,
    }
}
