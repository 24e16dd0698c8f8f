//! LRC parser
//!
//! Recognizes lines of the form `[mm:ss.hh]text`. Everything else (metadata
//! tags such as `[ar:Artist]`, blank lines, malformed timestamps) is skipped
//! without error.

use crate::error::TypesyncError;

use super::adlib::remove_ad_libs;
use super::types::{LyricLine, LyricTrack};

/// Options applied while parsing lyrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Run each line through the ad-lib filter; lines left empty are dropped.
    pub remove_ad_libs: bool,
}

impl ParseOptions {
    pub fn with_ad_libs_removed(remove_ad_libs: bool) -> Self {
        Self { remove_ad_libs }
    }
}

/// Parse LRC text into a lyric track sorted by time.
///
/// A line may carry several leading timestamps (`[00:10.00][00:40.00]chorus`);
/// each one produces its own lyric line with the same text.
///
/// # Example
/// ```
/// use typesync::{parse_lrc, ParseOptions};
///
/// let source = "[ar:Somebody]\n[00:04.00]second (yeah)\n[00:01.50]first\n";
/// let track = parse_lrc(source, ParseOptions { remove_ad_libs: true });
///
/// assert_eq!(track.len(), 2);
/// assert_eq!(track.lines()[0].text, "first");
/// assert_eq!(track.lines()[1].text, "second");
/// ```
pub fn parse_lrc(source: &str, options: ParseOptions) -> LyricTrack {
    let mut lines = Vec::new();

    for raw in source.lines() {
        let (times, rest) = split_timestamps(raw.trim_start());
        if times.is_empty() {
            continue;
        }

        let text = if options.remove_ad_libs {
            let filtered = remove_ad_libs(rest);
            if filtered.is_empty() {
                continue;
            }
            filtered
        } else {
            rest.trim().to_string()
        };

        for time in times {
            lines.push(LyricLine::new(time, text.clone()));
        }
    }

    LyricTrack::new(lines)
}

/// Parse raw bytes as LRC text.
///
/// Fails with [`TypesyncError::ParseError`] only when the bytes are not valid
/// UTF-8; the reported line is the one holding the first invalid byte.
pub fn parse_lrc_bytes(bytes: &[u8], options: ParseOptions) -> Result<LyricTrack, TypesyncError> {
    let source = std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        TypesyncError::ParseError {
            line,
            message: e.to_string(),
        }
    })?;
    Ok(parse_lrc(source, options))
}

/// Consume every leading `[mm:ss.hh]` tag. Returns the parsed times and the
/// remaining text. Stops at the first tag that is not a valid timestamp.
fn split_timestamps(line: &str) -> (Vec<f64>, &str) {
    let mut times = Vec::new();
    let mut rest = line;

    while let Some(body) = rest.strip_prefix('[') {
        let Some(close) = body.find(']') else {
            break;
        };
        let Some(time) = parse_timestamp(&body[..close]) else {
            break;
        };
        times.push(time);
        rest = &body[close + 1..];
    }

    (times, rest)
}

/// Parse `mm:ss.hh` (or `mm:ss.mmm`) into seconds.
fn parse_timestamp(tag: &str) -> Option<f64> {
    let (minutes, rest) = tag.split_once(':')?;
    let (seconds, fraction) = rest.split_once('.')?;

    if minutes.is_empty() || seconds.len() != 2 || !(2..=3).contains(&fraction.len()) {
        return None;
    }
    if ![minutes, seconds, fraction]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let scale = if fraction.len() == 3 { 1000.0 } else { 100.0 };
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    let fraction: u32 = fraction.parse().ok()?;
    if seconds >= 60 {
        return None;
    }

    let fraction_secs = fraction as f64 / scale;

    Some(minutes as f64 * 60.0 + seconds as f64 + fraction_secs)
}
