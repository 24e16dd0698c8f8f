//! LRCLIB search responses
//!
//! Decoding and selection for the record list returned by an LRCLIB
//! `/api/search` request. Fetching is left to the host's HTTP client; this
//! module turns the JSON body into LRC text.

use serde::Deserialize;

use crate::error::TypesyncError;
use crate::lyrics::format_timestamp;

/// Seconds between lines when plain lyrics are given synthetic timestamps.
pub const PLAIN_LINE_INTERVAL: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrclibRecord {
    pub id: u64,
    #[serde(default)]
    pub track_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub instrumental: bool,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}

pub fn parse_search_response(body: &str) -> Result<Vec<LrclibRecord>, TypesyncError> {
    serde_json::from_str(body).map_err(|e| TypesyncError::InvalidResponse(e.to_string()))
}

/// Pick lyrics from search records: the first record with synced lyrics,
/// else the first with plain lyrics. Blank strings count as missing.
pub fn select_lyrics(records: &[LrclibRecord]) -> Option<String> {
    let present = |lyrics: &Option<String>| {
        lyrics
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    };

    if let Some(synced) = records.iter().find_map(|r| present(&r.synced_lyrics)) {
        return Some(synced);
    }
    let plain = records.iter().find_map(|r| present(&r.plain_lyrics))?;
    tracing::warn!("only_plain_lyrics_available");
    Some(plain)
}

/// True when `text` already carries bracketed tags and can be parsed as LRC.
pub fn looks_like_lrc(text: &str) -> bool {
    text.contains('[') && text.contains(']')
}

/// Give plain lyrics synthetic timing: an empty lead-in at 0:00, then one
/// non-blank line every [`PLAIN_LINE_INTERVAL`] seconds.
///
/// # Example
/// ```
/// use typesync::source::lrclib::plain_to_lrc;
///
/// let lrc = plain_to_lrc("first\n\nsecond\n");
/// assert_eq!(lrc, "[00:00.00]\n[00:04.00]first\n[00:08.00]second\n");
/// ```
pub fn plain_to_lrc(plain: &str) -> String {
    let mut out = String::from("[00:00.00]\n");
    let lines = plain.lines().map(str::trim).filter(|line| !line.is_empty());
    for (i, line) in lines.enumerate() {
        let time = (i + 1) as f64 * PLAIN_LINE_INTERVAL;
        out.push_str(&format!("[{}]{}\n", format_timestamp(time), line));
    }
    out
}

/// Normalize remote lyrics to LRC text: synced lyrics pass through, plain
/// lyrics get synthetic timing.
pub fn to_lrc_text(lyrics: &str) -> String {
    if looks_like_lrc(lyrics) {
        lyrics.to_string()
    } else {
        plain_to_lrc(lyrics)
    }
}
