//! # Source Module
//!
//! Where lyric text comes from.
//!
//! ## Purpose
//! A [`LyricsLibrary`] wraps a host-supplied [`LyricsSource`] (typically an
//! HTTP client for LRCLIB) and adds:
//! - **Caching** by lowercase `artist-track` key, so toggling ad-lib removal
//!   re-parses without fetching again
//! - **Normalization** of plain lyrics into timed LRC
//! - **Fallback** to bundled sample lyrics when nothing usable is found
//!
//! ## Sub-modules
//! - `lrclib` - LRCLIB response decoding and lyric selection
//! - `sample` - The bundled fallback song
//!
//! ## Example
//! ```rust
//! use typesync::lyrics::ParseOptions;
//! use typesync::source::{LyricsLibrary, LyricsOrigin, TrackQuery};
//! use typesync::TypesyncError;
//!
//! let source = |_: &TrackQuery| -> Result<Option<String>, TypesyncError> {
//!     Ok(Some("[00:01.00]hello\n".to_string()))
//! };
//! let mut library = LyricsLibrary::new(source);
//! let query = TrackQuery::new("Song", "Band");
//!
//! let first = library.load(&query, ParseOptions::default());
//! assert_eq!(first.origin, LyricsOrigin::Remote);
//! assert_eq!(first.track.len(), 1);
//!
//! let second = library.load(&query, ParseOptions::default());
//! assert_eq!(second.origin, LyricsOrigin::Cache);
//! ```
//!
//! ## Related Modules
//! - `lyrics` - Parses the text this module produces
//! - `session` - Drives loading on track and setting changes

pub mod lrclib;
pub mod sample;

use std::collections::HashMap;
use std::fmt;

use crate::error::TypesyncError;
use crate::lyrics::{parse_lrc, LyricTrack, ParseOptions};

/// The song to look lyrics up for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackQuery {
    pub track_name: String,
    pub artist_name: String,
}

impl TrackQuery {
    pub fn new(track_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artist_name: artist_name.into(),
        }
    }

    /// Lowercase `artist-track`, the key lyrics are cached under.
    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}",
            self.artist_name.trim().to_lowercase(),
            self.track_name.trim().to_lowercase()
        )
    }

    pub fn is_blank(&self) -> bool {
        self.track_name.trim().is_empty()
    }
}

impl fmt::Display for TrackQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artist_name.trim().is_empty() {
            write!(f, "{}", self.track_name)
        } else {
            write!(f, "{} - {}", self.artist_name, self.track_name)
        }
    }
}

/// Fetches raw lyric text for a song.
///
/// `Ok(None)` means the source answered but had nothing for this song.
/// The text may be LRC or plain lyrics.
pub trait LyricsSource {
    fn fetch(&self, query: &TrackQuery) -> Result<Option<String>, TypesyncError>;
}

impl<F> LyricsSource for F
where
    F: Fn(&TrackQuery) -> Result<Option<String>, TypesyncError>,
{
    fn fetch(&self, query: &TrackQuery) -> Result<Option<String>, TypesyncError> {
        self(query)
    }
}

/// Where a loaded track came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsOrigin {
    Remote,
    Cache,
    Fallback,
}

/// User-facing note attached to a fallback load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsNotice {
    NotFound,
    LoadFailed,
}

impl fmt::Display for LyricsNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LyricsNotice::NotFound => write!(f, "No lyrics found for this song"),
            LyricsNotice::LoadFailed => write!(f, "Failed to load lyrics"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedLyrics {
    pub track: LyricTrack,
    pub origin: LyricsOrigin,
    pub notice: Option<LyricsNotice>,
}

/// Caching, normalizing front for a [`LyricsSource`].
pub struct LyricsLibrary<S> {
    source: S,
    cache: HashMap<String, String>,
}

impl<S: LyricsSource> LyricsLibrary<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_cached(&self, query: &TrackQuery) -> bool {
        self.cache.contains_key(&query.cache_key())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Load and parse lyrics for `query`.
    ///
    /// Never fails: lookup errors and empty results fall back to the bundled
    /// sample and carry a notice for the user.
    pub fn load(&mut self, query: &TrackQuery, options: ParseOptions) -> LoadedLyrics {
        if query.is_blank() {
            return Self::fallback(options, None);
        }

        let key = query.cache_key();
        if let Some(text) = self.cache.get(&key) {
            tracing::debug!(key = %key, "lyrics_cache_hit");
            return LoadedLyrics {
                track: parse_lrc(text, options),
                origin: LyricsOrigin::Cache,
                notice: None,
            };
        }

        match self.source.fetch(query) {
            Ok(Some(raw)) if !raw.trim().is_empty() => {
                let text = lrclib::to_lrc_text(&raw);
                let track = parse_lrc(&text, options);
                if track.is_empty() {
                    tracing::warn!(query = %query, "lyrics_unparseable");
                    return Self::fallback(options, Some(LyricsNotice::NotFound));
                }
                tracing::info!(query = %query, lines = track.len(), "lyrics_loaded");
                self.cache.insert(key, text);
                LoadedLyrics {
                    track,
                    origin: LyricsOrigin::Remote,
                    notice: None,
                }
            }
            Ok(_) => {
                tracing::warn!(query = %query, "lyrics_not_found");
                Self::fallback(options, Some(LyricsNotice::NotFound))
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "lyrics_lookup_failed");
                Self::fallback(options, Some(LyricsNotice::LoadFailed))
            }
        }
    }

    fn fallback(options: ParseOptions, notice: Option<LyricsNotice>) -> LoadedLyrics {
        LoadedLyrics {
            track: sample::fallback_track(options),
            origin: LyricsOrigin::Fallback,
            notice,
        }
    }
}
