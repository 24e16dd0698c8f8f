//! Practice session
//!
//! Ties the pieces together for a host application: picks a video and
//! lyrics when the user changes song, keeps the sync engine's timer token,
//! and persists the ad-lib setting and per-video offsets.
//!
//! Operations that the user should hear about (fallback lyrics, a failed
//! video search, a preference write that did not stick) queue a
//! [`StatusNotice`]; hosts drain them with [`PracticeSession::take_notices`].

use std::fmt;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::error::TypesyncError;
use crate::lyrics::ParseOptions;
use crate::prefs::{PreferenceStore, Preferences};
use crate::search::{find_best_match, VideoSearch};
use crate::source::{LyricsLibrary, LyricsNotice, LyricsOrigin, LyricsSource, TrackQuery};
use crate::sync::{
    offset_delta_for_key, OffsetOutcome, Player, SyncEngine, SyncOffset, TickOutcome, TickToken,
    TypingOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusNotice {
    Lyrics(LyricsNotice),
    /// The search ran but matched nothing; the previous video stays.
    NoVideoFound,
    /// Every search query failed; the previous video stays.
    VideoSearchFailed,
    PreferencesNotSaved,
}

impl fmt::Display for StatusNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusNotice::Lyrics(notice) => write!(f, "{}", notice),
            StatusNotice::NoVideoFound => write!(f, "No video found, keeping the current one"),
            StatusNotice::VideoSearchFailed => {
                write!(f, "Video search failed, keeping the current one")
            }
            StatusNotice::PreferencesNotSaved => write!(f, "Could not save preferences"),
        }
    }
}

pub struct PracticeSession<L, V, S> {
    engine: SyncEngine,
    library: LyricsLibrary<L>,
    search: V,
    store: S,
    preferences: Preferences,
    query: TrackQuery,
    video_id: Option<String>,
    lyrics_origin: Option<LyricsOrigin>,
    token: Option<TickToken>,
    notices: Vec<StatusNotice>,
}

impl<L, V, S> PracticeSession<L, V, S>
where
    L: LyricsSource,
    V: VideoSearch,
    S: PreferenceStore,
{
    /// Build a session, reading preferences from `store`. Nothing is loaded
    /// until [`PracticeSession::load_lyrics`] or
    /// [`PracticeSession::change_track`] is called.
    pub fn new(
        config: EngineConfig,
        source: L,
        search: V,
        store: S,
    ) -> Result<Self, TypesyncError> {
        config.validate()?;
        let preferences = store.load()?;
        Ok(Self {
            engine: SyncEngine::new(config),
            library: LyricsLibrary::new(source),
            search,
            store,
            preferences,
            query: TrackQuery::new("", ""),
            video_id: None,
            lyrics_origin: None,
            token: None,
            notices: Vec::new(),
        })
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn query(&self) -> &TrackQuery {
        &self.query
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn lyrics_origin(&self) -> Option<LyricsOrigin> {
        self.lyrics_origin
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn take_notices(&mut self) -> Vec<StatusNotice> {
        std::mem::take(&mut self.notices)
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions::with_ad_libs_removed(self.preferences.remove_ad_libs)
    }

    /// Start ticking. Ticks keep working across track loads until
    /// [`PracticeSession::stop`].
    pub fn start(&mut self) {
        self.token = Some(self.engine.start());
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.token = None;
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    pub fn tick<P: Player + ?Sized>(&mut self, player: &mut P) -> TickOutcome {
        match self.token {
            Some(token) => self.engine.tick(token, player),
            None => TickOutcome::Stale,
        }
    }

    pub fn submit_text<P: Player + ?Sized>(
        &mut self,
        text: &str,
        now: Instant,
        player: &mut P,
    ) -> TypingOutcome {
        self.engine.submit_text(text, now, player)
    }

    /// Load lyrics for `query` into the engine, resetting progress.
    pub fn load_lyrics(&mut self, query: TrackQuery) -> LyricsOrigin {
        self.query = query;
        self.reload()
    }

    /// Drop cached lyrics and fetch the current song again.
    pub fn refresh_lyrics(&mut self) -> LyricsOrigin {
        self.library.clear_cache();
        self.reload()
    }

    /// Switch songs: find a video, load lyrics, reset, then apply the
    /// offset stored for the video.
    ///
    /// The engine is idle by the time the offset is applied, so the switch
    /// never resumes playback. When the search finds nothing or fails, the
    /// current video is kept and a notice is queued; lyrics are loaded
    /// either way.
    pub fn change_track<P: Player + ?Sized>(
        &mut self,
        track: &str,
        artist: &str,
        current_year: i32,
        player: &mut P,
    ) -> LyricsOrigin {
        let video_id = match find_best_match(&self.search, track, artist, current_year) {
            Ok(Some(video_id)) => Some(video_id),
            Ok(None) => {
                self.notices.push(StatusNotice::NoVideoFound);
                None
            }
            Err(e) => {
                tracing::warn!(track, artist, error = %e, "video_search_failed");
                self.notices.push(StatusNotice::VideoSearchFailed);
                None
            }
        };
        let origin = self.load_lyrics(TrackQuery::new(track, artist));
        if let Some(video_id) = video_id {
            self.set_video(&video_id, player);
        }
        origin
    }

    /// Make `video_id` current and apply the offset stored for it.
    pub fn set_video<P: Player + ?Sized>(&mut self, video_id: &str, player: &mut P) {
        let offset = self.preferences.offset_for(video_id);
        tracing::info!(video_id, offset = %offset, "video_changed");
        self.video_id = Some(video_id.to_string());
        self.engine.set_offset(offset, player);
    }

    /// Persist the ad-lib setting, then re-parse the current lyrics under it.
    pub fn set_remove_ad_libs(&mut self, remove: bool) -> LyricsOrigin {
        self.preferences.remove_ad_libs = remove;
        self.persist();
        self.reload()
    }

    pub fn set_offset<P: Player + ?Sized>(
        &mut self,
        offset: SyncOffset,
        player: &mut P,
    ) -> OffsetOutcome {
        if offset == self.engine.offset() {
            return OffsetOutcome::Updated;
        }
        let outcome = self.engine.set_offset(offset, player);
        if let Some(video_id) = self.video_id.clone() {
            self.preferences.set_offset(&video_id, self.engine.offset());
            self.persist();
        }
        outcome
    }

    pub fn adjust_offset<P: Player + ?Sized>(
        &mut self,
        delta: f64,
        player: &mut P,
    ) -> OffsetOutcome {
        let offset = self.engine.offset().nudged(delta);
        self.set_offset(offset, player)
    }

    /// Apply the offset key binding for `code`, if it has one.
    pub fn handle_key<P: Player + ?Sized>(
        &mut self,
        code: &str,
        shift: bool,
        player: &mut P,
    ) -> Option<OffsetOutcome> {
        let delta = offset_delta_for_key(code, shift)?;
        Some(self.adjust_offset(delta, player))
    }

    fn reload(&mut self) -> LyricsOrigin {
        let loaded = self.library.load(&self.query, self.parse_options());
        if let Some(notice) = loaded.notice {
            self.notices.push(StatusNotice::Lyrics(notice));
        }
        self.engine.load_track(loaded.track);
        if self.token.is_some() {
            self.token = Some(self.engine.start());
        }
        self.lyrics_origin = Some(loaded.origin);
        loaded.origin
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.preferences) {
            tracing::warn!(error = %e, "preferences_not_saved");
            self.notices.push(StatusNotice::PreferencesNotSaved);
        }
    }
}
