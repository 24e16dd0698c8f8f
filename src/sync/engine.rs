//! Sync engine state machine
//!
//! Owns the relationship between the video clock, the committed lyric line,
//! the user's typing progress and the play/pause decision.
//!
//! Every decision reads the engine's own fields at the moment it is made.
//! Nothing is captured when a timer is registered, so a keystroke handled
//! between two ticks is always visible to the next tick, and vice versa.

use std::time::Instant;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::lyrics::{LyricLine, LyricTrack};
use crate::typing::{Submission, TypingSession, TypingStats};

use super::offset::SyncOffset;
use super::player::{Player, PlayerState};

/// Handle issued by [`SyncEngine::start`].
///
/// A token only drives ticks until the engine is stopped, restarted or given
/// a new track. After that it is stale and ticking with it does nothing, so a
/// timer left over from a superseded song cannot touch the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

/// Coarse engine state, derived from the committed index and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncPhase {
    /// No line committed yet.
    Idle,
    /// Following playback.
    Advancing,
    /// Playback paused until the current line is typed.
    PausedForTyping,
    /// The last line is committed and typed; nothing left to advance to.
    Finished,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The token is stale or the engine is stopped.
    Stale,
    /// Nothing to sync against: empty track or unusable clock.
    Idle,
    /// No change this tick.
    Holding,
    /// A new line became current.
    Committed { index: usize },
    /// Playback was paused to wait for the line at `index` to be typed.
    PausedForTyping { index: usize },
}

/// What a keystroke did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingOutcome {
    /// There is no committed line to type against.
    NoActiveLine,
    /// The text was longer than the line and was ignored.
    Overflow,
    Accepted,
    /// The text was accepted and completed a line playback was waiting on.
    Resumed,
}

/// What an offset change did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOutcome {
    /// Offset stored; the engine was not waiting so nothing else changed.
    Updated,
    /// The corrected time points at a different line; jumped to it.
    Jumped { from: usize, to: usize },
    /// The corrected time is well past the current line; resumed anyway.
    Resumed,
    /// Still waiting for typing.
    Held,
}

/// Read-only view of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub committed_index: Option<usize>,
    pub waiting_for_typing: bool,
    pub sync_offset: f64,
    pub typed_text: String,
    pub active_text: Option<String>,
    pub phase: SyncPhase,
}

#[derive(Debug, Clone)]
pub struct SyncEngine {
    config: EngineConfig,
    track: LyricTrack,
    committed: Option<usize>,
    waiting_for_typing: bool,
    offset: SyncOffset,
    typing: TypingSession,
    generation: u64,
    running: bool,
}

impl SyncEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            track: LyricTrack::default(),
            committed: None,
            waiting_for_typing: false,
            offset: SyncOffset::ZERO,
            typing: TypingSession::new(),
            generation: 0,
            running: false,
        }
    }

    pub fn with_track(config: EngineConfig, track: LyricTrack) -> Self {
        let mut engine = Self::new(config);
        engine.track = track;
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn track(&self) -> &LyricTrack {
        &self.track
    }

    pub fn committed_index(&self) -> Option<usize> {
        self.committed
    }

    pub fn is_waiting_for_typing(&self) -> bool {
        self.waiting_for_typing
    }

    pub fn offset(&self) -> SyncOffset {
        self.offset
    }

    pub fn typed_text(&self) -> &str {
        self.typing.typed_text()
    }

    pub fn typing(&self) -> &TypingSession {
        &self.typing
    }

    pub fn typing_stats(&self, now: Instant) -> TypingStats {
        self.typing.stats(now)
    }

    pub fn active_line(&self) -> Option<&LyricLine> {
        self.committed.and_then(|i| self.track.get(i))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.committed.is_some()
            && self.committed == self.track.last_index()
            && self.current_line_satisfied()
    }

    pub fn phase(&self) -> SyncPhase {
        if self.committed.is_none() {
            SyncPhase::Idle
        } else if self.waiting_for_typing {
            SyncPhase::PausedForTyping
        } else if self.is_finished() {
            SyncPhase::Finished
        } else {
            SyncPhase::Advancing
        }
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            committed_index: self.committed,
            waiting_for_typing: self.waiting_for_typing,
            sync_offset: self.offset.seconds(),
            typed_text: self.typing.typed_text().to_string(),
            active_text: self.active_line().map(|line| line.text.clone()),
            phase: self.phase(),
        }
    }

    /// Raw playback time plus the look-ahead buffer minus the user offset.
    pub fn adjusted_time(&self, raw: f64) -> f64 {
        raw + self.config.lookahead_buffer - self.offset.seconds()
    }

    /// Begin ticking. Any previously issued token becomes stale.
    pub fn start(&mut self) -> TickToken {
        self.generation += 1;
        self.running = true;
        tracing::debug!(generation = self.generation, "sync_started");
        TickToken {
            generation: self.generation,
        }
    }

    /// Stop ticking. Every outstanding token becomes stale.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(generation = self.generation, "sync_stopped");
        }
        self.generation += 1;
        self.running = false;
    }

    /// Replace the track. Stops the engine and resets all progress; call
    /// [`SyncEngine::start`] again to resume ticking.
    pub fn load_track(&mut self, track: LyricTrack) {
        self.stop();
        tracing::info!(lines = track.len(), "track_loaded");
        self.track = track;
        self.reset();
    }

    /// Back to `Idle`: nothing committed, nothing typed, not waiting.
    pub fn reset(&mut self) {
        self.committed = None;
        self.waiting_for_typing = false;
        self.typing.reset();
        tracing::debug!("sync_reset");
    }

    /// One step of the control loop, run on the host's periodic timer.
    pub fn tick<P: Player + ?Sized>(&mut self, token: TickToken, player: &mut P) -> TickOutcome {
        if !self.running || token.generation != self.generation {
            return TickOutcome::Stale;
        }
        if self.track.is_empty() {
            return TickOutcome::Idle;
        }

        let raw = player.current_time();
        if !raw.is_finite() {
            return TickOutcome::Idle;
        }
        let adjusted = self.adjusted_time(raw);
        let target = self.track.index_at(adjusted);
        let state = player.state();

        if self.waiting_for_typing && state == PlayerState::Playing {
            // Someone other than the engine resumed playback.
            tracing::debug!(raw_time = raw, "playback_resumed_externally");
            self.waiting_for_typing = false;
        }

        // Pause at the next line's timestamp if the current one is unfinished.
        if let Some(current) = self.committed {
            if !self.waiting_for_typing && state == PlayerState::Playing {
                if let Some(next_time) = self.track.next_time(Some(current)) {
                    if adjusted >= next_time && !self.current_line_satisfied() {
                        return self.pause_for_typing(player, current, adjusted);
                    }
                }
            }
        }

        let Some(target) = target else {
            return TickOutcome::Holding;
        };

        match self.committed {
            None => {
                self.commit(0, adjusted);
                TickOutcome::Committed { index: 0 }
            }
            Some(current) if target > current => {
                if !self.current_line_satisfied() {
                    if !self.waiting_for_typing && state == PlayerState::Playing {
                        return self.pause_for_typing(player, current, adjusted);
                    }
                    return TickOutcome::Holding;
                }
                // One line at a time, even if playback is further ahead.
                let next = current + 1;
                self.commit(next, adjusted);
                TickOutcome::Committed { index: next }
            }
            Some(_) => TickOutcome::Holding,
        }
    }

    /// Propose new typed text for the current line.
    ///
    /// Resumes playback when the engine was waiting on this line and enough
    /// characters have now been typed.
    pub fn submit_text<P: Player + ?Sized>(
        &mut self,
        text: &str,
        now: Instant,
        player: &mut P,
    ) -> TypingOutcome {
        if self.committed.is_none() {
            return TypingOutcome::NoActiveLine;
        }
        if self.typing.submit(text, now) == Submission::Overflow {
            return TypingOutcome::Overflow;
        }

        if self.waiting_for_typing && self.current_line_satisfied() {
            player.play();
            self.waiting_for_typing = false;
            tracing::debug!(index = ?self.committed, "typing_complete_resumed");
            return TypingOutcome::Resumed;
        }
        TypingOutcome::Accepted
    }

    /// Set the sync offset and, if playback is waiting on typing, re-evaluate
    /// which line should be current under the corrected time. An offset equal
    /// to the current one changes nothing.
    pub fn set_offset<P: Player + ?Sized>(
        &mut self,
        offset: SyncOffset,
        player: &mut P,
    ) -> OffsetOutcome {
        let previous = self.offset;
        if offset == previous {
            // Clamped to the same value: nothing to re-evaluate.
            return OffsetOutcome::Updated;
        }
        self.offset = offset;
        tracing::debug!(from = %previous, to = %offset, "sync_offset_changed");

        if !self.waiting_for_typing || self.track.is_empty() {
            return OffsetOutcome::Updated;
        }
        let Some(current) = self.committed else {
            return OffsetOutcome::Updated;
        };
        let raw = player.current_time();
        if !raw.is_finite() {
            return OffsetOutcome::Held;
        }

        let adjusted = self.adjusted_time(raw);
        // The lookup already lands past the next line's timestamp when the
        // corrected time has crossed it, so a forward correction is a jump too.
        if let Some(expected) = self.track.index_at(adjusted) {
            if expected != current {
                self.commit(expected, adjusted);
                player.play();
                tracing::debug!(
                    from = current,
                    to = expected,
                    adjusted_time = adjusted,
                    "offset_jump"
                );
                return OffsetOutcome::Jumped {
                    from: current,
                    to: expected,
                };
            }
        }

        let line_start = self.track.get(current).map_or(0.0, |line| line.time);
        if adjusted - line_start > self.config.grace_period {
            self.waiting_for_typing = false;
            player.play();
            tracing::debug!(index = current, adjusted_time = adjusted, "offset_grace_resume");
            return OffsetOutcome::Resumed;
        }

        OffsetOutcome::Held
    }

    /// Shift the offset by `delta` seconds (clamped and rounded).
    pub fn nudge_offset<P: Player + ?Sized>(
        &mut self,
        delta: f64,
        player: &mut P,
    ) -> OffsetOutcome {
        let offset = self.offset.nudged(delta);
        self.set_offset(offset, player)
    }

    /// The first line never gates playback; every later one must be typed to
    /// its full length.
    fn current_line_satisfied(&self) -> bool {
        self.committed == Some(0) || self.typing.is_complete()
    }

    fn commit(&mut self, index: usize, adjusted: f64) {
        let text = self.track.get(index).map_or("", |line| line.text.as_str());
        self.typing.set_target(text);
        self.committed = Some(index);
        self.waiting_for_typing = false;
        tracing::debug!(index, adjusted_time = adjusted, "lyric_committed");
    }

    fn pause_for_typing<P: Player + ?Sized>(
        &mut self,
        player: &mut P,
        index: usize,
        adjusted: f64,
    ) -> TickOutcome {
        player.pause();
        self.waiting_for_typing = true;
        tracing::debug!(
            index,
            adjusted_time = adjusted,
            typed = self.typing.typed_len(),
            needed = self.typing.target_len(),
            "paused_for_typing"
        );
        TickOutcome::PausedForTyping { index }
    }
}
