//! Video player capability
//!
//! The engine drives playback through the [`Player`] trait only. Calls are
//! requests: after `play()` a real player may still report `Buffering` or
//! `Paused` on the next read.

use serde::{Deserialize, Serialize};

/// Playback state as reported by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    /// Map an embedded-player state code (-1, 0, 1, 2, 3, 5).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(PlayerState::Unstarted),
            0 => Some(PlayerState::Ended),
            1 => Some(PlayerState::Playing),
            2 => Some(PlayerState::Paused),
            3 => Some(PlayerState::Buffering),
            5 => Some(PlayerState::Cued),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            PlayerState::Unstarted => -1,
            PlayerState::Ended => 0,
            PlayerState::Playing => 1,
            PlayerState::Paused => 2,
            PlayerState::Buffering => 3,
            PlayerState::Cued => 5,
        }
    }
}

pub trait Player {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    fn state(&self) -> PlayerState;
    fn play(&mut self);
    fn pause(&mut self);
}

/// Deterministic in-memory player.
///
/// Its clock moves only through [`SimulatedPlayer::advance`] and only while
/// playing. It ends once the clock reaches `duration`. Play and pause
/// requests take effect immediately and are counted.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    time: f64,
    duration: f64,
    state: PlayerState,
    play_calls: usize,
    pause_calls: usize,
}

impl SimulatedPlayer {
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration,
            state: PlayerState::Cued,
            play_calls: 0,
            pause_calls: 0,
        }
    }

    /// Advance the clock by `seconds` if playing.
    pub fn advance(&mut self, seconds: f64) {
        if self.state != PlayerState::Playing {
            return;
        }
        self.time = (self.time + seconds).min(self.duration);
        if self.time >= self.duration {
            self.state = PlayerState::Ended;
        }
    }

    pub fn seek(&mut self, seconds: f64) {
        self.time = seconds.clamp(0.0, self.duration);
        if self.state == PlayerState::Ended && self.time < self.duration {
            self.state = PlayerState::Paused;
        }
    }

    /// Force a state, as an external actor (the user, the network) would.
    pub fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls
    }

    pub fn pause_calls(&self) -> usize {
        self.pause_calls
    }
}

impl Player for SimulatedPlayer {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn play(&mut self) {
        self.play_calls += 1;
        if self.time < self.duration {
            self.state = PlayerState::Playing;
        }
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        if self.state != PlayerState::Ended {
            self.state = PlayerState::Paused;
        }
    }
}
