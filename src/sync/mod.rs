//! # Sync Module
//!
//! Keep a video, a lyric track and the user's typing in step.
//!
//! ## Purpose
//! On every tick of a host timer (nominally 100 ms) the [`SyncEngine`]:
//! 1. **Reads the clock** - raw playback time from the [`Player`]
//! 2. **Adjusts it** - adds the look-ahead buffer, subtracts the user's [`SyncOffset`]
//! 3. **Looks up the target line** - latest line at or before the adjusted time
//! 4. **Gates playback** - pauses when the next line is due but the current
//!    one is not typed yet, otherwise commits the next line
//!
//! Keystrokes go through [`SyncEngine::submit_text`], which resumes playback
//! as soon as the line playback is waiting on has been typed to full length.
//!
//! ## Sub-modules
//! - `engine` - The state machine, its outcomes and snapshot
//! - `player` - The player capability trait and a simulated player
//! - `offset` - The clamped, rounded user offset
//!
//! ## Example
//! ```rust
//! use typesync::lyrics::{parse_lrc, ParseOptions};
//! use typesync::sync::{Player, SimulatedPlayer, SyncEngine, TickOutcome};
//! use typesync::EngineConfig;
//!
//! let track = parse_lrc("[00:00.00]a\n[00:02.00]bb\n[00:04.00]ccc\n", ParseOptions::default());
//! let mut engine = SyncEngine::with_track(EngineConfig::default(), track);
//! let mut player = SimulatedPlayer::new(10.0);
//! player.play();
//!
//! let token = engine.start();
//! assert_eq!(engine.tick(token, &mut player), TickOutcome::Committed { index: 0 });
//!
//! player.advance(1.8);
//! assert_eq!(engine.tick(token, &mut player), TickOutcome::Committed { index: 1 });
//!
//! player.advance(2.0);
//! assert_eq!(engine.tick(token, &mut player), TickOutcome::PausedForTyping { index: 1 });
//! assert!(engine.is_waiting_for_typing());
//! ```
//!
//! ## States
//!
//! `Idle` -> `Advancing` -> `PausedForTyping` -> `Advancing` ... -> `Finished`
//!
//! - The committed index only moves forward one line at a time, except on
//!   reset, track change, or an offset correction while waiting
//! - Completion is measured by length: typing enough characters unblocks
//!   playback even if some are wrong
//! - The first line never blocks playback
//!
//! ## Related Modules
//! - `lyrics` - Track model and lookup
//! - `typing` - Typed text and metrics owned by the engine

mod engine;
mod offset;
mod player;


pub use engine::{
    OffsetOutcome, SyncEngine, SyncPhase, SyncSnapshot, TickOutcome, TickToken, TypingOutcome,
};
pub use offset::{offset_delta_for_key, SyncOffset, COARSE_STEP, FINE_STEP, MAX_OFFSET, MIN_OFFSET};
pub use player::{Player, PlayerState, SimulatedPlayer};
