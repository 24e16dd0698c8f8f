pub mod config;
pub mod error;
pub mod lyrics;
pub mod prefs;
pub mod search;
pub mod session;
pub mod source;
pub mod sync;
pub mod typing;

pub use config::EngineConfig;
pub use error::*;
pub use lyrics::{
    current_index, format_timestamp, next_line_time, parse_lrc, parse_lrc_bytes, remove_ad_libs,
    LyricLine, LyricTrack, ParseOptions,
};
pub use session::{PracticeSession, StatusNotice};
pub use sync::{Player, PlayerState, SimulatedPlayer, SyncEngine, SyncOffset, SyncSnapshot};
pub use typing::{TypingSession, TypingStats};

/// Parse LRC bytes and hand them to a fresh engine.
/// This is the main entry point for the library.
pub fn load_track(
    bytes: &[u8],
    options: ParseOptions,
    config: EngineConfig,
) -> Result<SyncEngine, TypesyncError> {
    config.validate()?;
    let track = parse_lrc_bytes(bytes, options)?;
    Ok(SyncEngine::with_track(config, track))
}
