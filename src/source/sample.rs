//! Bundled fallback lyrics
//!
//! Loaded whenever the lyrics source has nothing for the requested song, so a
//! practice session always has something to type. The text is Jane Taylor's
//! "The Star" (1806), which is in the public domain.

use crate::lyrics::{parse_lrc, LyricTrack, ParseOptions};

pub const FALLBACK_TITLE: &str = "Twinkle, Twinkle, Little Star";
pub const FALLBACK_ARTIST: &str = "Traditional";

pub const FALLBACK_LRC: &str = "\
[ti:Twinkle, Twinkle, Little Star]
[ar:Traditional]
[00:01.00]Twinkle, twinkle, little star (twinkle)
[00:05.20]How I wonder what you are
[00:09.40]Up above the world so high
[00:13.60]Like a diamond in the sky (in the sky)
[00:17.80]Twinkle, twinkle, little star
[00:22.00]How I wonder what you are
[00:26.40]When the blazing sun is gone
[00:30.60]When he nothing shines upon
[00:34.80]Then you show your little light (oh)
[00:39.00]Twinkle, twinkle, all the night
[00:43.20](Twinkle, twinkle)
[00:47.40]How I wonder what you are
";

pub fn fallback_track(options: ParseOptions) -> LyricTrack {
    parse_lrc(FALLBACK_LRC, options)
}
