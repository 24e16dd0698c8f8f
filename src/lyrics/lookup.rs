//! Lyric lookup by playback time
//!
//! Pure functions over an ascending slice of lines. `None` plays the role of
//! "no line yet" (the query time precedes the first line, or the slice is
//! empty).

use super::types::LyricLine;

/// Returns the highest index `i` such that `lines[i].time <= time`.
///
/// Lines sharing the maximal timestamp resolve to the last of them. A
/// non-finite `time` never matches anything.
///
/// # Example
/// ```
/// use typesync::{current_index, LyricLine};
///
/// let lines = vec![
///     LyricLine::new(0.0, "a"),
///     LyricLine::new(2.0, "bb"),
///     LyricLine::new(4.0, "ccc"),
/// ];
///
/// assert_eq!(current_index(&lines, -0.5), None);
/// assert_eq!(current_index(&lines, 2.0), Some(1));
/// assert_eq!(current_index(&lines, 9.0), Some(2));
/// ```
pub fn current_index(lines: &[LyricLine], time: f64) -> Option<usize> {
    // partition_point needs the predicate to be true for a prefix, which holds
    // because lines are sorted ascending.
    let count = lines.partition_point(|line| line.time <= time);
    count.checked_sub(1)
}

/// Start time of the line after `index`.
///
/// With `index == None` this is the first line's time.
pub fn next_line_time(lines: &[LyricLine], index: Option<usize>) -> Option<f64> {
    let next = index.map_or(0, |i| i + 1);
    lines.get(next).map(|line| line.time)
}
