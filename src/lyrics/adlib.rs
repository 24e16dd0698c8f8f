//! Ad-lib removal
//!
//! Strips parenthetical asides such as "(yeah)" or "(oh (oh))" from a lyric
//! line and tidies the whitespace and punctuation left behind.

const PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Remove parenthetical ad-libs from `text`.
///
/// Innermost balanced `(...)` groups are removed repeatedly until none remain,
/// so nested groups disappear from the inside out. Unbalanced parentheses are
/// left alone. Afterwards whitespace runs collapse to one space, whitespace in
/// front of punctuation is dropped, doubled commas collapse, and stray leading
/// commas are trimmed. The result is a fixed point: filtering it again changes
/// nothing.
///
/// # Example
/// ```
/// use typesync::remove_ad_libs;
///
/// assert_eq!(
///     remove_ad_libs("Now this looks like a job for me (yeah)"),
///     "Now this looks like a job for me"
/// );
/// assert_eq!(
///     remove_ad_libs("So everybody (oh (oh)) , just follow me"),
///     "So everybody, just follow me"
/// );
/// assert_eq!(remove_ad_libs("(Hey!)"), "");
/// ```
pub fn remove_ad_libs(text: &str) -> String {
    let mut current = text.to_string();
    while let Some(stripped) = strip_innermost_groups(&current) {
        current = stripped;
    }
    normalize_spacing(&current)
}

/// Removes every innermost `(...)` group (one containing no parentheses).
/// Returns `None` when there was nothing to remove.
fn strip_innermost_groups(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut open: Option<usize> = None;
    let mut removed = false;

    for c in text.chars() {
        match c {
            '(' => {
                // An earlier unmatched '(' is not innermost; keep it.
                open = Some(out.len());
                out.push(c);
            }
            ')' => match open.take() {
                Some(start) => {
                    out.truncate(start);
                    // Keep words on either side of the group apart.
                    out.push(' ');
                    removed = true;
                }
                None => out.push(c),
            },
            _ => out.push(c),
        }
    }

    removed.then_some(out)
}

fn normalize_spacing(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if PUNCTUATION.contains(&c) {
            while out.ends_with(' ') {
                out.pop();
            }
            if c == ',' && out.ends_with(',') {
                continue;
            }
        }
        out.push(c);
    }

    out.trim_start_matches(|c: char| c == ',' || c.is_whitespace())
        .trim_end()
        .to_string()
}
