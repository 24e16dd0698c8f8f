//! Video search and relevance scoring
//!
//! Picks the video most likely to be the official upload of a song. The host
//! supplies the actual search call through [`VideoSearch`]; this module
//! decides what to ask for and which result to trust.
//!
//! Queries run from most to least specific. The first query that returns any
//! results decides the match; a query that fails is logged and skipped.

use serde::Deserialize;

use crate::error::TypesyncError;

/// Results requested per query.
pub const RESULTS_PER_QUERY: usize = 5;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    #[serde(default)]
    pub description: String,
    /// RFC 3339 timestamp, e.g. `2009-10-25T06:57:33Z`.
    #[serde(default)]
    pub published_at: String,
}

impl VideoCandidate {
    pub fn published_year(&self) -> Option<i32> {
        self.published_at.get(..4)?.parse().ok()
    }
}

#[derive(Deserialize)]
struct SearchListing {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    published_at: String,
}

/// Decode a YouTube Data API `search.list` body. Items that are not videos
/// are skipped.
pub fn parse_search_response(body: &str) -> Result<Vec<VideoCandidate>, TypesyncError> {
    let listing: SearchListing =
        serde_json::from_str(body).map_err(|e| TypesyncError::InvalidResponse(e.to_string()))?;

    Ok(listing
        .items
        .into_iter()
        .filter_map(|item| {
            Some(VideoCandidate {
                video_id: item.id.video_id?,
                title: item.snippet.title,
                channel_title: item.snippet.channel_title,
                description: item.snippet.description,
                published_at: item.snippet.published_at,
            })
        })
        .collect())
}

/// Runs one search query.
pub trait VideoSearch {
    fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, TypesyncError>;
}

impl<F> VideoSearch for F
where
    F: Fn(&str, usize) -> Result<Vec<VideoCandidate>, TypesyncError>,
{
    fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, TypesyncError> {
        self(query, max_results)
    }
}

/// Query reformulations, most specific first.
pub fn search_queries(track: &str, artist: &str) -> Vec<String> {
    let base = format!("{} {}", track, artist);
    vec![
        format!("{} official music video", base),
        format!("{} official video", base),
        format!("{} music video", base),
        format!("{} official", base),
        base,
    ]
}

/// Heuristic relevance of `candidate` for the song. Never negative.
pub fn relevance_score(
    candidate: &VideoCandidate,
    track: &str,
    artist: &str,
    current_year: i32,
) -> u32 {
    let title = candidate.title.to_lowercase();
    let channel = candidate.channel_title.to_lowercase();
    let track = track.to_lowercase();
    let artist = artist.to_lowercase();

    let mut score: i32 = 0;

    if title.contains(&track) {
        score += 20;
    }
    if title.contains(&artist) {
        score += 20;
    }

    let significant = |s: &str| -> Vec<String> {
        s.split_whitespace()
            .filter(|w| w.chars().count() > 2)
            .map(str::to_string)
            .collect()
    };
    for word in significant(&track) {
        if title.contains(&word) {
            score += 5;
        }
    }
    for word in significant(&artist) {
        if title.contains(&word) {
            score += 5;
        }
        if channel.contains(&word) {
            score += 8;
        }
    }

    let official = title.contains("official");
    if official {
        score += 15;
    }
    if channel.contains("official") {
        score += 10;
    }
    if title.contains("music video") || title.contains("mv") {
        score += 10;
    }
    if channel.contains(&artist) {
        score += 12;
    }
    if channel.contains("vevo") {
        score += 15;
    }

    if title.contains("cover") && !official {
        score -= 15;
    }
    if title.contains("remix") && !official {
        score -= 10;
    }
    if title.contains("karaoke") {
        score -= 20;
    }
    if title.contains("instrumental") {
        score -= 10;
    }
    if title.contains("lyrics") && !official {
        score -= 5;
    }
    if title.contains("reaction") {
        score -= 25;
    }
    if title.contains("review") {
        score -= 25;
    }

    if let Some(year) = candidate.published_year() {
        let age = current_year - year;
        if (0..=15).contains(&age) {
            score += 2;
        }
        if age > 20 {
            score -= 3;
        }
    }

    score.max(0) as u32
}

/// Highest scoring candidate; the earliest one wins ties.
pub fn best_candidate<'a>(
    candidates: &'a [VideoCandidate],
    track: &str,
    artist: &str,
    current_year: i32,
) -> Option<(&'a VideoCandidate, u32)> {
    candidates
        .iter()
        .map(|c| (c, relevance_score(c, track, artist, current_year)))
        .fold(None, |best, (c, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((c, score)),
        })
}

/// Find the video id that best matches the song.
///
/// Returns `Ok(None)` when every query came back empty, and
/// [`TypesyncError::SearchFailure`] only when every query failed.
///
/// # Example
/// ```
/// use typesync::search::{find_best_match, VideoCandidate};
/// use typesync::TypesyncError;
///
/// let search = |_: &str, _: usize| -> Result<Vec<VideoCandidate>, TypesyncError> {
///     Ok(vec![
///         VideoCandidate {
///             video_id: "cover".into(),
///             title: "Song (cover)".into(),
///             channel_title: "Someone".into(),
///             description: String::new(),
///             published_at: "2020-01-01T00:00:00Z".into(),
///         },
///         VideoCandidate {
///             video_id: "real".into(),
///             title: "Band - Song (Official Video)".into(),
///             channel_title: "BandVEVO".into(),
///             description: String::new(),
///             published_at: "2012-01-01T00:00:00Z".into(),
///         },
///     ])
/// };
///
/// let best = find_best_match(&search, "Song", "Band", 2024).unwrap();
/// assert_eq!(best.as_deref(), Some("real"));
/// ```
pub fn find_best_match<S: VideoSearch + ?Sized>(
    search: &S,
    track: &str,
    artist: &str,
    current_year: i32,
) -> Result<Option<String>, TypesyncError> {
    let mut last_error = None;
    let mut any_succeeded = false;

    for query in search_queries(track, artist) {
        let results = match search.search(&query, RESULTS_PER_QUERY) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "video_query_failed");
                last_error = Some(e);
                continue;
            }
        };
        any_succeeded = true;

        if let Some((best, score)) = best_candidate(&results, track, artist, current_year) {
            tracing::info!(
                query = %query,
                video_id = %best.video_id,
                title = %best.title,
                score,
                "video_selected"
            );
            return Ok(Some(best.video_id.clone()));
        }
    }

    if !any_succeeded {
        let reason = last_error.map_or_else(|| "no queries run".to_string(), |e| e.to_string());
        return Err(TypesyncError::SearchFailure(reason));
    }
    tracing::warn!(track, artist, "no_video_found");
    Ok(None)
}

/// Whether `key` has the shape of a YouTube Data API key.
pub fn is_valid_api_key(key: &str) -> bool {
    (35..=45).contains(&key.len())
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn candidate(id: &str, title: &str, channel: &str, published: &str) -> VideoCandidate {
        VideoCandidate {
            video_id: id.to_string(),
            title: title.to_string(),
            channel_title: channel.to_string(),
            description: String::new(),
            published_at: published.to_string(),
        }
    }

    #[test]
    fn test_search_queries_order() {
        let queries = search_queries("Halo", "Beyonce");
        assert_eq!(
            queries,
            vec![
                "Halo Beyonce official music video",
                "Halo Beyonce official video",
                "Halo Beyonce music video",
                "Halo Beyonce official",
                "Halo Beyonce",
            ]
        );
    }

    #[test]
    fn test_score_official_vevo_upload() {
        let c = candidate(
            "a",
            "Beyonce - Halo (Official Video)",
            "BeyonceVEVO",
            "2009-10-25T06:57:33Z",
        );
        // track 20 + artist 20 + track word 5 + artist word 5 + artist in channel 8
        // + official 15 + artist channel 12 + vevo 15 + age 2
        assert_eq!(relevance_score(&c, "Halo", "Beyonce", 2024), 102);
    }

    #[test]
    fn test_score_penalties() {
        let cover = candidate("b", "Halo cover", "Someone", "");
        // track 20 + track word 5 - cover 15
        assert_eq!(relevance_score(&cover, "Halo", "Beyonce", 2024), 10);

        let official_cover = candidate("c", "Halo official cover", "Someone", "");
        // track 20 + word 5 + official 15
        assert_eq!(relevance_score(&official_cover, "Halo", "Beyonce", 2024), 40);

        let reaction = candidate("d", "reaction to something", "Someone", "");
        assert_eq!(relevance_score(&reaction, "Halo", "Beyonce", 2024), 0);
    }

    #[test]
    fn test_score_age_adjustment() {
        let recent = candidate("a", "Halo", "x", "2020-01-01T00:00:00Z");
        let old = candidate("b", "Halo", "x", "1990-01-01T00:00:00Z");
        let future = candidate("c", "Halo", "x", "2030-01-01T00:00:00Z");

        assert_eq!(relevance_score(&recent, "Halo", "Beyonce", 2024), 27);
        assert_eq!(relevance_score(&old, "Halo", "Beyonce", 2024), 22);
        assert_eq!(relevance_score(&future, "Halo", "Beyonce", 2024), 25);
    }

    #[test]
    fn test_score_is_case_insensitive() {
        let c = candidate("a", "HALO", "x", "");
        assert_eq!(relevance_score(&c, "halo", "nobody", 2024), 25);
    }

    #[test]
    fn test_best_candidate_first_wins_ties() {
        let results = vec![
            candidate("first", "Halo", "x", ""),
            candidate("second", "Halo", "y", ""),
        ];
        let (best, _) = best_candidate(&results, "Halo", "Beyonce", 2024).unwrap();
        assert_eq!(best.video_id, "first");
        assert!(best_candidate(&[], "Halo", "Beyonce", 2024).is_none());
    }

    #[test]
    fn test_find_best_match_skips_failed_and_empty_queries() {
        let seen = RefCell::new(Vec::new());
        let search = |query: &str, max: usize| -> Result<Vec<VideoCandidate>, TypesyncError> {
            assert_eq!(max, RESULTS_PER_QUERY);
            seen.borrow_mut().push(query.to_string());
            match seen.borrow().len() {
                1 => Err(TypesyncError::SearchFailure("quota".to_string())),
                2 => Ok(vec![]),
                _ => Ok(vec![candidate("hit", "Halo music video", "x", "")]),
            }
        };

        let result = find_best_match(&search, "Halo", "Beyonce", 2024);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_deref(), Some("hit"));
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_find_best_match_nothing_found() {
        let search =
            |_: &str, _: usize| -> Result<Vec<VideoCandidate>, TypesyncError> { Ok(vec![]) };
        assert_eq!(find_best_match(&search, "Halo", "Beyonce", 2024), Ok(None));
    }

    #[test]
    fn test_find_best_match_all_queries_fail() {
        let search = |_: &str, _: usize| -> Result<Vec<VideoCandidate>, TypesyncError> {
            Err(TypesyncError::InvalidResponse("403".to_string()))
        };
        let result = find_best_match(&search, "Halo", "Beyonce", 2024);
        assert!(matches!(result, Err(TypesyncError::SearchFailure(_))));
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "bnVUHWCynig"},
                    "snippet": {
                        "title": "Beyoncé - Halo",
                        "channelTitle": "BeyonceVEVO",
                        "description": "Music video",
                        "publishedAt": "2009-10-25T06:57:33Z"
                    }
                },
                {
                    "id": {"kind": "youtube#channel", "channelId": "UC123"},
                    "snippet": {"title": "Channel", "channelTitle": "Channel"}
                }
            ],
            "pageInfo": {"totalResults": 2, "resultsPerPage": 5}
        }"#;

        let result = parse_search_response(body);
        assert!(result.is_ok());
        let candidates = result.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].video_id, "bnVUHWCynig");
        assert_eq!(candidates[0].published_year(), Some(2009));
    }

    #[test]
    fn test_parse_search_response_rejects_garbage() {
        assert!(matches!(
            parse_search_response("{\"items\": 5}"),
            Err(TypesyncError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_is_valid_api_key() {
        assert!(is_valid_api_key("AIzaSyA1234567890abcdefghijklmnopqrstu"));
        assert!(!is_valid_api_key("short"));
        assert!(!is_valid_api_key("AIzaSyA1234567890abcdefghijklmnopqrs!u"));
        assert!(!is_valid_api_key(&"a".repeat(46)));
    }
}
