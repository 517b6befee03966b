use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Resolution, ResolvedTrack, SourceTrack, UnresolvedTableRow};

/// Per-request item cap of the playlist add and remove endpoints.
pub const MAX_BATCH_SIZE: usize = 50;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Splits `items` into consecutive batches of at most `size` elements.
///
/// Concatenating the returned batches yields `items` again. A `size` of zero
/// is treated as one.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    items.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

/// Removes every parenthesized group from a title, nested ones included.
///
/// `"Song Name (Remix)"` becomes `"Song Name"` and `"Song (Live) Name"`
/// becomes `"Song Name"`. A stray `)` is dropped and an unclosed `(` drops
/// the rest of the title.
pub fn strip_parenthesized(title: &str) -> String {
    let mut stripped = String::with_capacity(title.len());
    let mut depth = 0usize;
    for c in title.chars() {
        match c {
            '(' => {
                if depth == 0 {
                    stripped.push(' ');
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    stripped.push(' ');
                } else {
                    depth -= 1;
                }
            }
            _ if depth == 0 => stripped.push(c),
            _ => {}
        }
    }
    collapse_whitespace(&stripped)
}

/// Trims and folds every whitespace run into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub fn literal_query(track: &SourceTrack) -> String {
    search_query(&track.title, &track.artist)
}

/// The query for the second search pass, or `None` if stripping
/// parentheses leaves the title unchanged.
pub fn fallback_query(track: &SourceTrack) -> Option<String> {
    let stripped = strip_parenthesized(&track.title);
    if stripped.is_empty() || stripped == collapse_whitespace(&track.title) {
        return None;
    }
    Some(search_query(&stripped, &track.artist))
}

fn search_query(title: &str, artist: &str) -> String {
    format!("{} {}", title, artist).trim().to_string()
}

/// Catalog URIs of the resolved tracks, in order, skipping unresolved ones.
pub fn insertable_uris(tracks: &[ResolvedTrack]) -> Vec<String> {
    tracks
        .iter()
        .filter_map(|t| t.uri().map(str::to_string))
        .collect()
}

/// Table rows for every track without a catalog URI.
///
/// `resolutions` is positional; a missing entry is reported as a plain
/// "no catalog match".
pub fn unresolved_rows(
    tracks: &[ResolvedTrack],
    resolutions: &[Resolution],
) -> Vec<UnresolvedTableRow> {
    tracks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.uri().is_none())
        .map(|(i, t)| UnresolvedTableRow {
            position: i + 1,
            title: t.title.clone(),
            artist: t.artist.clone(),
            reason: match resolutions.get(i) {
                Some(Resolution::Failed(reason)) => format!("search failed: {}", reason),
                _ => "no catalog match".to_string(),
            },
        })
        .collect()
}
