//! Request URLs for the pages the extractors understand.

use crate::text::percent_encode;

pub const BANDCAMP_SEARCH: &str = "https://bandcamp.com/search?q=";
pub const YOUTUBE_SEARCH: &str = "https://www.youtube.com/results?search_query=";
pub const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";

/// Bandcamp search page for `query`.
pub fn bandcamp_search_url(query: &str) -> String {
    format!("{BANDCAMP_SEARCH}{}", percent_encode(query))
}

/// Discography page of an artist, e.g. `https://myband.bandcamp.com/music`.
pub fn bandcamp_artist_info_url(artist_url: &str) -> String {
    format!("{artist_url}/music")
}

/// YouTube search page for `query`.
pub fn youtube_search_url(query: &str) -> String {
    format!("{YOUTUBE_SEARCH}{}", percent_encode(query))
}

/// Watch page of a video.
pub fn youtube_watch_url(video_id: &str) -> String {
    format!("{YOUTUBE_WATCH}{video_id}")
}
