//! Result records produced by the extractors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of Bandcamp entity a result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Band,
    Album,
    Track,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultKind::Band => "band",
            ResultKind::Album => "album",
            ResultKind::Track => "track",
        })
    }
}

/// A band (artist) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub band_name: String,
    /// Band root, e.g. `https://myband.bandcamp.com`.
    pub url: String,
    pub art_url: String,
}

/// An album release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub band_name: String,
    pub album_name: String,
    /// `<band root>/album/<slug>`.
    pub url: String,
    pub art_url: String,
}

/// A track, standalone or part of an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub band_name: String,
    /// Set when the track is known to belong to an album.
    pub album_name: Option<String>,
    pub track_name: String,
    /// Position on the album, when the page supplied one.
    pub track_num: Option<u32>,
    /// `<band root>/track/<slug>`. Empty for tracks read from a release
    /// page, which only lists stream files.
    pub url: String,
    pub art_url: String,
    /// Present only for tracks that can currently be streamed.
    pub stream: Option<Mp3Stream>,
}

/// A streamable MP3 rendition of a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mp3Stream {
    pub url: String,
    /// Whole seconds, truncated.
    pub duration_secs: u32,
}

/// One Bandcamp search, artist or release result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BandcampResult {
    Band(Band),
    Album(Album),
    Track(Track),
}

impl BandcampResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            BandcampResult::Band(_) => ResultKind::Band,
            BandcampResult::Album(_) => ResultKind::Album,
            BandcampResult::Track(_) => ResultKind::Track,
        }
    }

    pub fn band_name(&self) -> &str {
        match self {
            BandcampResult::Band(b) => &b.band_name,
            BandcampResult::Album(a) => &a.band_name,
            BandcampResult::Track(t) => &t.band_name,
        }
    }

    /// Album name, or `""` for bands and standalone tracks.
    pub fn album_name(&self) -> &str {
        match self {
            BandcampResult::Band(_) => "",
            BandcampResult::Album(a) => &a.album_name,
            BandcampResult::Track(t) => t.album_name.as_deref().unwrap_or(""),
        }
    }

    /// Track name, or `""` unless this is a track.
    pub fn track_name(&self) -> &str {
        match self {
            BandcampResult::Track(t) => &t.track_name,
            _ => "",
        }
    }

    /// Track number, or `-1` when not applicable or unknown.
    pub fn track_num(&self) -> i32 {
        match self {
            BandcampResult::Track(Track {
                track_num: Some(n), ..
            }) => i32::try_from(*n).unwrap_or(-1),
            _ => -1,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            BandcampResult::Band(b) => &b.url,
            BandcampResult::Album(a) => &a.url,
            BandcampResult::Track(t) => &t.url,
        }
    }

    pub fn art_url(&self) -> &str {
        match self {
            BandcampResult::Band(b) => &b.art_url,
            BandcampResult::Album(a) => &a.art_url,
            BandcampResult::Track(t) => &t.art_url,
        }
    }

    /// Stream URL, or `""` when the track cannot be streamed.
    pub fn mp3_url(&self) -> &str {
        self.stream().map(|s| s.url.as_str()).unwrap_or("")
    }

    /// Stream duration in whole seconds, or `-1`.
    pub fn mp3_duration_seconds(&self) -> i32 {
        self.stream()
            .map(|s| i32::try_from(s.duration_secs).unwrap_or(i32::MAX))
            .unwrap_or(-1)
    }

    fn stream(&self) -> Option<&Mp3Stream> {
        match self {
            BandcampResult::Track(t) => t.stream.as_ref(),
            _ => None,
        }
    }
}

/// One YouTube video search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeResult {
    /// Title as displayed on the search page.
    pub title: String,
    /// Watch URL, e.g. `https://www.youtube.com/watch?v=dQw4w9WgXcQ`.
    pub url: String,
    pub thumbnail_url: String,
    /// Playlist id for playlist results. Not filled in by the search
    /// extractor yet.
    pub playlist: Option<String>,
}
