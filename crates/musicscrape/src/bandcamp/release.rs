//! Bandcamp album and track pages.
//!
//! Band, title and cover art come from the markup. The track list only exists
//! as a `trackinfo: [...]` array inside an inline script, so the raw page text
//! is needed as well as the parsed document.

use crate::diagnostics::Diagnostics;
use crate::dom;
use crate::dump;
use crate::embedded::{self, Anchor};
use crate::error::ExtractError;
use crate::model::{BandcampResult, Mp3Stream, Track};
use crate::text::trimmed;
use scraper::{ElementRef, Html};
use serde_json::Value;

const SCOPE: &str = "bandcamp release";

/// The track manifest: `trackinfo: [{...}, ...],` inside the page script.
pub const TRACKINFO: Anchor = Anchor {
    prefix: "trackinfo: [{",
    prefix_keep: 2,
    terminator: Some(("}],", 2)),
};

/// Key of the stream file inside a manifest entry's `file` object.
pub const STREAM_FORMAT: &str = "mp3-128";

/// Streamable tracks of an album or track page, in manifest order.
pub fn release_tracks(html: &str, diagnostics: &dyn Diagnostics) -> Vec<BandcampResult> {
    let document = Html::parse_document(html);
    tracks_in(html, document.root_element(), diagnostics)
}

/// Shared with the artist page extractor, which already holds the parsed
/// document when it falls back to reading a single release.
pub(crate) fn tracks_in(html: &str, root: ElementRef<'_>, diagnostics: &dyn Diagnostics) -> Vec<BandcampResult> {
    let header = match ReleaseHeader::read(root) {
        Ok(header) => header,
        Err(err) => {
            diagnostics.report(SCOPE, &err);
            if tracing::enabled!(tracing::Level::TRACE) {
                tracing::trace!(target: "musicscrape", "release page outline:\n{}", dump::tree(root));
            }
            return Vec::new();
        }
    };

    let manifest = match embedded::locate(html, &TRACKINFO) {
        Ok(manifest) => manifest,
        Err(err) => {
            diagnostics.report(SCOPE, &err);
            return Vec::new();
        }
    };
    let Some(entries) = manifest.as_array() else {
        diagnostics.report(SCOPE, &ExtractError::mismatch("trackinfo", "an array"));
        return Vec::new();
    };

    let mut streamable = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match ManifestEntry::parse(i, entry) {
            Ok(Some(entry)) => streamable.push(entry),
            Ok(None) => {}
            Err(err) => {
                if tracing::enabled!(tracing::Level::TRACE) {
                    tracing::trace!(target: "musicscrape", "trackinfo[{i}]:\n{}", dump::json(entry));
                }
                diagnostics.report(SCOPE, &err);
            }
        }
    }

    // A multi-entry manifest is an album unless some track lacks a number.
    let is_album = entries.len() > 1 && streamable.iter().all(|e| e.numbered);
    let band_name = trimmed(header.band);
    let album_name = is_album.then(|| trimmed(header.title));

    streamable
        .into_iter()
        .map(|entry| {
            BandcampResult::Track(Track {
                band_name: band_name.clone(),
                album_name: album_name.clone(),
                track_name: entry.title,
                track_num: entry.track_num,
                url: String::new(),
                art_url: header.art_url.to_string(),
                stream: Some(Mp3Stream {
                    url: entry.mp3_url,
                    duration_secs: entry.duration_secs,
                }),
            })
        })
        .collect()
}

/// Identifying markup every release page must have.
struct ReleaseHeader<'a> {
    band: &'a str,
    title: &'a str,
    art_url: &'a str,
}

impl<'a> ReleaseHeader<'a> {
    fn read(root: ElementRef<'a>) -> Result<Self, ExtractError> {
        let name_section = dom::find_first(root, "div", &[("id", "name-section")])
            .ok_or_else(|| ExtractError::missing("<div id='name-section'>"))?;

        let title = dom::find_first(name_section, "h2", &[("class", "trackTitle")])
            .ok_or_else(|| ExtractError::missing("<h2 class='trackTitle'>"))?;
        let title = dom::first_text(title).ok_or_else(|| ExtractError::missing("text in <h2 class='trackTitle'>"))?;

        let artist = dom::find_first(name_section, "span", &[("itemprop", "byArtist")])
            .ok_or_else(|| ExtractError::missing("<span itemprop='byArtist'>"))?;
        let band = dom::first_text(artist).ok_or_else(|| ExtractError::missing("text in <span itemprop='byArtist'>"))?;

        let art = dom::find_first(root, "div", &[("id", "tralbumArt")])
            .ok_or_else(|| ExtractError::missing("<div id='tralbumArt'>"))?;
        let art_img =
            dom::find_first(art, "img", &[]).ok_or_else(|| ExtractError::missing("<img> in <div id='tralbumArt'>"))?;
        let art_url = dom::attr(art_img, "src");
        if art_url.is_empty() {
            return Err(ExtractError::missing("src of <img> in <div id='tralbumArt'>"));
        }

        Ok(Self { band, title, art_url })
    }
}

/// One streamable `trackinfo` entry.
struct ManifestEntry {
    title: String,
    mp3_url: String,
    duration_secs: u32,
    track_num: Option<u32>,
    /// Whether the entry has a numeric `track_num` at all.
    numbered: bool,
}

impl ManifestEntry {
    /// `Ok(None)` for tracks that are not currently streamable.
    fn parse(index: usize, entry: &Value) -> Result<Option<Self>, ExtractError> {
        let field = |name: &str| format!("trackinfo[{index}].{name}");

        let entry = entry
            .as_object()
            .ok_or_else(|| ExtractError::mismatch(format!("trackinfo[{index}]"), "an object"))?;

        let streaming = entry
            .get("streaming")
            .ok_or_else(|| ExtractError::missing(field("streaming")))?
            .as_f64()
            .ok_or_else(|| ExtractError::mismatch(field("streaming"), "a number"))?;
        if streaming == 0.0 {
            return Ok(None);
        }

        let title = entry
            .get("title")
            .ok_or_else(|| ExtractError::missing(field("title")))?
            .as_str()
            .ok_or_else(|| ExtractError::mismatch(field("title"), "a string"))?;

        let file = entry
            .get("file")
            .ok_or_else(|| ExtractError::missing(field("file")))?
            .as_object()
            .ok_or_else(|| ExtractError::mismatch(field("file"), "an object"))?;

        let duration = entry
            .get("duration")
            .ok_or_else(|| ExtractError::missing(field("duration")))?
            .as_f64()
            .ok_or_else(|| ExtractError::mismatch(field("duration"), "a number"))?;

        let mp3_url = file
            .get(STREAM_FORMAT)
            .ok_or_else(|| ExtractError::missing(field(&format!("file.{STREAM_FORMAT}"))))?
            .as_str()
            .ok_or_else(|| ExtractError::mismatch(field(&format!("file.{STREAM_FORMAT}")), "a string"))?;

        let track_num = entry.get("track_num").and_then(Value::as_f64);

        if title.is_empty() {
            return Err(ExtractError::missing(format!("{} (empty)", field("title"))));
        }
        if mp3_url.is_empty() {
            return Err(ExtractError::missing(format!("{} (empty)", field(&format!("file.{STREAM_FORMAT}")))));
        }

        Ok(Some(Self {
            title: title.to_string(),
            mp3_url: mp3_url.to_string(),
            // `as` saturates: negative and NaN durations become 0.
            duration_secs: duration as u32,
            track_num: track_num.filter(|n| *n >= 1.0).map(|n| n as u32),
            numbered: track_num.is_some(),
        }))
    }
}
