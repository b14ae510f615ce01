//! Bandcamp artist discography pages (`<artist>/music`).
//!
//! Artists with several releases get a grid of `<a href="/album/...">` and
//! `<a href="/track/...">` tiles. Artists with exactly one release are shown
//! that release directly instead, in which case the page is read as a
//! release page.

use super::release;
use crate::diagnostics::Diagnostics;
use crate::dom;
use crate::error::ExtractError;
use crate::model::{Album, BandcampResult, Track};
use crate::text::trimmed;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

const SCOPE: &str = "bandcamp artist";

/// Releases found on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistReleases {
    pub results: Vec<BandcampResult>,
    /// The page listed no releases and was read as a single release page;
    /// `results` then holds that release's tracks.
    pub single_release: bool,
}

/// Extract the releases of an artist page.
///
/// `band_url` is the artist root (`https://myband.bandcamp.com`); release
/// links on the page are relative to it.
pub fn artist_releases(band_url: &str, html: &str, diagnostics: &dyn Diagnostics) -> ArtistReleases {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let band_name = dom::find_first(root, "p", &[("id", "band-name-location")])
        .and_then(|location| dom::find_first(location, "span", &[("class", "title")]))
        .map(|title| dom::first_text_or(title, ""))
        .unwrap_or("");

    let results: Vec<BandcampResult> = dom::find(root, "a", &[], true)
        .into_iter()
        .filter_map(|anchor| {
            let href = dom::attr(anchor, "href");
            let kind = ReleaseLink::of(href)?;
            match release_tile(anchor, kind, band_url, href, band_name) {
                Ok(result) => Some(result),
                Err(err) => {
                    diagnostics.report(SCOPE, &err);
                    None
                }
            }
        })
        .collect();

    if !results.is_empty() {
        return ArtistReleases {
            results,
            single_release: false,
        };
    }

    tracing::debug!(target: "musicscrape", band_url, "no release tiles, reading page as a single release");
    ArtistReleases {
        results: release::tracks_in(html, root, diagnostics),
        single_release: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleaseLink {
    Album,
    Track,
}

impl ReleaseLink {
    fn of(href: &str) -> Option<Self> {
        if href.starts_with("/album/") {
            Some(Self::Album)
        } else if href.starts_with("/track/") {
            Some(Self::Track)
        } else {
            None
        }
    }
}

fn release_tile(
    anchor: ElementRef<'_>,
    kind: ReleaseLink,
    band_url: &str,
    href: &str,
    band_name: &str,
) -> Result<BandcampResult, ExtractError> {
    let title = dom::find_first(anchor, "p", &[("class", "title")])
        .ok_or_else(|| ExtractError::missing(format!("<p class='title'> in release link {href}")))?;
    let title = dom::first_text(title).ok_or_else(|| ExtractError::missing(format!("title text in release link {href}")))?;

    let art = dom::find_first(anchor, "div", &[("class", "art")])
        .ok_or_else(|| ExtractError::missing(format!("<div class='art'> in release link {href}")))?;
    let art_img =
        dom::find_first(art, "img", &[]).ok_or_else(|| ExtractError::missing(format!("<img> in release link {href}")))?;
    let art_url = dom::attr(art_img, "src");
    if art_url.is_empty() {
        return Err(ExtractError::missing(format!("art src in release link {href}")));
    }

    let band_name = trimmed(band_name);
    let url = format!("{band_url}{href}");
    let art_url = trimmed(art_url);

    Ok(match kind {
        ReleaseLink::Album => BandcampResult::Album(Album {
            band_name,
            album_name: trimmed(title),
            url,
            art_url,
        }),
        ReleaseLink::Track => BandcampResult::Track(Track {
            band_name,
            album_name: None,
            track_name: trimmed(title),
            track_num: None,
            url,
            art_url,
            stream: None,
        }),
    })
}
