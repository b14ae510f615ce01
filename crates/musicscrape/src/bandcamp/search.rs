//! Bandcamp search result pages.
//!
//! Results are `<li class="searchresult band|album|track">` items of the
//! `<ul class="result-items">` list. Each item carries the entity URL, a
//! heading, cover art, and for albums and tracks a prose subhead naming the
//! band ("by X") and, for tracks, the album ("from Y by X").

use crate::diagnostics::Diagnostics;
use crate::dom;
use crate::dump;
use crate::error::ExtractError;
use crate::model::{Album, Band, BandcampResult, Track};
use crate::text::{split_nonempty, trimmed};
use scraper::{ElementRef, Html};

const SCOPE: &str = "bandcamp search";
const RESULT_CLASS_PREFIX: &str = "searchresult ";

/// Extract band, album and track results from a search page, in page order.
///
/// Returns an empty list when the page has no result list. Items that do not
/// have every required part are reported and skipped.
pub fn search_results(html: &str, diagnostics: &dyn Diagnostics) -> Vec<BandcampResult> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let Some(list) = dom::find_first(root, "ul", &[("class", "result-items")]) else {
        diagnostics.report(SCOPE, &ExtractError::missing("<ul class='result-items'>"));
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(target: "musicscrape", "search page outline:\n{}", dump::tree(root));
        }
        return Vec::new();
    };

    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|item| item.value().name() == "li")
        .filter_map(|item| match parse_item(item) {
            Ok(result) => Some(result),
            Err(err) => {
                diagnostics.report(SCOPE, &err);
                None
            }
        })
        .collect()
}

fn parse_item(item: ElementRef<'_>) -> Result<BandcampResult, ExtractError> {
    let class = dom::attr(item, "class");
    let kind = class
        .strip_prefix(RESULT_CLASS_PREFIX)
        .ok_or_else(|| ExtractError::mismatch(format!("result class {class:?}"), "'searchresult <kind>'"))?;
    if !matches!(kind, "band" | "album" | "track") {
        return Err(ExtractError::mismatch(
            format!("result kind {kind:?}"),
            "one of band, album, track",
        ));
    }

    let info = dom::find_first(item, "div", &[("class", "result-info")])
        .ok_or_else(|| ExtractError::missing("<div class='result-info'>"))?;

    let item_url = dom::find_first(info, "div", &[("class", "itemurl")])
        .ok_or_else(|| ExtractError::missing("<div class='itemurl'>"))?;
    let url = dom::first_text(item_url).ok_or_else(|| ExtractError::missing("text in <div class='itemurl'>"))?;

    let heading = dom::find_first(info, "div", &[("class", "heading")])
        .ok_or_else(|| ExtractError::missing("<div class='heading'>"))?;
    let heading = dom::first_text(heading).ok_or_else(|| ExtractError::missing("text in <div class='heading'>"))?;

    let art = dom::find_first(item, "div", &[("class", "art")])
        .ok_or_else(|| ExtractError::missing("<div class='art'>"))?;
    let art_img = dom::find_first(art, "img", &[]).ok_or_else(|| ExtractError::missing("<img> in art"))?;
    let art_url = dom::attr(art_img, "src");
    if art_url.is_empty() {
        return Err(ExtractError::missing("src of art <img>"));
    }

    let subhead = dom::find_first(info, "div", &[("class", "subhead")])
        .map(|node| dom::first_text_or(node, ""))
        .unwrap_or("");

    let url = trimmed(url);
    let art_url = art_url.to_string();

    let result = match kind {
        "band" => BandcampResult::Band(Band {
            band_name: trimmed(heading),
            url,
            art_url,
        }),
        "album" => BandcampResult::Album(Album {
            band_name: band_from_album_subhead(subhead)?,
            album_name: trimmed(heading),
            url,
            art_url,
        }),
        _ => {
            let (album_name, band_name) = parse_track_subhead(subhead)?;
            BandcampResult::Track(Track {
                band_name,
                album_name,
                track_name: trimmed(heading),
                track_num: None,
                url,
                art_url,
                stream: None,
            })
        }
    };

    Ok(result)
}

/// `"<anything> by <band>"` → band.
fn band_from_album_subhead(subhead: &str) -> Result<String, ExtractError> {
    if subhead.is_empty() {
        return Err(ExtractError::missing("album subhead"));
    }
    match split_nonempty(subhead, "by").as_slice() {
        [_, band] => Ok(trimmed(band)),
        _ => Err(ExtractError::mismatch(
            format!("album subhead {subhead:?}"),
            "'<album> by <band>'",
        )),
    }
}

/// Track subheads come as `"from <album> by <band>"` or `"<album> by <band>"`.
/// The album name is only kept in the second form.
fn parse_track_subhead(subhead: &str) -> Result<(Option<String>, String), ExtractError> {
    if subhead.is_empty() {
        return Err(ExtractError::missing("track subhead"));
    }

    let from_parts = split_nonempty(subhead, "from");
    let last = from_parts.last().copied().unwrap_or("");
    match split_nonempty(last, "by").as_slice() {
        [album, band] => {
            // "from <album>" subheads leave the album name unset.
            let album_name = (from_parts.len() == 1).then(|| trimmed(album));
            Ok((album_name, trimmed(band)))
        }
        _ => Err(ExtractError::mismatch(
            format!("track subhead {subhead:?}"),
            "'[from] <album> by <band>'",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Collected, Silent};
    use crate::model::ResultKind;

    fn item(class: &str, heading: &str, subhead: Option<&str>, url: &str, art: &str) -> String {
        let subhead = subhead
            .map(|s| format!(r#"<div class="subhead">{s}</div>"#))
            .unwrap_or_default();
        format!(
            r#"
            <li class="{class}">
                <a class="artcont" href="{url}">
                    <div class="art"><img src="{art}"></div>
                </a>
                <div class="result-info">
                    <div class="itemtype">{class}</div>
                    <div class="heading">
                        <a href="{url}">{heading}</a>
                    </div>
                    {subhead}
                    <div class="itemurl">
                        <a href="{url}">{url}</a>
                    </div>
                </div>
            </li>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>Search</title></head><body>
            <div class="search"><ul class="result-items">{}</ul></div>
            </body></html>"#,
            items.join("\n")
        )
    }

    fn fixture() -> String {
        page(&[
            item(
                "searchresult band",
                "BandName",
                Some("Portland, Oregon"),
                "https://bandname.bandcamp.com",
                "https://f4.bcbits.com/img/0001.jpg",
            ),
            item(
                "searchresult album",
                "New Album",
                Some("New Album by BandName"),
                "https://bandname.bandcamp.com/album/new-album",
                "https://f4.bcbits.com/img/a0002.jpg",
            ),
            item(
                "searchresult track",
                "Track",
                Some("Track from AlbumName by BandName"),
                "https://bandname.bandcamp.com/track/track",
                "https://f4.bcbits.com/img/a0003.jpg",
            ),
        ])
    }

    #[test]
    fn test_band_album_track() {
        let results = search_results(&fixture(), &Silent);
        assert_eq!(results.len(), 3);

        let band = &results[0];
        assert_eq!(band.kind(), ResultKind::Band);
        assert_eq!(band.band_name(), "BandName");
        assert_eq!(band.album_name(), "");
        assert_eq!(band.track_name(), "");
        assert_eq!(band.track_num(), -1);
        assert_eq!(band.url(), "https://bandname.bandcamp.com");
        assert_eq!(band.art_url(), "https://f4.bcbits.com/img/0001.jpg");
        assert_eq!(band.mp3_url(), "");
        assert_eq!(band.mp3_duration_seconds(), -1);

        let album = &results[1];
        assert_eq!(album.kind(), ResultKind::Album);
        assert_eq!(album.band_name(), "BandName");
        assert_eq!(album.album_name(), "New Album");
        assert_eq!(album.track_name(), "");
        assert_eq!(album.track_num(), -1);
        assert_eq!(album.url(), "https://bandname.bandcamp.com/album/new-album");
        assert_eq!(album.mp3_duration_seconds(), -1);

        let track = &results[2];
        assert_eq!(track.kind(), ResultKind::Track);
        assert_eq!(track.band_name(), "BandName");
        assert_eq!(track.album_name(), "");
        assert_eq!(track.track_name(), "Track");
        assert_eq!(track.track_num(), -1);
        assert_eq!(track.url(), "https://bandname.bandcamp.com/track/track");
        assert_eq!(track.art_url(), "https://f4.bcbits.com/img/a0003.jpg");
        assert_eq!(track.mp3_url(), "");
        assert_eq!(track.mp3_duration_seconds(), -1);
    }

    #[test]
    fn test_track_subhead_without_from_keeps_album() {
        let html = page(&[item(
            "searchresult track",
            "Song",
            Some("AlbumName by BandName"),
            "https://bandname.bandcamp.com/track/song",
            "https://f4.bcbits.com/img/a0004.jpg",
        )]);
        let results = search_results(&html, &Silent);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].album_name(), "AlbumName");
        assert_eq!(results[0].band_name(), "BandName");
    }

    #[test]
    fn test_missing_result_list() {
        let sink = Collected::new();
        let results = search_results("<html><body><p>No results</p></body></html>", &sink);
        assert!(results.is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_bad_items_are_skipped_individually() {
        let html = page(&[
            item(
                "searchresult label",
                "Label",
                None,
                "https://label.bandcamp.com",
                "https://f4.bcbits.com/img/l.jpg",
            ),
            item(
                "searchresult album",
                "Ambiguous",
                Some("Abbey Road by Someone"),
                "https://someone.bandcamp.com/album/abbey-road",
                "https://f4.bcbits.com/img/a.jpg",
            ),
            item(
                "searchresult album",
                "No Subhead",
                None,
                "https://x.bandcamp.com/album/no-subhead",
                "https://f4.bcbits.com/img/b.jpg",
            ),
            item("searchresult band", "No Art", None, "https://noart.bandcamp.com", ""),
            item(
                "searchresult band",
                "Kept",
                None,
                "https://kept.bandcamp.com",
                "https://f4.bcbits.com/img/k.jpg",
            ),
        ]);
        let sink = Collected::new();
        let results = search_results(&html, &sink);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].band_name(), "Kept");
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_missing_heading_text() {
        let html = page(&[r#"<li class="searchresult band">
                <div class="art"><img src="https://f4.bcbits.com/img/x.jpg"></div>
                <div class="result-info">
                    <div class="heading">   </div>
                    <div class="itemurl">https://x.bandcamp.com</div>
                </div>
            </li>"#
            .to_string()]);
        let sink = Collected::new();
        assert!(search_results(&html, &sink).is_empty());
        assert_eq!(sink.lines(), vec!["bandcamp search: missing text in <div class='heading'>"]);
    }

    #[test]
    fn test_unprefixed_item_is_reported() {
        let html = page(&[r#"<li class="ad">buy stuff</li>"#.to_string()]);
        let sink = Collected::new();
        assert!(search_results(&html, &sink).is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let html = fixture();
        assert_eq!(search_results(&html, &Silent), search_results(&html, &Silent));
    }

    #[test]
    fn test_parse_track_subhead() {
        assert_eq!(
            parse_track_subhead("from AlbumName by BandName").unwrap(),
            (None, "BandName".to_string())
        );
        assert_eq!(
            parse_track_subhead("AlbumName by BandName").unwrap(),
            (Some("AlbumName".to_string()), "BandName".to_string())
        );
        assert!(parse_track_subhead("by BandName").is_err());
        assert!(parse_track_subhead("").is_err());
    }
}
