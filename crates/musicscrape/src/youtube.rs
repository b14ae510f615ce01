//! YouTube search result pages.
//!
//! Results are not in the markup; the page assigns its whole initial state to
//! `ytInitialData` in an inline script. Video results are `videoRenderer`
//! objects nested at layout-dependent depths inside that state.

use crate::diagnostics::Diagnostics;
use crate::dom;
use crate::embedded::{self, Anchor};
use crate::error::ExtractError;
use crate::model::YoutubeResult;
use crate::urls::youtube_watch_url;
use scraper::Html;
use serde_json::Value;

const SCOPE: &str = "youtube search";

/// Start of the initial-state assignment.
pub const INITIAL_DATA: Anchor = Anchor::after("var ytInitialData = ");

/// Member name of video result objects.
pub const VIDEO_RENDERER: &str = "videoRenderer";

const VIDEO_ID: &str = "/videoId";
const TITLE: &str = "/title/runs/0/text";
const THUMBNAIL: &str = "/thumbnail/thumbnails/0/url";

/// Extract video results from a search page, in page order.
pub fn search_results(html: &str, diagnostics: &dyn Diagnostics) -> Vec<YoutubeResult> {
    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for script in dom::find(document.root_element(), "script", &[], true) {
        let Some(source) = dom::first_text(script) else {
            continue;
        };

        // Most scripts do not carry the state; only parse failures are worth
        // reporting.
        let state = match embedded::locate(source, &INITIAL_DATA) {
            Ok(state) => state,
            Err(ExtractError::AnchorNotFound(_)) => continue,
            Err(err) => {
                diagnostics.report(SCOPE, &err);
                continue;
            }
        };

        for renderer in embedded::find_members(&state, VIDEO_RENDERER) {
            match video(renderer) {
                Ok(result) => results.push(result),
                Err(err) => diagnostics.report(SCOPE, &err),
            }
        }
    }

    results
}

fn video(renderer: &Value) -> Result<YoutubeResult, ExtractError> {
    let id = string_at(renderer, VIDEO_ID)?;
    let title = string_at(renderer, TITLE)?;
    let thumbnail = string_at(renderer, THUMBNAIL)?;

    Ok(YoutubeResult {
        title: title.to_string(),
        url: youtube_watch_url(id),
        thumbnail_url: thumbnail.to_string(),
        playlist: None,
    })
}

fn string_at<'v>(renderer: &'v Value, pointer: &str) -> Result<&'v str, ExtractError> {
    renderer
        .pointer(pointer)
        .ok_or_else(|| ExtractError::missing(format!("{VIDEO_RENDERER}{pointer}")))?
        .as_str()
        .ok_or_else(|| ExtractError::mismatch(format!("{VIDEO_RENDERER}{pointer}"), "a string"))
}
