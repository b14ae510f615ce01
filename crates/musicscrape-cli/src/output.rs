//! Result formatting for the terminal.

use musicscrape::{BandcampResult, YoutubeResult};
use std::io::IsTerminal;

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// One line per record: `[band]`, `[album]` or `[track]` tag, quoted names,
/// then the URL. Tracks with a stream also show number, duration and stream.
pub fn bandcamp_line(s: &Styled, result: &BandcampResult) -> String {
    match result {
        BandcampResult::Band(band) => {
            format!("  {}  \"{}\": {}", s.cyan("[band]"), band.band_name, s.dim(&band.url))
        }
        BandcampResult::Album(album) => format!(
            "  {} \"{}\": \"{}\": {}",
            s.cyan("[album]"),
            album.band_name,
            album.album_name,
            s.dim(&album.url)
        ),
        BandcampResult::Track(_) if result.mp3_url().is_empty() => format!(
            "  {} \"{}\": \"{}\": \"{}\": {}",
            s.cyan("[track]"),
            result.band_name(),
            result.album_name(),
            result.track_name(),
            s.dim(result.url())
        ),
        BandcampResult::Track(_) => format!(
            "  {} \"{}\": \"{}\": {} \"{}\" ({} s): {}",
            s.cyan("[track]"),
            result.band_name(),
            result.album_name(),
            result.track_num(),
            result.track_name(),
            result.mp3_duration_seconds(),
            s.dim(result.mp3_url())
        ),
    }
}

pub fn youtube_line(s: &Styled, result: &YoutubeResult) -> String {
    // Pad before styling; escape codes would count toward the width.
    let url = format!("{:<43}", result.url);
    format!("  {} {}", s.dim(&url), result.title)
}

/// Print a section title to stdout.
pub fn print_section(s: &Styled, title: &str) {
    println!("{}", s.bold(title));
}

/// Print JSON output to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicscrape::{Album, Band, Mp3Stream, Track};

    fn track(stream: Option<Mp3Stream>) -> BandcampResult {
        BandcampResult::Track(Track {
            band_name: "BandName".to_string(),
            album_name: Some("AlbumName".to_string()),
            track_name: "Song".to_string(),
            track_num: Some(3),
            url: String::new(),
            art_url: "https://f4.bcbits.com/img/a.jpg".to_string(),
            stream,
        })
    }

    #[test]
    fn test_band_line() {
        let band = BandcampResult::Band(Band {
            band_name: "BandName".to_string(),
            url: "https://bandname.bandcamp.com".to_string(),
            art_url: String::new(),
        });
        assert_eq!(
            bandcamp_line(&Styled::plain(), &band),
            "  [band]  \"BandName\": https://bandname.bandcamp.com"
        );
    }

    #[test]
    fn test_album_line() {
        let album = BandcampResult::Album(Album {
            band_name: "BandName".to_string(),
            album_name: "New Album".to_string(),
            url: "https://bandname.bandcamp.com/album/new-album".to_string(),
            art_url: String::new(),
        });
        assert_eq!(
            bandcamp_line(&Styled::plain(), &album),
            "  [album] \"BandName\": \"New Album\": https://bandname.bandcamp.com/album/new-album"
        );
    }

    #[test]
    fn test_streamable_track_line() {
        let result = track(Some(Mp3Stream {
            url: "https://t4.bcbits.com/stream/3".to_string(),
            duration_secs: 215,
        }));
        assert_eq!(
            bandcamp_line(&Styled::plain(), &result),
            "  [track] \"BandName\": \"AlbumName\": 3 \"Song\" (215 s): https://t4.bcbits.com/stream/3"
        );
    }

    #[test]
    fn test_search_track_line() {
        let result = track(None);
        assert_eq!(
            bandcamp_line(&Styled::plain(), &result),
            "  [track] \"BandName\": \"AlbumName\": \"Song\": "
        );
    }

    #[test]
    fn test_youtube_line() {
        let result = YoutubeResult {
            title: "A Video".to_string(),
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            thumbnail_url: String::new(),
            playlist: None,
        };
        assert_eq!(
            youtube_line(&Styled::plain(), &result),
            "  https://www.youtube.com/watch?v=dQw4w9WgXcQ A Video"
        );
    }

    #[test]
    fn test_youtube_columns_align_with_color() {
        let colored = Styled { use_color: true };
        let short = YoutubeResult {
            title: "Short".to_string(),
            url: "https://youtu.be/x".to_string(),
            thumbnail_url: String::new(),
            playlist: None,
        };

        let line = youtube_line(&colored, &short);
        let visible = line.replace(DIM, "").replace(RESET, "");
        assert_eq!(visible, format!("  {:<43} Short", "https://youtu.be/x"));
        assert_eq!(visible.find("Short"), Some(2 + 43 + 1));
    }

    #[test]
    fn test_plain_styling() {
        let s = Styled::plain();
        assert_eq!(s.bold("x"), "x");
        assert_eq!(s.cyan("x"), "x");
    }
}
