//! Musicscrape: extraction of music catalog records from Bandcamp and YouTube
//! pages.
//!
//! The extractors are pure functions from page text to records. They never
//! fail as a whole; structural problems with single items are handed to a
//! [`Diagnostics`] sink and the item is skipped.
//!
//! ```no_run
//! use musicscrape::{bandcamp, Silent};
//!
//! let html = std::fs::read_to_string("search.html").unwrap();
//! for result in bandcamp::search_results(&html, &Silent) {
//!     println!("{} {}", result.kind(), result.url());
//! }
//! ```
//!
//! [`MusicScrape`] fetches the pages itself and delivers results as
//! [`ScrapeEvent`]s on a channel.

pub mod bandcamp;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod dump;
pub mod embedded;
pub mod error;
pub mod model;
pub mod text;
pub mod urls;
pub mod youtube;

pub use client::{MusicScrape, RequestId, RequestKind, ScrapeEvent};
pub use config::ScrapeConfig;
pub use diagnostics::{Collected, Diagnostics, Silent, TracingDiagnostics};
pub use error::{ExtractError, ScrapeError};
pub use model::{Album, Band, BandcampResult, Mp3Stream, ResultKind, Track, YoutubeResult};
