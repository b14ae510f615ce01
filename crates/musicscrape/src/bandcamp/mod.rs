//! Bandcamp page extractors.
//!
//! - [`search`]: search result pages.
//! - [`artist`]: artist discography pages.
//! - [`release`]: album and track pages.

pub mod artist;
pub mod release;
pub mod search;

#[cfg(test)]
mod fixtures;

pub use artist::{artist_releases, ArtistReleases};
pub use release::release_tracks;
pub use search::search_results;
