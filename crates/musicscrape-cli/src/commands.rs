//! Subcommand execution: fetch or read a page, extract, print.

use crate::cli::Command;
use crate::output::{self, Styled};
use anyhow::{Context, Result};
use musicscrape::{bandcamp, youtube, BandcampResult, Diagnostics, MusicScrape, ScrapeConfig, ScrapeEvent, YoutubeResult};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Records produced by one command.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Bandcamp {
        results: Vec<BandcampResult>,
        single_release: bool,
    },
    Youtube {
        results: Vec<YoutubeResult>,
    },
}

pub async fn run(command: &Command, config: &ScrapeConfig, json: bool) -> Result<()> {
    let outcome = match command.file() {
        Some(path) => from_file(command, path, config.diagnostics().as_ref())?,
        None => fetch(command, config).await?,
    };

    if json {
        output::print_json(&outcome);
    } else {
        print_outcome(&Styled::new(), command, &outcome);
    }
    Ok(())
}

fn from_file(command: &Command, path: &Path, diagnostics: &dyn Diagnostics) -> Result<Outcome> {
    let html = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(extract(command, &html, diagnostics))
}

/// Run the extractor matching `command` on a page already in memory.
pub fn extract(command: &Command, html: &str, diagnostics: &dyn Diagnostics) -> Outcome {
    match command {
        Command::Search { .. } => Outcome::Bandcamp {
            results: bandcamp::search_results(html, diagnostics),
            single_release: false,
        },
        Command::Artist { artist_url, .. } => {
            let page = bandcamp::artist_releases(artist_url.trim_end_matches('/'), html, diagnostics);
            Outcome::Bandcamp {
                results: page.results,
                single_release: page.single_release,
            }
        }
        Command::Album { .. } => Outcome::Bandcamp {
            results: bandcamp::release_tracks(html, diagnostics),
            single_release: false,
        },
        Command::Youtube { .. } => Outcome::Youtube {
            results: youtube::search_results(html, diagnostics),
        },
    }
}

async fn fetch(command: &Command, config: &ScrapeConfig) -> Result<Outcome> {
    let (client, mut events) = MusicScrape::new(config).context("failed to build HTTP client")?;

    let id = match command {
        Command::Search { query, .. } => client.bandcamp_search(&query.join(" ")),
        Command::Artist { artist_url, .. } => client.bandcamp_artist_info(artist_url),
        Command::Album { album_url, .. } => client.bandcamp_album_info(album_url),
        Command::Youtube { query, .. } => client.youtube_search(&query.join(" ")),
    };
    info!(id, "request sent");

    let event = events.recv().await.context("request ended without a result")?;
    match event {
        ScrapeEvent::Bandcamp {
            results, single_release, ..
        } => Ok(Outcome::Bandcamp {
            results,
            single_release,
        }),
        ScrapeEvent::Youtube { results, .. } => Ok(Outcome::Youtube { results }),
        ScrapeEvent::NetworkError { error, .. } => Err(anyhow::Error::new(error).context(format!("request {id} failed"))),
    }
}

fn print_outcome(s: &Styled, command: &Command, outcome: &Outcome) {
    match outcome {
        Outcome::Bandcamp {
            results,
            single_release,
        } => {
            let title = match command {
                Command::Artist { .. } if *single_release => "Single release",
                Command::Artist { .. } => "Releases",
                Command::Album { .. } => "Tracks",
                _ => "Search Results",
            };
            output::print_section(s, title);
            for result in results {
                println!("{}", output::bandcamp_line(s, result));
            }
        }
        Outcome::Youtube { results } => {
            output::print_section(s, "Youtube");
            for result in results {
                println!("{}", output::youtube_line(s, result));
            }
        }
    }
}
