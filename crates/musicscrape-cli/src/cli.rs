use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "musicscrape")]
#[command(version)]
#[command(about = "Search Bandcamp and YouTube from the terminal")]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Do not log skipped items
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log request progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Search Bandcamp for bands, albums and tracks
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Read a saved search page instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List the releases of a Bandcamp artist
    Artist {
        /// Artist root, e.g. https://myband.bandcamp.com
        artist_url: String,
        /// Read a saved artist page instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List the streamable tracks of a Bandcamp album or track
    Album {
        album_url: String,
        /// Read a saved release page instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Search YouTube for videos
    Youtube {
        #[arg(required = true)]
        query: Vec<String>,
        /// Read a saved search page instead of fetching
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Command {
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Command::Search { file, .. }
            | Command::Artist { file, .. }
            | Command::Album { file, .. }
            | Command::Youtube { file, .. } => file.as_ref(),
        }
    }
}
