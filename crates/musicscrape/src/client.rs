//! Asynchronous fetch client.
//!
//! `MusicScrape` issues one GET per call, hands back a `RequestId`, and later
//! delivers exactly one [`ScrapeEvent`] for that id on the event channel:
//! the extracted results, or the transport error. Extraction runs on the
//! blocking pool since `scraper` documents are not `Send`.
//!
//! All request methods must be called from within a Tokio runtime.

use crate::bandcamp;
use crate::config::ScrapeConfig;
use crate::diagnostics::Diagnostics;
use crate::error::ScrapeError;
use crate::model::{BandcampResult, YoutubeResult};
use crate::urls;
use crate::youtube;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

/// Opaque handle of one request. Ids start at 1 and increase.
pub type RequestId = u32;

/// What a request fetches, and so which extractor reads the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    BandcampSearch,
    /// `band_url` is the artist root release links are resolved against.
    BandcampArtistInfo { band_url: String },
    BandcampAlbumInfo,
    YoutubeSearch,
}

/// Completion of one request.
#[derive(Debug)]
pub enum ScrapeEvent {
    Bandcamp {
        id: RequestId,
        results: Vec<BandcampResult>,
        /// Only ever set for artist requests.
        single_release: bool,
    },
    Youtube {
        id: RequestId,
        results: Vec<YoutubeResult>,
    },
    NetworkError {
        id: RequestId,
        error: ScrapeError,
    },
}

impl ScrapeEvent {
    pub fn id(&self) -> RequestId {
        match self {
            ScrapeEvent::Bandcamp { id, .. }
            | ScrapeEvent::Youtube { id, .. }
            | ScrapeEvent::NetworkError { id, .. } => *id,
        }
    }
}

type Running = Arc<Mutex<HashMap<RequestId, JoinHandle<()>>>>;

/// Fetches pages and feeds them to the extractors.
///
/// Dropping the client aborts every request still in flight; no events are
/// sent for those.
pub struct MusicScrape {
    http: reqwest::Client,
    diagnostics: Arc<dyn Diagnostics>,
    next_id: AtomicU32,
    running: Running,
    events: UnboundedSender<ScrapeEvent>,
}

impl MusicScrape {
    /// Build a client from configuration. Returns the client and the
    /// receiving end of its event channel.
    pub fn new(config: &ScrapeConfig) -> Result<(Self, UnboundedReceiver<ScrapeEvent>), ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(http, config.diagnostics()))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> (Self, UnboundedReceiver<ScrapeEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let client = Self {
            http,
            diagnostics,
            next_id: AtomicU32::new(1),
            running: Arc::new(Mutex::new(HashMap::new())),
            events,
        };
        (client, receiver)
    }

    pub fn bandcamp_search(&self, query: &str) -> RequestId {
        self.request(RequestKind::BandcampSearch, urls::bandcamp_search_url(query))
    }

    /// Releases of the artist at `artist_url` (e.g. `https://myband.bandcamp.com`).
    pub fn bandcamp_artist_info(&self, artist_url: &str) -> RequestId {
        let band_url = artist_url.trim_end_matches('/').to_string();
        let url = urls::bandcamp_artist_info_url(&band_url);
        self.request(RequestKind::BandcampArtistInfo { band_url }, url)
    }

    /// Streamable tracks of the album or track at `album_url`.
    pub fn bandcamp_album_info(&self, album_url: &str) -> RequestId {
        self.request(RequestKind::BandcampAlbumInfo, album_url.to_string())
    }

    pub fn youtube_search(&self, query: &str) -> RequestId {
        self.request(RequestKind::YoutubeSearch, urls::youtube_search_url(query))
    }

    /// Fetch `url` and extract it as `kind`.
    pub fn request(&self, kind: RequestKind, url: String) -> RequestId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let http = self.http.clone();
        let diagnostics = Arc::clone(&self.diagnostics);
        let events = self.events.clone();
        let running = Arc::clone(&self.running);

        // Held across the spawn so the task cannot deregister before it is
        // registered.
        let mut guard = self.running.lock().unwrap_or_else(|e| e.into_inner());
        let handle = tokio::spawn(async move {
            debug!(target: "musicscrape", id, %url, "request started");
            let event = match fetch(&http, &url).await {
                Ok(body) => {
                    tokio::task::spawn_blocking(move || extract(id, kind, &body, diagnostics.as_ref()))
                        .await
                        .unwrap_or_else(|err| ScrapeEvent::NetworkError {
                            id,
                            error: ScrapeError::Task(err.to_string()),
                        })
                }
                Err(error) => ScrapeEvent::NetworkError { id, error },
            };
            debug!(target: "musicscrape", id, "request finished");

            // Whoever removes the entry delivers the event: this task, or
            // `cancel` if it got there first.
            let owned = running.lock().unwrap_or_else(|e| e.into_inner()).remove(&id).is_some();
            if owned {
                let _ = events.send(event);
            }
        });
        guard.insert(id, handle);

        id
    }

    /// Abort a request still in flight. Its event is a
    /// `NetworkError` with [`ScrapeError::Cancelled`]. Returns `false` when
    /// the request already completed.
    pub fn cancel(&self, id: RequestId) -> bool {
        let handle = self.running.lock().unwrap_or_else(|e| e.into_inner()).remove(&id);
        match handle {
            Some(handle) => {
                handle.abort();
                let _ = self.events.send(ScrapeEvent::NetworkError {
                    id,
                    error: ScrapeError::Cancelled,
                });
                true
            }
            None => false,
        }
    }

    /// Number of requests that have not completed yet.
    pub fn in_flight(&self) -> usize {
        self.running.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl Drop for MusicScrape {
    fn drop(&mut self) {
        if let Ok(mut running) = self.running.lock() {
            for (_, handle) in running.drain() {
                handle.abort();
            }
        }
    }
}

async fn fetch(http: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

fn extract(id: RequestId, kind: RequestKind, body: &str, diagnostics: &dyn Diagnostics) -> ScrapeEvent {
    match kind {
        RequestKind::BandcampSearch => ScrapeEvent::Bandcamp {
            id,
            results: bandcamp::search_results(body, diagnostics),
            single_release: false,
        },
        RequestKind::BandcampArtistInfo { band_url } => {
            let page = bandcamp::artist_releases(&band_url, body, diagnostics);
            ScrapeEvent::Bandcamp {
                id,
                results: page.results,
                single_release: page.single_release,
            }
        }
        RequestKind::BandcampAlbumInfo => ScrapeEvent::Bandcamp {
            id,
            results: bandcamp::release_tracks(body, diagnostics),
            single_release: false,
        },
        RequestKind::YoutubeSearch => ScrapeEvent::Youtube {
            id,
            results: youtube::search_results(body, diagnostics),
        },
    }
}
