//! Diagnostics sinks for skipped items.
//!
//! Extractors never fail as a whole. Each time one drops an item, a track
//! entry, a script block or an entire page, it reports one line to the sink
//! it was given and continues.

use crate::error::ExtractError;
use std::sync::Mutex;

/// Receives one report per skip or abort decision.
pub trait Diagnostics: Send + Sync {
    /// `scope` names the extraction step, e.g. `"bandcamp search"`.
    fn report(&self, scope: &'static str, error: &ExtractError);
}

/// Emits each report as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, scope: &'static str, error: &ExtractError) {
        tracing::warn!(target: "musicscrape", scope, "{error}");
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn report(&self, _scope: &'static str, _error: &ExtractError) {}
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct Collected {
    reports: Mutex<Vec<(&'static str, ExtractError)>>,
}

impl Collected {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in order.
    pub fn reports(&self) -> Vec<(&'static str, ExtractError)> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Reports rendered as `"<scope>: <error>"` lines.
    pub fn lines(&self) -> Vec<String> {
        self.reports()
            .iter()
            .map(|(scope, err)| format!("{scope}: {err}"))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for Collected {
    fn report(&self, scope: &'static str, error: &ExtractError) {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((scope, error.clone()));
    }
}
