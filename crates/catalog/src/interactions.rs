//! Interaction logs: recently viewed, favorites and watchlist.
//!
//! Each log keeps movie ids unique. Favorites and the watchlist append new
//! entries at the end; recently viewed pushes to the front and keeps at
//! most [`MAX_RECENTLY_VIEWED`] entries, so index 0 is always the latest.

use crate::error::Result;
use crate::types::{InteractionRecord, MovieId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;

/// Maximum number of entries kept in the recently viewed log
pub const MAX_RECENTLY_VIEWED: usize = 20;

/// Which of the three logs a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    RecentlyViewed,
    Favorites,
    Watchlist,
}

impl LogKind {
    pub const ALL: [LogKind; 3] = [LogKind::RecentlyViewed, LogKind::Favorites, LogKind::Watchlist];

    /// Storage slot name, also the file stem used by `JsonFileStore`
    pub fn slot(&self) -> &'static str {
        match self {
            LogKind::RecentlyViewed => "recently-viewed",
            LogKind::Favorites => "favorites",
            LogKind::Watchlist => "watchlist",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot())
    }
}

/// An ordered log of interaction records with unique ids
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionLog {
    kind: LogKind,
    records: Vec<InteractionRecord>,
}

impl InteractionLog {
    /// Create an empty log
    pub fn new(kind: LogKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    /// Create a log from existing records.
    ///
    /// Duplicate ids are dropped (first occurrence wins) and the recently
    /// viewed log is capped.
    pub fn with_records(kind: LogKind, records: Vec<InteractionRecord>) -> Self {
        let mut log = Self::new(kind);
        log.records = normalize(kind, records);
        log
    }

    pub fn kind(&self) -> LogKind {
        self.kind
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Record an interaction, stamping recently viewed entries with now.
    ///
    /// Returns whether the log changed.
    pub fn add(&mut self, record: InteractionRecord) -> bool {
        self.add_at(record, Utc::now())
    }

    /// Same as [`add`](Self::add) with an explicit view timestamp
    pub fn add_at(&mut self, mut record: InteractionRecord, at: DateTime<Utc>) -> bool {
        match self.kind {
            LogKind::RecentlyViewed => {
                if self.records.first().is_some_and(|r| r.id == record.id) {
                    return false;
                }
                self.records.retain(|r| r.id != record.id);
                record.viewed_at = Some(at);
                self.records.insert(0, record);
                self.records.truncate(MAX_RECENTLY_VIEWED);
                true
            }
            LogKind::Favorites | LogKind::Watchlist => {
                if self.contains(record.id) {
                    return false;
                }
                self.records.push(record);
                true
            }
        }
    }

    /// Remove the record with `id`, returning whether one was present
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Export the log as a JSON array of records
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Replace the log's content with an exported JSON array.
    ///
    /// On a parse error the log is left untouched. Returns the number of
    /// records kept.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let records: Vec<InteractionRecord> = serde_json::from_str(json)?;
        self.records = normalize(self.kind, records);
        tracing::debug!(slot = %self.kind, count = self.records.len(), "Imported interaction log");
        Ok(self.records.len())
    }
}

fn normalize(kind: LogKind, records: Vec<InteractionRecord>) -> Vec<InteractionRecord> {
    let mut seen = HashSet::new();
    let mut records: Vec<InteractionRecord> =
        records.into_iter().filter(|r| seen.insert(r.id)).collect();
    if kind == LogKind::RecentlyViewed {
        records.truncate(MAX_RECENTLY_VIEWED);
    }
    records
}
