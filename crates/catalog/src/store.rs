//! Persistence for the interaction logs.
//!
//! The recommender never reads storage directly; callers load a snapshot
//! through [`InteractionStore`] and pass the logs in explicitly.

use crate::error::Result;
use crate::interactions::{InteractionLog, LogKind};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Named-slot storage for the three interaction logs
pub trait InteractionStore: Send + Sync {
    /// Load one log; a slot that was never written loads as empty
    fn load(&self, kind: LogKind) -> Result<InteractionLog>;

    /// Overwrite one slot with `log`
    fn save(&self, log: &InteractionLog) -> Result<()>;

    fn clear(&self, kind: LogKind) -> Result<()> {
        self.save(&InteractionLog::new(kind))
    }

    /// Load all three logs at once
    fn load_snapshot(&self) -> Result<InteractionSnapshot> {
        Ok(InteractionSnapshot {
            recently_viewed: self.load(LogKind::RecentlyViewed)?,
            favorites: self.load(LogKind::Favorites)?,
            watchlist: self.load(LogKind::Watchlist)?,
        })
    }
}

/// The three logs as read at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSnapshot {
    pub recently_viewed: InteractionLog,
    pub favorites: InteractionLog,
    pub watchlist: InteractionLog,
}

impl InteractionSnapshot {
    pub fn empty() -> Self {
        Self {
            recently_viewed: InteractionLog::new(LogKind::RecentlyViewed),
            favorites: InteractionLog::new(LogKind::Favorites),
            watchlist: InteractionLog::new(LogKind::Watchlist),
        }
    }

    pub fn log(&self, kind: LogKind) -> &InteractionLog {
        match kind {
            LogKind::RecentlyViewed => &self.recently_viewed,
            LogKind::Favorites => &self.favorites,
            LogKind::Watchlist => &self.watchlist,
        }
    }

    /// Total number of interactions across the three logs
    pub fn total(&self) -> usize {
        self.recently_viewed.len() + self.favorites.len() + self.watchlist.len()
    }
}

/// Stores each slot as `<dir>/<slot>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, kind: LogKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.slot()))
    }
}

impl InteractionStore for JsonFileStore {
    fn load(&self, kind: LogKind) -> Result<InteractionLog> {
        let path = self.slot_path(kind);
        let mut log = InteractionLog::new(kind);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(slot = %kind, "No stored log, starting empty");
                return Ok(log);
            }
            Err(e) => return Err(e.into()),
        };

        if !contents.trim().is_empty() {
            log.import_json(&contents)?;
        }
        Ok(log)
    }

    fn save(&self, log: &InteractionLog) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(log.kind());
        fs::write(&path, log.to_json()?)?;
        debug!(slot = %log.kind(), count = log.len(), path = %path.display(), "Saved interaction log");
        Ok(())
    }
}
