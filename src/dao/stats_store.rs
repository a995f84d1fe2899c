//! Per-player answer records, guarded by a single reader/writer lock and
//! persisted as one JSON snapshot.

use std::{
    collections::HashSet,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{debug, info};

use crate::dao::{
    models::{PlayerStats, StatsSnapshot},
    storage::{StorageError, StorageResult},
};

/// Thread-safe store of every player's answers.
#[derive(Debug)]
pub struct PlayerStatsStore {
    stats: RwLock<StatsSnapshot>,
    save_path: PathBuf,
    overwrite: bool,
}

impl PlayerStatsStore {
    /// Empty store bound to `save_path`, overwriting the file on save.
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            stats: RwLock::new(StatsSnapshot::new()),
            save_path: save_path.into(),
            overwrite: true,
        }
    }

    /// Choose whether [`PlayerStatsStore::save_stats`] may replace an existing file.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// File read by [`PlayerStatsStore::load_stats`] and written by
    /// [`PlayerStatsStore::save_stats`].
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Record `offer` for `question_id`, replacing any previous answer to it.
    ///
    /// Offers are not bounded here; see [`PlayerStats::total_money`] for how the total behaves.
    pub fn update_stats(&self, question_id: &str, player_id: &str, offer: u64) -> PlayerStats {
        let mut stats = self.write();
        let record = stats.entry(player_id.to_string()).or_default();
        record.answered.insert(question_id.to_string(), offer);
        debug!(
            player_id,
            question_id,
            offer,
            total = record.total_money(),
            "answer recorded"
        );
        record.clone()
    }

    /// Current record of `player_id`, or an empty one.
    pub fn get_stats(&self, player_id: &str) -> PlayerStats {
        self.read().get(player_id).cloned().unwrap_or_default()
    }

    /// Copy of the whole mapping.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.read().clone()
    }

    /// Persist the in-memory mapping to the configured path.
    pub fn save_stats(&self) -> StorageResult<()> {
        let stats = self.write();
        save_snapshot(&stats, &self.save_path, self.overwrite)?;
        info!(path = %self.save_path.display(), players = stats.len(), "stats saved");
        Ok(())
    }

    /// Replace the in-memory mapping with the one on disk.
    ///
    /// A missing file yields an empty mapping. On any other failure the current
    /// mapping is kept. Returns every question id answered in the loaded snapshot.
    pub fn load_stats(&self) -> StorageResult<HashSet<String>> {
        let mut stats = self.write();
        let loaded = load_snapshot(&self.save_path)?.unwrap_or_default();
        let answered = answered_question_ids(&loaded);
        info!(
            path = %self.save_path.display(),
            players = loaded.len(),
            answered = answered.len(),
            "stats loaded"
        );
        *stats = loaded;
        Ok(answered)
    }

    fn read(&self) -> RwLockReadGuard<'_, StatsSnapshot> {
        self.stats.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StatsSnapshot> {
        self.stats.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Every question id that appears in any player's answers.
pub fn answered_question_ids(stats: &StatsSnapshot) -> HashSet<String> {
    stats
        .values()
        .flat_map(|record| record.answered.keys().cloned())
        .collect()
}

/// Write `stats` to `path` through a sibling temporary file and a rename.
pub fn save_snapshot(stats: &StatsSnapshot, path: &Path, overwrite: bool) -> StorageResult<()> {
    let exists = path
        .try_exists()
        .map_err(|err| StorageError::io("check", path, err))?;
    if exists && !overwrite {
        return Err(StorageError::SaveConflict {
            path: path.to_path_buf(),
        });
    }

    let encoded = serde_json::to_vec_pretty(stats).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = temporary_path(path);
    let written = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(&encoded)?;
            file.write_all(b"\n")?;
            file.sync_all()
        })
        .map_err(|err| StorageError::io("write", path, err));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path).map_err(|err| {
        let _ = fs::remove_file(&tmp_path);
        StorageError::io("replace", path, err)
    })
}

/// Read and decode the snapshot at `path`; `Ok(None)` when the file does not exist.
pub fn load_snapshot(path: &Path) -> StorageResult<Option<StatsSnapshot>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StorageError::io("read", path, err)),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|err| StorageError::decode(path.display().to_string(), err))
}

fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("stats.json");
    path.with_file_name(format!(".{name}.tmp-{}", std::process::id()))
}
