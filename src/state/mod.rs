use std::{sync::Arc, time::SystemTime};

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    dao::{
        corpus::QuestionCorpus,
        local::LocalStorage,
        stats_store::PlayerStatsStore,
        storage::{Storage, StorageResult},
    },
};

/// Handle to the application state shared by every route and background task.
pub type SharedState = Arc<AppState>;

/// Central application state owning the storage service.
pub struct AppState {
    storage: Arc<LocalStorage>,
    last_saved: RwLock<Option<SystemTime>>,
}

impl AppState {
    /// Wrap an opened storage in an [`Arc`] so it can be cloned cheaply.
    pub fn new(storage: LocalStorage) -> SharedState {
        Arc::new(Self {
            storage: Arc::new(storage),
            last_saved: RwLock::new(None),
        })
    }

    /// Open the storage described by `config`.
    ///
    /// Fails when the question corpus cannot be parsed or the stats file exists
    /// but cannot be read or decoded.
    pub fn from_config(config: &AppConfig) -> StorageResult<SharedState> {
        let corpus = match &config.questions_path {
            Some(path) => QuestionCorpus::from_path(path)?,
            None => QuestionCorpus::bundled()?,
        };
        let stats =
            PlayerStatsStore::new(config.stats_path.clone()).with_overwrite(config.overwrite_save);
        let storage = LocalStorage::open(stats, corpus)?;
        Ok(Self::new(storage))
    }

    /// Storage contract used by the command handlers.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Concrete storage handle, for persistence work off the async runtime.
    pub fn local_storage(&self) -> Arc<LocalStorage> {
        self.storage.clone()
    }

    /// Time of the last successful save in this process.
    pub async fn last_saved(&self) -> Option<SystemTime> {
        *self.last_saved.read().await
    }

    /// Remember `at` as the time of the latest successful save.
    pub async fn record_save(&self, at: SystemTime) {
        *self.last_saved.write().await = Some(at);
    }
}
