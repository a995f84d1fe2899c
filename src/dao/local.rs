use std::path::{Path, PathBuf};

use tracing::info;

use crate::dao::{
    corpus::QuestionCorpus,
    models::{PlayerStats, Question},
    question_pool::QuestionPool,
    stats_store::PlayerStatsStore,
    storage::{Storage, StorageResult},
};

/// Single-process storage: player stats in a local JSON file plus an in-memory question pool.
#[derive(Debug)]
pub struct LocalStorage {
    stats: PlayerStatsStore,
    questions: QuestionPool,
}

impl LocalStorage {
    /// Open the stats file at `save_path` and use the bundled question corpus.
    pub fn new(save_path: impl Into<PathBuf>) -> StorageResult<Self> {
        Self::open(PlayerStatsStore::new(save_path), QuestionCorpus::bundled()?)
    }

    /// Load `stats` from disk and build the question pool from `corpus`.
    ///
    /// Every question answered in the loaded snapshot counts as asked.
    pub fn open(stats: PlayerStatsStore, corpus: QuestionCorpus) -> StorageResult<Self> {
        let answered = stats.load_stats()?;
        let questions = QuestionPool::with_asked(corpus, answered);
        info!(
            path = %stats.save_path().display(),
            questions = questions.len(),
            remaining = questions.remaining(),
            "local storage ready"
        );
        Ok(Self { stats, questions })
    }

    /// Persist the current stats snapshot.
    pub fn save_stats(&self) -> StorageResult<()> {
        self.stats.save_stats()
    }

    /// Reload the stats snapshot from disk, keeping previously asked questions asked.
    pub fn load_stats(&self) -> StorageResult<()> {
        self.questions.reload_asked(|| self.stats.load_stats())
    }

    /// Stats file used by [`LocalStorage::save_stats`] and [`LocalStorage::load_stats`].
    pub fn save_path(&self) -> &Path {
        self.stats.save_path()
    }

    /// Size of the question corpus.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Corpus questions not asked yet.
    pub fn remaining_questions(&self) -> usize {
        self.questions.remaining()
    }
}

impl Storage for LocalStorage {
    fn get_stats(&self, player_id: &str) -> PlayerStats {
        self.stats.get_stats(player_id)
    }

    fn update_stats(&self, question_id: &str, player_id: &str, offer: u64) -> PlayerStats {
        self.stats.update_stats(question_id, player_id, offer)
    }

    fn get_question(&self, id: &str) -> StorageResult<Question> {
        self.questions.get_question(id)
    }

    fn get_most_recent_question_id(&self) -> StorageResult<String> {
        self.questions.get_most_recent_question_id()
    }

    fn get_unasked_question(&self) -> StorageResult<Question> {
        self.questions.get_unasked_question()
    }

    fn has_question_been_asked(&self, id: &str) -> bool {
        self.questions.has_question_been_asked(id)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use uuid::Uuid;

    use super::*;
    use crate::dao::storage::StorageErrorKind;

    #[test]
    fn starts_empty_without_a_stats_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("stats.json")).unwrap();

        let player = Uuid::new_v4().to_string();
        assert_eq!(storage.get_stats(&player).total_money(), 0);
        assert_eq!(storage.remaining_questions(), storage.question_count());
        assert!(storage.get_most_recent_question_id().is_err());
    }

    #[test]
    fn answered_questions_from_disk_are_not_asked_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{"first":{"answered":{"0":1000000,"1":0}},"second":{"answered":{"2":5}}}"#,
        )
        .unwrap();
        let corpus =
            QuestionCorpus::from_json("inline", r#"{"0":"a","1":"b","2":"c","3":"d"}"#).unwrap();

        let storage = LocalStorage::open(PlayerStatsStore::new(&path), corpus).unwrap();

        assert!(storage.has_question_been_asked("1"));
        assert_eq!(storage.get_stats("first").total_money(), 1_000_000);
        assert_eq!(storage.get_unasked_question().unwrap().id, "3");
        assert_eq!(
            storage.get_unasked_question().unwrap_err().kind(),
            StorageErrorKind::Exhausted
        );
    }

    #[test]
    fn corrupt_stats_file_aborts_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "not json").unwrap();

        let err = LocalStorage::new(&path).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Decode);
    }

    #[test]
    fn reload_keeps_most_recent_question_asked() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("stats.json")).unwrap();

        let question = storage.get_unasked_question().unwrap();
        storage.load_stats().unwrap();

        assert!(storage.has_question_been_asked(&question.id));
        assert_eq!(storage.get_most_recent_question_id().unwrap(), question.id);
    }

    #[test]
    fn draws_racing_a_reload_skip_freshly_loaded_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let storage = LocalStorage::new(&path).unwrap();

        let answered: Vec<String> = (0..20).map(|id| id.to_string()).collect();
        let entries = answered
            .iter()
            .map(|id| format!(r#""{id}":1"#))
            .collect::<Vec<_>>()
            .join(",");
        fs::write(&path, format!(r#"{{"loader":{{"answered":{{{entries}}}}}}}"#)).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| storage.load_stats().unwrap());
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..3 {
                        // Once the loaded data is visible, its answers must be off limits.
                        let loaded = storage.get_stats("loader").has_answered("0");
                        if let Ok(question) = storage.get_unasked_question() {
                            if loaded {
                                assert!(
                                    !answered.contains(&question.id),
                                    "question {} was answered in the loaded stats",
                                    question.id
                                );
                            }
                        }
                    }
                });
            }
        });

        for id in &answered {
            assert!(storage.has_question_been_asked(id));
        }
        assert_eq!(storage.remaining_questions(), 0);
    }

    #[test]
    fn saved_answers_survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let player = Uuid::new_v4().to_string();

        let storage = LocalStorage::new(&path).unwrap();
        let question = storage.get_unasked_question().unwrap();
        storage.update_stats(&question.id, &player, 0);
        storage.update_stats("custom", &player, 42);
        storage.save_stats().unwrap();

        let restarted = LocalStorage::new(&path).unwrap();
        let stats = restarted.get_stats(&player);
        assert!(stats.has_answered(&question.id));
        assert_eq!(stats.total_money(), 42);
        assert!(restarted.has_question_been_asked(&question.id));
        assert_eq!(restarted.remaining_questions(), restarted.question_count() - 1);
    }
}
