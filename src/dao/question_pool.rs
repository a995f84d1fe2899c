//! Question selection over the fixed corpus.
//!
//! A question is drawn by picking a uniformly random position and probing
//! forward circularly until an unasked one is found, so a draw takes at most
//! `N` probes and degrades into an exhaustive scan as the pool drains.

use std::{
    collections::HashSet,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use rand::Rng;
use tracing::info;

use crate::dao::{
    corpus::QuestionCorpus,
    models::Question,
    storage::{StorageError, StorageResult},
};

#[derive(Debug, Default)]
struct PoolState {
    asked: HashSet<String>,
    // Always a member of `asked` when set.
    most_recent: Option<String>,
}

/// Fixed corpus plus the record of what has been asked.
#[derive(Debug)]
pub struct QuestionPool {
    corpus: QuestionCorpus,
    state: RwLock<PoolState>,
}

impl QuestionPool {
    /// Pool where nothing has been asked yet.
    pub fn new(corpus: QuestionCorpus) -> Self {
        Self {
            corpus,
            state: RwLock::new(PoolState::default()),
        }
    }

    /// Pool where `asked` are already considered asked.
    pub fn with_asked(corpus: QuestionCorpus, asked: impl IntoIterator<Item = String>) -> Self {
        let pool = Self::new(corpus);
        pool.mark_asked(asked);
        pool
    }

    /// Add ids to the asked set. The most recent question is left untouched.
    pub fn mark_asked(&self, ids: impl IntoIterator<Item = String>) {
        self.write().asked.extend(ids);
    }

    /// Run `load` and mark every id it returns as asked, all under the pool's write lock.
    ///
    /// No draw can interleave with the reload, so a question answered in freshly
    /// loaded data is never handed out. On failure the asked set is left as it was.
    pub fn reload_asked(
        &self,
        load: impl FnOnce() -> StorageResult<HashSet<String>>,
    ) -> StorageResult<()> {
        let mut state = self.write();
        let answered = load()?;
        state.asked.extend(answered);
        Ok(())
    }

    /// Number of questions in the corpus.
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    /// Whether the corpus holds no question; never true for a validated corpus.
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Number of corpus questions that can still be drawn.
    pub fn remaining(&self) -> usize {
        let state = self.read();
        (0..self.corpus.len())
            .filter_map(|index| self.corpus.get_index(index))
            .filter(|(id, _)| !state.asked.contains(*id))
            .count()
    }

    /// Question `id` of the corpus, asked or not.
    pub fn get_question(&self, id: &str) -> StorageResult<Question> {
        self.corpus
            .get(id)
            .map(|text| Question {
                id: id.to_string(),
                text: text.to_string(),
            })
            .ok_or_else(|| StorageError::NoSuchQuestionId { id: id.to_string() })
    }

    /// Whether `id` was drawn or marked asked.
    pub fn has_question_been_asked(&self, id: &str) -> bool {
        self.read().asked.contains(id)
    }

    /// Last drawn id; `NoQuestionsAsked` until the first draw.
    pub fn get_most_recent_question_id(&self) -> StorageResult<String> {
        self.read()
            .most_recent
            .clone()
            .ok_or(StorageError::NoQuestionsAsked)
    }

    /// Draw an unasked question using the thread-local CSPRNG.
    pub fn get_unasked_question(&self) -> StorageResult<Question> {
        self.get_unasked_question_with(&mut rand::rng())
    }

    /// Draw an unasked question with the given random source.
    pub fn get_unasked_question_with<R: Rng>(&self, rng: &mut R) -> StorageResult<Question> {
        let total = self.corpus.len();
        if total == 0 {
            return Err(StorageError::NoMoreRemainingQuestions);
        }

        let mut state = self.write();
        let start = rng.random_range(0..total);
        let (id, text) = (0..total)
            .map(|offset| (start + offset) % total)
            .filter_map(|index| self.corpus.get_index(index))
            .find(|(id, _)| !state.asked.contains(*id))
            .ok_or(StorageError::NoMoreRemainingQuestions)?;

        state.asked.insert(id.to_string());
        state.most_recent = Some(id.to_string());
        info!(question_id = id, start, "question selected");

        Ok(Question {
            id: id.to_string(),
            text: text.to_string(),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, PoolState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PoolState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::dao::storage::StorageErrorKind;

    fn corpus(size: usize) -> QuestionCorpus {
        let entries = (0..size)
            .map(|index| format!(r#""{index}": "question number {index}""#))
            .collect::<Vec<_>>()
            .join(",");
        QuestionCorpus::from_json("test corpus", &format!("{{{entries}}}")).unwrap()
    }

    #[test]
    fn draws_every_question_once_then_exhausts() {
        let pool = QuestionPool::new(corpus(10));
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..10 {
            let question = pool.get_unasked_question_with(&mut rng).unwrap();
            assert!(seen.insert(question.id));
        }

        let expected: HashSet<String> = (0..10).map(|index| index.to_string()).collect();
        assert_eq!(seen, expected);
        assert_eq!(pool.remaining(), 0);

        let err = pool.get_unasked_question_with(&mut rng).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Exhausted);
    }

    #[test]
    fn drawn_question_becomes_asked_and_most_recent() {
        let pool = QuestionPool::new(corpus(5));
        let question = pool.get_unasked_question().unwrap();

        assert!(pool.has_question_been_asked(&question.id));
        assert_eq!(pool.get_most_recent_question_id().unwrap(), question.id);
        assert_eq!(pool.get_question(&question.id).unwrap(), question);
    }

    #[test]
    fn fresh_pool_has_no_most_recent_question() {
        let pool = QuestionPool::new(corpus(3));
        let err = pool.get_most_recent_question_id().unwrap_err();
        assert!(matches!(err, StorageError::NoQuestionsAsked));
        assert_eq!(err.kind(), StorageErrorKind::NotFound);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let pool = QuestionPool::new(corpus(3));
        let err = pool.get_question("99").unwrap_err();
        assert!(matches!(err, StorageError::NoSuchQuestionId { ref id } if id == "99"));
    }

    #[test]
    fn probing_wraps_around_to_the_last_unasked_question() {
        for seed in 0..8 {
            let pool = QuestionPool::with_asked(corpus(5), ["0", "1", "2", "4"].map(String::from));
            assert_eq!(pool.remaining(), 1);
            assert!(!pool.has_question_been_asked("3"));

            let question = pool
                .get_unasked_question_with(&mut StdRng::seed_from_u64(seed))
                .unwrap();

            assert_eq!(question.id, "3");
            assert_eq!(pool.remaining(), 0);
        }
    }

    #[test]
    fn failed_reload_leaves_asked_set_alone() {
        let pool = QuestionPool::with_asked(corpus(3), ["0".to_string()]);

        let err = pool
            .reload_asked(|| Err(StorageError::EmptyCorpus))
            .unwrap_err();
        assert!(matches!(err, StorageError::EmptyCorpus));
        assert_eq!(pool.remaining(), 2);

        pool.reload_asked(|| Ok(HashSet::from(["1".to_string()])))
            .unwrap();
        assert!(pool.has_question_been_asked("0"));
        assert!(pool.has_question_been_asked("1"));
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn preloaded_ids_outside_the_corpus_are_tracked() {
        let pool = QuestionPool::with_asked(corpus(2), ["custom".to_string()]);
        assert!(pool.has_question_been_asked("custom"));
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    fn concurrent_draws_never_repeat() {
        let pool = QuestionPool::new(corpus(32));
        let drawn = std::sync::Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for _ in 0..40 {
                scope.spawn(|| {
                    if let Ok(question) = pool.get_unasked_question() {
                        drawn.lock().unwrap().push(question.id);
                    }
                });
            }
        });

        let drawn = drawn.into_inner().unwrap();
        let unique: HashSet<_> = drawn.iter().cloned().collect();
        assert_eq!(drawn.len(), 32);
        assert_eq!(unique.len(), 32);
    }
}
