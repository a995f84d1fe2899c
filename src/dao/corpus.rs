//! Static question corpus, loaded once at startup.

use std::{fs, path::Path};

use indexmap::IndexMap;
use tracing::info;

use crate::dao::storage::{StorageError, StorageResult};

/// Corpus shipped with the binary.
const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

/// Read-only mapping from question id to question text, in file order.
#[derive(Debug, Clone)]
pub struct QuestionCorpus {
    questions: IndexMap<String, String>,
}

impl QuestionCorpus {
    /// Parse the corpus bundled into the binary.
    pub fn bundled() -> StorageResult<Self> {
        Self::from_json("bundled question corpus", BUNDLED_QUESTIONS)
    }

    /// Read and parse a corpus file.
    pub fn from_path(path: &Path) -> StorageResult<Self> {
        let contents =
            fs::read_to_string(path).map_err(|err| StorageError::io("read", path, err))?;
        let corpus = Self::from_json(path.display().to_string(), &contents)?;
        info!(path = %path.display(), count = corpus.len(), "loaded question corpus");
        Ok(corpus)
    }

    /// Parse a JSON object of `{ "<id>": "<text>" }`.
    pub fn from_json(source_name: impl Into<String>, raw: &str) -> StorageResult<Self> {
        let questions: IndexMap<String, String> =
            serde_json::from_str(raw).map_err(|err| StorageError::decode(source_name, err))?;
        if questions.is_empty() {
            return Err(StorageError::EmptyCorpus);
        }
        Ok(Self { questions })
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false once built, empty corpora are rejected.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Text of the question `id`, if present.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.questions.get(id).map(String::as_str)
    }

    /// Entry at position `index` in file order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.questions
            .get_index(index)
            .map(|(id, text)| (id.as_str(), text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::storage::StorageErrorKind;

    #[test]
    fn bundled_corpus_uses_sequential_ids() {
        let corpus = QuestionCorpus::bundled().unwrap();
        assert!(!corpus.is_empty());
        for index in 0..corpus.len() {
            let (id, text) = corpus.get_index(index).unwrap();
            assert_eq!(id, index.to_string());
            assert!(!text.trim().is_empty());
        }
    }

    #[test]
    fn keeps_file_order() {
        let corpus = QuestionCorpus::from_json("inline", r#"{"b":"second","a":"first"}"#).unwrap();
        assert_eq!(corpus.get_index(0), Some(("b", "second")));
        assert_eq!(corpus.get("a"), Some("first"));
        assert_eq!(corpus.get("c"), None);
    }

    #[test]
    fn rejects_malformed_and_empty_corpora() {
        let err = QuestionCorpus::from_json("inline", "[1, 2").unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Decode);

        let err = QuestionCorpus::from_json("inline", "{}").unwrap_err();
        assert!(matches!(err, StorageError::EmptyCorpus));
    }

    #[test]
    fn missing_corpus_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuestionCorpus::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Io);
    }
}
