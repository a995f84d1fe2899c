use std::{io, path::PathBuf};

use thiserror::Error;

use crate::dao::models::{PlayerStats, Question};

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested question id is not part of the corpus.
    #[error("no question with id `{id}` exists in the question database")]
    NoSuchQuestionId {
        /// Identifier that was looked up.
        id: String,
    },
    /// Nothing has been asked since the process started.
    #[error("no questions have been asked yet")]
    NoQuestionsAsked,
    /// Every question of the pool has already been asked.
    #[error("there are no remaining unasked questions")]
    NoMoreRemainingQuestions,
    /// Saving would clobber an existing file while overwriting is disabled.
    #[error("file `{path}` exists and overwrite was set to false")]
    SaveConflict {
        /// Stats file that already exists.
        path: PathBuf,
    },
    /// Underlying filesystem failure other than a missing stats file.
    #[error("failed to {action} `{path}`")]
    Io {
        /// Verb describing the failed operation, such as `read` or `write`.
        action: &'static str,
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Persisted or bundled JSON could not be decoded.
    #[error("failed to decode `{source_name}`")]
    Decode {
        /// What was being decoded, usually a path.
        source_name: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory stats could not be serialized for saving.
    #[error("failed to encode stats for `{path}`")]
    Encode {
        /// Stats file the snapshot was meant for.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The question corpus parsed but holds no question.
    #[error("the question corpus is empty")]
    EmptyCorpus,
}

/// Coarse classification of [`StorageError`] used by callers to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// Unknown question id, or no question asked yet.
    NotFound,
    /// The question pool is fully asked.
    Exhausted,
    /// Save refused because the target exists and overwriting is disabled.
    Conflict,
    /// Read/write/stat failure, or a snapshot that could not be written out.
    Io,
    /// Malformed JSON, in the stats snapshot or the corpus.
    Decode,
}

impl StorageError {
    /// Wrap an I/O failure with the action and path it relates to.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON decoding failure with a description of what was decoded.
    pub fn decode(source_name: impl Into<String>, source: serde_json::Error) -> Self {
        StorageError::Decode {
            source_name: source_name.into(),
            source,
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::NoSuchQuestionId { .. } | StorageError::NoQuestionsAsked => {
                StorageErrorKind::NotFound
            }
            StorageError::NoMoreRemainingQuestions => StorageErrorKind::Exhausted,
            StorageError::SaveConflict { .. } => StorageErrorKind::Conflict,
            StorageError::Io { .. } | StorageError::Encode { .. } => StorageErrorKind::Io,
            StorageError::Decode { .. } | StorageError::EmptyCorpus => StorageErrorKind::Decode,
        }
    }
}

/// Contract consumed by the command handlers.
///
/// Every method is synchronous and safe to call from many threads at once.
pub trait Storage: Send + Sync {
    /// Current record for `player_id`, empty when the player never answered.
    fn get_stats(&self, player_id: &str) -> PlayerStats;
    /// Record `offer` as the answer of `player_id` to `question_id` and return the updated record.
    fn update_stats(&self, question_id: &str, player_id: &str, offer: u64) -> PlayerStats;

    /// Look up a question of the corpus.
    fn get_question(&self, id: &str) -> StorageResult<Question>;
    /// Identifier of the last question handed out by [`Storage::get_unasked_question`].
    fn get_most_recent_question_id(&self) -> StorageResult<String>;
    /// Pick a random question that has not been asked yet and mark it asked.
    fn get_unasked_question(&self) -> StorageResult<Question>;
    /// Whether `id` has been asked, or answered by anyone in the loaded snapshot.
    fn has_question_been_asked(&self, id: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_classified_by_kind() {
        let not_found = StorageError::NoSuchQuestionId { id: "42".into() };
        assert_eq!(not_found.kind(), StorageErrorKind::NotFound);
        assert_eq!(StorageError::NoQuestionsAsked.kind(), StorageErrorKind::NotFound);
        assert_eq!(
            StorageError::NoMoreRemainingQuestions.kind(),
            StorageErrorKind::Exhausted
        );
        assert_eq!(
            StorageError::SaveConflict {
                path: "stats.json".into()
            }
            .kind(),
            StorageErrorKind::Conflict
        );

        let io = StorageError::io(
            "open",
            "stats.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), StorageErrorKind::Io);
        assert_eq!(io.to_string(), "failed to open `stats.json`");

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(
            StorageError::decode("stats.json", json_err).kind(),
            StorageErrorKind::Decode
        );

        let encode = StorageError::Encode {
            path: "stats.json".into(),
            source: serde_json::from_str::<u32>("nope").unwrap_err(),
        };
        assert_eq!(encode.kind(), StorageErrorKind::Io);
        assert_eq!(encode.to_string(), "failed to encode stats for `stats.json`");
    }
}
