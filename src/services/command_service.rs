//! Handlers behind the bot commands. They only talk to the [`Storage`] contract.

use tracing::{debug, info};

use crate::{
    dao::storage::{Storage, StorageError},
    dto::{
        commands::{AnswerChoice, AnswerRequest, AnswerResponse, QuestionResponse},
        stats::StatsResponse,
    },
    error::ServiceError,
};

/// Offer recorded for a plain "yes".
pub const ONE_MILLION: u64 = 1_000_000;

const QUESTION_COMMAND: &str = "/question";

/// Hand out a question nobody has been asked yet.
pub fn ask_question(storage: &dyn Storage) -> Result<QuestionResponse, ServiceError> {
    let question = storage.get_unasked_question().map_err(|err| match err {
        StorageError::NoMoreRemainingQuestions => ServiceError::Exhausted(
            "whoops, all the prewritten questions have been asked".into(),
        ),
        other => other.into(),
    })?;

    let message = format!(
        "You get a million dollars, but... {} (ID: `{}`)",
        question.text, question.id
    );
    Ok(QuestionResponse {
        id: question.id,
        text: question.text,
        message,
    })
}

/// Look up a question by id, whether or not it was asked.
pub fn get_question(storage: &dyn Storage, id: &str) -> Result<QuestionResponse, ServiceError> {
    let question = storage.get_question(id)?;
    let message = format!(
        "You get a million dollars, but... {} (ID: `{}`)",
        question.text, question.id
    );
    Ok(QuestionResponse {
        id: question.id,
        text: question.text,
        message,
    })
}

/// Record an answer and report the player's new total.
///
/// The request must already be validated.
pub fn answer(
    storage: &dyn Storage,
    request: AnswerRequest,
) -> Result<AnswerResponse, ServiceError> {
    let AnswerRequest {
        player_id,
        player_name,
        choice,
        counter_offer,
        question_id,
    } = request;

    let question_id = resolve_question_id(storage, question_id)?;
    let offer = resolve_offer(choice, counter_offer)?;

    let stats = storage.update_stats(&question_id, &player_id, offer);
    let total_money = stats.total_money();
    info!(%player_id, %question_id, offer, total_money, "answer recorded");

    let name = player_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| player_id.clone());
    let message = format!(
        "Cool, answer recorded. {name}, you've currently got ${total_money}! To see your full stats, try `/stats`"
    );

    Ok(AnswerResponse {
        question_id,
        player_id,
        offer,
        total_money,
        message,
    })
}

/// Current answers and total for a player; unknown players get an empty record.
pub fn player_stats(storage: &dyn Storage, player_id: &str) -> StatsResponse {
    let stats = storage.get_stats(player_id);
    (player_id.to_string(), stats).into()
}

fn resolve_question_id(
    storage: &dyn Storage,
    requested: Option<String>,
) -> Result<String, ServiceError> {
    match requested {
        None => storage
            .get_most_recent_question_id()
            .map_err(|err| match err {
                StorageError::NoQuestionsAsked => ServiceError::NotFound(format!(
                    "no one has asked for any questions yet (or my memory has been reset), try `{QUESTION_COMMAND}`"
                )),
                other => other.into(),
            }),
        Some(id) => {
            let id = id.trim().to_string();
            if storage.has_question_been_asked(&id) {
                Ok(id)
            } else {
                debug!(question_id = %id, "answer to a question that was never asked");
                Err(ServiceError::NotFound(format!(
                    "no question with id `{id}` has been asked, try `{QUESTION_COMMAND}` for a new question"
                )))
            }
        }
    }
}

fn resolve_offer(choice: AnswerChoice, counter_offer: Option<u64>) -> Result<u64, ServiceError> {
    match choice {
        AnswerChoice::Yes => Ok(ONE_MILLION),
        AnswerChoice::No => Ok(0),
        AnswerChoice::Maybe => counter_offer.ok_or_else(|| {
            ServiceError::InvalidInput(
                "make sure to include your `counter_offer` if you're answering `maybe...`".into(),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{corpus::QuestionCorpus, local::LocalStorage, stats_store::PlayerStatsStore};

    fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        let corpus = QuestionCorpus::from_json(
            "inline",
            r#"{"0":"you can never eat cheese again.","1":"you must hop everywhere."}"#,
        )
        .unwrap();
        LocalStorage::open(PlayerStatsStore::new(dir.path().join("stats.json")), corpus).unwrap()
    }

    fn request(
        choice: AnswerChoice,
        counter_offer: Option<u64>,
        question_id: Option<&str>,
    ) -> AnswerRequest {
        AnswerRequest {
            player_id: "player-1".into(),
            player_name: Some("Danny".into()),
            choice,
            counter_offer,
            question_id: question_id.map(String::from),
        }
    }

    #[test]
    fn answering_defaults_to_most_recent_question() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let question = ask_question(&storage).unwrap();

        let response = answer(&storage, request(AnswerChoice::Yes, None, None)).unwrap();

        assert_eq!(response.question_id, question.id);
        assert_eq!(response.offer, ONE_MILLION);
        assert_eq!(response.total_money, ONE_MILLION);
        assert!(response.message.contains("Danny"));
    }

    #[test]
    fn answering_before_any_question_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        let err = answer(&storage, request(AnswerChoice::No, None, None)).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn answering_an_unasked_question_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        ask_question(&storage).unwrap();

        let err = answer(&storage, request(AnswerChoice::Yes, None, Some("42"))).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(storage.get_stats("player-1").total_money(), 0);
    }

    #[test]
    fn maybe_requires_a_counter_offer() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        ask_question(&storage).unwrap();

        let err = answer(&storage, request(AnswerChoice::Maybe, None, None)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let response = answer(&storage, request(AnswerChoice::Maybe, Some(2_500), None)).unwrap();
        assert_eq!(response.total_money, 2_500);
    }

    #[test]
    fn no_answer_counts_as_answered_but_adds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let first = ask_question(&storage).unwrap();
        answer(&storage, request(AnswerChoice::Yes, None, None)).unwrap();
        let second = ask_question(&storage).unwrap();
        answer(&storage, request(AnswerChoice::No, None, None)).unwrap();

        let stats = player_stats(&storage, "player-1");
        assert_eq!(stats.total_money, ONE_MILLION);
        assert_eq!(stats.answered.get(&first.id), Some(&ONE_MILLION));
        assert_eq!(stats.answered.get(&second.id), Some(&0));
    }

    #[test]
    fn exhausted_pool_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        ask_question(&storage).unwrap();
        ask_question(&storage).unwrap();

        let err = ask_question(&storage).unwrap_err();
        assert!(matches!(err, ServiceError::Exhausted(_)));
    }

    #[test]
    fn unknown_question_lookup_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        assert_eq!(get_question(&storage, "1").unwrap().text, "you must hop everywhere.");
        assert!(matches!(
            get_question(&storage, "9").unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }
}
