//! Typed payloads for the bot commands.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::{validate_counter_offer, validate_identifier};

/// Would the player take the million dollars?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerChoice {
    /// Takes the million.
    Yes,
    /// Turns it down.
    No,
    /// Would do it for a different amount, given as `counter_offer`.
    #[serde(alias = "maybe...")]
    Maybe,
}

/// Payload of the answer command.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnswerRequest {
    /// Identifier of the answering player, as supplied by the chat platform.
    pub player_id: String,
    /// Display name used in the reply; falls back to the player id.
    #[serde(default)]
    pub player_name: Option<String>,
    /// Yes, no or maybe.
    pub choice: AnswerChoice,
    /// Whole dollars, required with `maybe` and ignored otherwise.
    #[serde(default)]
    pub counter_offer: Option<u64>,
    /// Question being answered; the most recently asked one when omitted.
    #[serde(default)]
    pub question_id: Option<String>,
}

impl Validate for AnswerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier(&self.player_id) {
            errors.add("player_id", e);
        }

        if let Some(ref question_id) = self.question_id {
            if let Err(e) = validate_identifier(question_id) {
                errors.add("question_id", e);
            }
        }

        // Only a "maybe" carries a meaningful counter offer.
        if self.choice == AnswerChoice::Maybe {
            if let Some(offer) = self.counter_offer {
                if let Err(e) = validate_counter_offer(offer) {
                    errors.add("counter_offer", e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A question handed out to the chat.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    /// Question identifier, to pass back when answering.
    pub id: String,
    /// Question text.
    pub text: String,
    /// Ready-to-post reply.
    pub message: String,
}

/// Outcome of a recorded answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    /// Question the answer was recorded for.
    pub question_id: String,
    /// Answering player.
    pub player_id: String,
    /// Amount recorded for this answer, in whole dollars.
    pub offer: u64,
    /// Player's running total after this answer.
    pub total_money: u64,
    /// Ready-to-post reply.
    pub message: String,
}
