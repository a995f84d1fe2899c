//! Validation helpers for DTOs.

use validator::ValidationError;

/// Smallest counter offer accepted for a "maybe..." answer, in dollars.
pub const MIN_COUNTER_OFFER: u64 = 1;
/// Largest counter offer accepted for a "maybe..." answer, in dollars.
pub const MAX_COUNTER_OFFER: u64 = 5_000_000;
/// Longest identifier accepted for players and questions.
const MAX_ID_LENGTH: usize = 64;

/// Validates an identifier supplied by the chat platform (player or question).
///
/// # Examples
///
/// ```ignore
/// validate_identifier("123456789012345678") // Ok
/// validate_identifier("   ")                // Err - blank
/// ```
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        let mut err = ValidationError::new("identifier_blank");
        err.message = Some("Identifier must not be blank".into());
        return Err(err);
    }

    if id.len() > MAX_ID_LENGTH {
        let mut err = ValidationError::new("identifier_length");
        err.message = Some(
            format!(
                "Identifier must be at most {MAX_ID_LENGTH} characters (got {})",
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if id.chars().any(char::is_control) {
        let mut err = ValidationError::new("identifier_format");
        err.message = Some("Identifier must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a counter offer lies within the accepted whole-dollar range.
pub fn validate_counter_offer(offer: u64) -> Result<(), ValidationError> {
    if !(MIN_COUNTER_OFFER..=MAX_COUNTER_OFFER).contains(&offer) {
        let mut err = ValidationError::new("counter_offer_range");
        err.message = Some(
            format!(
                "Counter offer must be between {MIN_COUNTER_OFFER} and {MAX_COUNTER_OFFER} (got {offer})"
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}
