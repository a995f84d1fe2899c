use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Command requests and replies.
pub mod commands;
/// Health check payload.
pub mod health;
/// Player stats and save payloads.
pub mod stats;
/// Input validation helpers.
pub mod validation;

pub(crate) fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
