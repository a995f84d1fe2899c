//! Application-level configuration resolved from environment variables.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use tracing::warn;

/// Default location of the stats snapshot.
const DEFAULT_STATS_PATH: &str = "./stats.json";
/// Default HTTP port.
const DEFAULT_PORT: u16 = 8080;
/// Default period between automatic saves.
const DEFAULT_AUTOSAVE_SECS: u64 = 60;

const STATS_PATH_ENV: &str = "MDB_STATS_PATH";
const QUESTIONS_PATH_ENV: &str = "MDB_QUESTIONS_PATH";
const OVERWRITE_SAVE_ENV: &str = "MDB_OVERWRITE_SAVE";
const AUTOSAVE_SECS_ENV: &str = "MDB_AUTOSAVE_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Where the stats snapshot is read from and saved to.
    pub stats_path: PathBuf,
    /// Question corpus override; the bundled corpus is used when absent.
    pub questions_path: Option<PathBuf>,
    /// Whether saving may replace an existing stats file.
    pub overwrite_save: bool,
    /// Period between automatic saves, `None` when disabled.
    pub autosave_interval: Option<Duration>,
    /// HTTP listen port.
    pub port: u16,
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let stats_path = non_empty(lookup(STATS_PATH_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATS_PATH));
        let questions_path = non_empty(lookup(QUESTIONS_PATH_ENV)).map(PathBuf::from);

        let overwrite_save = parse_or(OVERWRITE_SAVE_ENV, lookup(OVERWRITE_SAVE_ENV), true);
        let autosave_secs = parse_or(
            AUTOSAVE_SECS_ENV,
            lookup(AUTOSAVE_SECS_ENV),
            DEFAULT_AUTOSAVE_SECS,
        );
        let autosave_interval = (autosave_secs > 0).then(|| Duration::from_secs(autosave_secs));

        let port_value = lookup("PORT").or_else(|| lookup("SERVER_PORT"));
        let port = parse_or("PORT", port_value, DEFAULT_PORT);

        Self {
            stats_path,
            questions_path,
            overwrite_save,
            autosave_interval,
            port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Parse `value`, warning and falling back to `default` when it is malformed.
fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = non_empty(value) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(key, value = %raw, fallback = ?default, "invalid configuration value; using default");
            default
        }
    }
}
