use std::path::PathBuf;
use std::time::Duration;

use codenote_core::conflict::ConflictPolicy;

use crate::debounce::DEFAULT_DEBOUNCE_DELAY;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const IDENTITY_DIR: &str = ".codenote";
const IDENTITY_FILE: &str = "user_id";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the notes API.
    pub api_url: String,
    /// File holding the anonymous owner id.
    pub identity_file: PathBuf,
    /// Quiet period before an edit is autosaved.
    pub autosave_delay: Duration,
    /// Upper bound on each API request.
    pub request_timeout: Duration,
    pub conflict_policy: ConflictPolicy,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                   |
    /// |---------------------------------|---------------------------|
    /// | `CODENOTE_API_URL`              | `http://localhost:3000`   |
    /// | `CODENOTE_IDENTITY_FILE`        | `$HOME/.codenote/user_id` |
    /// | `CODENOTE_AUTOSAVE_MS`          | `1000`                    |
    /// | `CODENOTE_REQUEST_TIMEOUT_SECS` | `10`                      |
    /// | `CODENOTE_CONFLICT_POLICY`      | `last-write-wins`         |
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("CODENOTE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());

        let identity_file = lookup("CODENOTE_IDENTITY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_default()
                    .join(IDENTITY_DIR)
                    .join(IDENTITY_FILE)
            });

        let autosave_delay = parse_or_default(&lookup, "CODENOTE_AUTOSAVE_MS", |v| {
            v.parse::<u64>().ok().map(Duration::from_millis)
        })
        .unwrap_or(DEFAULT_DEBOUNCE_DELAY);

        let request_timeout = parse_or_default(&lookup, "CODENOTE_REQUEST_TIMEOUT_SECS", |v| {
            v.parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
        })
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let conflict_policy =
            parse_or_default(&lookup, "CODENOTE_CONFLICT_POLICY", |v| v.parse().ok())
                .unwrap_or_default();

        Self {
            api_url,
            identity_file,
            autosave_delay,
            request_timeout,
            conflict_policy,
        }
    }
}

/// Parse `key` if set, warning and returning `None` when the value is invalid.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring invalid configuration value");
    }
    parsed
}
