use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One user's login session on one host, as reported by the listing tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Fixed-column username slice. Keeps the leading `>` marker the listing
    /// tool uses to flag the current session; the table key does not.
    pub username: String,
    pub session_name: String,
    /// Digits for a live session; empty or non-numeric for rows the tool
    /// prints without a usable id (e.g. disconnected sessions).
    pub session_id: String,
    pub state: String,
    pub idle_time: u32,
    /// Opaque timestamp text, passed through untouched.
    pub login_time: String,
}

impl SessionRecord {
    /// Whether the record carries an id a control tool can be pointed at.
    pub fn has_valid_session_id(&self) -> bool {
        !self.session_id.is_empty() && self.session_id.chars().all(|c| c.is_ascii_digit())
    }
}

/// One host's session table, keyed by normalized username. Unique per host;
/// fully replaced on load, never merged.
pub type SessionMap = BTreeMap<String, SessionRecord>;

/// Canonical form of a username for table keys and lookups: trimmed,
/// lower-cased, leading current-session markers removed.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().trim_start_matches('>').trim().to_lowercase()
}
