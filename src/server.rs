use std::sync::OnceLock;

use crate::parser::parse_listing;
use crate::provider::{ControlAction, SessionProvider};
use crate::record::{normalize_username, SessionMap, SessionRecord};
use crate::Result;

/// One administered host and its cached session table.
///
/// The table is loaded through the provider on first access and memoized
/// for the entry's lifetime; it is never auto-refreshed. The `OnceLock`
/// keeps the load at-most-once and all-or-nothing even if first access is
/// ever made from more than one thread.
pub struct Server {
    hostname: String,
    table: OnceLock<SessionMap>,
}

impl Server {
    pub fn new(hostname: impl Into<String>) -> Self {
        Server {
            hostname: hostname.into(),
            table: OnceLock::new(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The host's session table, loading it on first call. A failed or
    /// empty listing is a host with zero sessions, not an error.
    pub fn sessions(&self, provider: &dyn SessionProvider) -> &SessionMap {
        self.table
            .get_or_init(|| match provider.list_sessions(&self.hostname) {
                Ok(raw) => parse_listing(&raw, &provider.layout()),
                Err(e) => {
                    crate::debug_log!("listing for {} unavailable: {}", self.hostname, e);
                    SessionMap::new()
                }
            })
    }

    pub fn has_user(&self, provider: &dyn SessionProvider, username: &str) -> bool {
        self.sessions(provider)
            .contains_key(&normalize_username(username))
    }

    pub fn session_for(
        &self,
        provider: &dyn SessionProvider,
        username: &str,
    ) -> Option<&SessionRecord> {
        self.sessions(provider).get(&normalize_username(username))
    }

    /// Runs one control action against the user's session on this host.
    ///
    /// Returns `Ok(false)` without touching the provider when the user has
    /// no session here or the record's session id is not all digits — a
    /// stale or disconnected row must never reach a control tool.
    pub fn execute_user_command(
        &self,
        provider: &dyn SessionProvider,
        username: &str,
        action: ControlAction,
        options: &str,
    ) -> Result<bool> {
        let record = match self.session_for(provider, username) {
            Some(record) if record.has_valid_session_id() => record,
            _ => return Ok(false),
        };

        provider.execute_control(action, &record.session_id, &self.hostname, options)?;
        Ok(true)
    }

    pub fn shadow(&self, provider: &dyn SessionProvider, username: &str) -> Result<bool> {
        self.execute_user_command(provider, username, ControlAction::Shadow, "")
    }

    pub fn disconnect(&self, provider: &dyn SessionProvider, username: &str) -> Result<bool> {
        self.execute_user_command(provider, username, ControlAction::Disconnect, "")
    }

    pub fn logoff(&self, provider: &dyn SessionProvider, username: &str) -> Result<bool> {
        self.execute_user_command(provider, username, ControlAction::Logoff, "")
    }

    pub fn reset(&self, provider: &dyn SessionProvider, username: &str) -> Result<bool> {
        self.execute_user_command(provider, username, ControlAction::Reset, "")
    }

    pub fn message(
        &self,
        provider: &dyn SessionProvider,
        username: &str,
        text: &str,
    ) -> Result<bool> {
        self.execute_user_command(provider, username, ControlAction::Message, text)
    }
}
