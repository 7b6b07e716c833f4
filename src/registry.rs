use std::fmt;

use crate::provider::SessionProvider;
use crate::record::SessionRecord;
use crate::server::Server;

/// The set of administered hosts for one run: an ordered, append-only list
/// of servers plus the provider they all talk through. An explicit value —
/// built by the caller, handed to the dispatcher — so tests run against
/// fabricated entries.
pub struct Registry {
    provider: Box<dyn SessionProvider>,
    servers: Vec<Server>,
}

impl Registry {
    pub fn new(provider: Box<dyn SessionProvider>) -> Self {
        Registry {
            provider,
            servers: Vec::new(),
        }
    }

    /// Appends an entry. No de-duplication by hostname: two entries may
    /// share a name and are treated as independent hosts.
    pub fn register(&mut self, server: Server) {
        self.servers.push(server);
    }

    /// All entries, in registration order.
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn provider(&self) -> &dyn SessionProvider {
        self.provider.as_ref()
    }

    /// Every server the user has a session on, in registration order.
    pub fn find_by_user(&self, username: &str) -> Vec<&Server> {
        self.servers
            .iter()
            .filter(|server| server.has_user(self.provider.as_ref(), username))
            .collect()
    }
}

// Helper for pretty-printing one session row
pub struct SessionRowDisplay<'a> {
    pub record: &'a SessionRecord,
}

impl<'a> SessionRowDisplay<'a> {
    pub fn new(record: &'a SessionRecord) -> Self {
        SessionRowDisplay { record }
    }
}

impl fmt::Display for SessionRowDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;

        let icon = if record.state.eq_ignore_ascii_case("active") {
            "●"
        } else {
            "○"
        };

        let session_id = if record.session_id.is_empty() {
            "-"
        } else {
            record.session_id.as_str()
        };

        write!(
            f,
            " {} {:<22} │ ID {:<4} │ {:<8} │ idle {:<5} │ {}",
            icon,
            record.username,
            session_id,
            record.state,
            format!("{}m", record.idle_time),
            record.login_time
        )
    }
}

pub struct RosterTable<'a> {
    registry: &'a Registry,
}

impl<'a> RosterTable<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        RosterTable { registry }
    }

    pub fn print(&self) {
        if self.registry.servers().is_empty() {
            println!("No servers registered");
            return;
        }

        let mut session_count = 0;

        for server in self.registry.servers() {
            println!("Server: {}", server.hostname());

            let table = server.sessions(self.registry.provider());
            if table.is_empty() {
                println!("   (no sessions)");
                continue;
            }

            for record in table.values() {
                println!("{}", SessionRowDisplay::new(record));
            }
            session_count += table.len();
        }

        println!(
            "\n{} server(s), {} session(s)",
            self.registry.servers().len(),
            session_count
        );
    }
}
