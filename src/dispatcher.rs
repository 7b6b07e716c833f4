use std::io::{self, BufRead, Write};

use crate::provider::ControlAction;
use crate::record::normalize_username;
use crate::registry::Registry;
use crate::server::Server;
use crate::Result;

/// What a dispatch attempt came to. The three failure kinds are ordinary
/// results — reported in one line, process exits normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action reached the control tool for exactly one session.
    Executed,
    /// The resolved session had no usable session id; nothing was invoked.
    Refused,
    /// The user has no session on any registered server.
    UserNotFound,
    /// More than one server matched and the selection was invalid or out of
    /// range. Terminal for this invocation: no retry, no default candidate.
    SelectionNotUnderstood,
}

/// One row of the disambiguation menu: the hostname and the user's session
/// state on that host.
pub struct Candidate {
    pub hostname: String,
    pub state: String,
}

/// The interactive selection prompt, as a seam. Presents the 1-indexed
/// candidate list and returns the administrator's raw reply, or `None` when
/// input is exhausted.
pub trait Chooser {
    fn choose(&mut self, username: &str, candidates: &[Candidate]) -> Option<String>;
}

/// Plain one-line prompt on stdin/stdout.
pub struct StdinChooser;

impl Chooser for StdinChooser {
    fn choose(&mut self, username: &str, candidates: &[Candidate]) -> Option<String> {
        println!("{username} is logged into multiple servers. Select the session to target:");
        for (index, candidate) in candidates.iter().enumerate() {
            println!("\t{}. {:<20}\t({})", index + 1, candidate.hostname, candidate.state);
        }
        print!("> ");
        io::stdout().flush().ok()?;

        let mut reply = String::new();
        match io::stdin().lock().read_line(&mut reply) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(reply),
        }
    }
}

/// Resolves a username to exactly one server and runs the action there.
pub struct Dispatcher<'a> {
    registry: &'a Registry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Dispatcher { registry }
    }

    /// One resolution pass: find the user's servers, disambiguate when
    /// there is more than one, execute the action against the target.
    pub fn dispatch(
        &self,
        username: &str,
        action: ControlAction,
        options: &str,
        chooser: &mut dyn Chooser,
    ) -> Result<DispatchOutcome> {
        let candidates = self.registry.find_by_user(username);

        let target = match candidates.len() {
            0 => return Ok(DispatchOutcome::UserNotFound),
            1 => candidates[0],
            _ => {
                let rows = self.candidate_rows(username, &candidates);
                let reply = chooser.choose(username, &rows);
                match parse_selection(reply.as_deref(), candidates.len()) {
                    Some(index) => candidates[index],
                    None => return Ok(DispatchOutcome::SelectionNotUnderstood),
                }
            }
        };

        let executed =
            target.execute_user_command(self.registry.provider(), username, action, options)?;
        Ok(if executed {
            DispatchOutcome::Executed
        } else {
            DispatchOutcome::Refused
        })
    }

    /// Sends the same message to every session on every server, in
    /// registration order and per-host table iteration order. One failed
    /// session does not stop the sweep; returns the delivered count.
    pub fn broadcast(&self, message: &str) -> Result<usize> {
        let provider = self.registry.provider();
        let mut delivered = 0;

        for server in self.registry.servers() {
            for username in server.sessions(provider).keys() {
                match server.message(provider, username, message) {
                    Ok(true) => delivered += 1,
                    Ok(false) => {}
                    Err(e) => {
                        eprintln!("{}: message to {} failed: {}", server.hostname(), username, e)
                    }
                }
            }
        }

        Ok(delivered)
    }

    fn candidate_rows(&self, username: &str, candidates: &[&Server]) -> Vec<Candidate> {
        let key = normalize_username(username);
        candidates
            .iter()
            .map(|server| Candidate {
                hostname: server.hostname().to_string(),
                state: server
                    .sessions(self.registry.provider())
                    .get(&key)
                    .map(|record| record.state.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// Maps the raw reply to a zero-based index into the presented list.
/// Anything but an integer in `1..=len` is not understood.
fn parse_selection(reply: Option<&str>, len: usize) -> Option<usize> {
    let number: usize = reply?.trim().parse().ok()?;
    if (1..=len).contains(&number) {
        Some(number - 1)
    } else {
        None
    }
}
