use serde::Serialize;
use tsadmin::{Registry, Result, RosterTable, SessionMap};

#[derive(Serialize)]
struct HostSessions<'a> {
    server: &'a str,
    sessions: &'a SessionMap,
}

/// Lists every session on every administered server.
pub fn handle_list_all(registry: &Registry, json: bool) -> Result<()> {
    if json {
        let roster: Vec<HostSessions<'_>> = registry
            .servers()
            .iter()
            .map(|server| HostSessions {
                server: server.hostname(),
                sessions: server.sessions(registry.provider()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&roster)?);
    } else {
        RosterTable::new(registry).print();
    }
    Ok(())
}

/// Shows which servers a user is logged into, with the session state on
/// each.
pub fn handle_locate_user(registry: &Registry, username: &str) -> Result<()> {
    let servers = registry.find_by_user(username);

    if servers.is_empty() {
        println!("{username} was not found on any server.");
        return Ok(());
    }

    println!("{username} is logged into the following servers:");
    for server in servers {
        let state = server
            .session_for(registry.provider(), username)
            .map(|record| record.state.clone())
            .unwrap_or_default();
        println!("\t{:<25}({})", server.hostname(), state);
    }

    Ok(())
}
