use tsadmin::{ControlAction, DispatchOutcome, Dispatcher, Registry, Result, StdinChooser};

/// Resolves a user to one session and runs a control action against it.
/// All four failure kinds print one line and leave the exit status alone.
pub fn handle_user_action(
    registry: &Registry,
    username: &str,
    action: ControlAction,
    options: &str,
) -> Result<()> {
    let dispatcher = Dispatcher::new(registry);
    let mut chooser = StdinChooser;

    match dispatcher.dispatch(username, action, options, &mut chooser)? {
        DispatchOutcome::Executed => {
            println!("{action} command completed for {username}");
        }
        DispatchOutcome::Refused => {
            println!("{username}'s session has no usable session id; nothing was done.");
        }
        DispatchOutcome::UserNotFound => {
            println!("{username} was not found on any server.");
        }
        DispatchOutcome::SelectionNotUnderstood => {
            println!("Selection not understood; no action taken.");
        }
    }

    Ok(())
}

/// Sends one message to every session on every administered server.
pub fn handle_broadcast(registry: &Registry, message: &str) -> Result<()> {
    let delivered = Dispatcher::new(registry).broadcast(message)?;
    println!("Message delivered to {delivered} session(s)");
    Ok(())
}
