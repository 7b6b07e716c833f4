use std::fmt;
use std::process::Command;

use crate::error::{Result, TsaError};
use crate::parser::ColumnLayout;

/// Session-control actions and the external tool each one maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Observe/mirror the session interactively.
    Shadow,
    /// Drop the client connection, leaving the session running.
    Disconnect,
    /// Terminate the session.
    Logoff,
    /// Forcibly terminate the session immediately.
    Reset,
    /// Send a text message to the session.
    Message,
}

impl ControlAction {
    /// Program name plus fixed leading arguments of the control tool.
    pub fn tool(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ControlAction::Shadow => ("shadow", &[]),
            ControlAction::Disconnect => ("tsdiscon", &[]),
            ControlAction::Logoff => ("logoff", &[]),
            ControlAction::Reset => ("reset", &["session"]),
            ControlAction::Message => ("msg", &[]),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ControlAction::Shadow => "shadow",
            ControlAction::Disconnect => "disconnect",
            ControlAction::Logoff => "logoff",
            ControlAction::Reset => "reset",
            ControlAction::Message => "message",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The seam to the host's admin tooling. The core never talks to a host
/// directly; tests substitute a scripted fake here.
pub trait SessionProvider {
    /// Raw session listing for a host. A failure here is treated upstream
    /// as "host has zero sessions", never surfaced to queries.
    fn list_sessions(&self, hostname: &str) -> Result<String>;

    /// Runs one control action against a session, out-of-band.
    fn execute_control(
        &self,
        action: ControlAction,
        session_id: &str,
        hostname: &str,
        options: &str,
    ) -> Result<()>;

    /// Column offsets of this provider's listing output.
    fn layout(&self) -> ColumnLayout {
        ColumnLayout::default()
    }
}

/// Real provider: shells out to the platform admin tools.
pub struct CliProvider;

impl SessionProvider for CliProvider {
    fn list_sessions(&self, hostname: &str) -> Result<String> {
        crate::debug_log!("query user /SERVER:{}", hostname);

        let output = Command::new("query")
            .args(["user", &format!("/SERVER:{hostname}")])
            .output()
            .map_err(|e| TsaError::ListingError(format!("query user on {hostname}: {e}")))?;

        // The tool exits non-zero for "no users"; the parser treats that
        // output as an empty table, so only the stdout matters here.
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn execute_control(
        &self,
        action: ControlAction,
        session_id: &str,
        hostname: &str,
        options: &str,
    ) -> Result<()> {
        let (program, fixed_args) = action.tool();

        let mut cmd = Command::new(program);
        cmd.args(fixed_args)
            .arg(session_id)
            .arg(format!("/SERVER:{hostname}"));
        if !options.is_empty() {
            cmd.arg(options);
        }

        crate::debug_log!(
            "{} {} {} /SERVER:{} {}",
            program,
            fixed_args.join(" "),
            session_id,
            hostname,
            options
        );

        let output = cmd
            .output()
            .map_err(|e| TsaError::ControlError(format!("{program} on {hostname}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TsaError::ControlError(format!(
                "{program} on {hostname} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
