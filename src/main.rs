use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tsadmin::{debug_logger, CliProvider, ControlAction, Registry, Result, Server, ServerList};

// Import handler modules
mod handlers;

#[derive(Parser)]
#[command(name = "tsa")]
#[command(about = "Terminal Session Admin - administer remote login sessions", long_about = None)]
#[command(version)]
struct Cli {
    /// Server to administer (repeatable)
    #[arg(short = 's', long = "server", global = true, action = ArgAction::Append)]
    servers: Vec<String>,

    /// Read servers from a file, one hostname per line
    #[arg(short = 'f', long = "server-file", global = true)]
    server_file: Option<PathBuf>,

    /// Write a trace of external tool calls to the debug log
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every session on every administered server
    #[command(aliases = &["ls", "l"])]
    List {
        /// Emit the roster as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which servers a user is logged into
    #[command(aliases = &["find"])]
    Locate {
        /// Username to look up
        user: String,
    },

    /// Shadow (observe) a user's session
    Shadow {
        /// Username whose session to shadow
        user: String,
    },

    /// Disconnect a user's session, leaving it running on the server
    #[command(aliases = &["disc"])]
    Disconnect {
        /// Username whose session to disconnect
        user: String,
    },

    /// Log a user's session off
    Logoff {
        /// Username whose session to log off
        user: String,
    },

    /// Forcibly reset a user's session
    Reset {
        /// Username whose session to reset
        user: String,
    },

    /// Send a message to a user's session
    #[command(aliases = &["m"])]
    Msg {
        /// Username to message
        user: String,
        /// Message text
        message: String,
    },

    /// Send a message to every session on every server
    Broadcast {
        /// Message text
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        debug_logger::init_debug_log();
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let hostnames = ServerList::resolve(&cli.servers, cli.server_file.as_deref())?;
    if hostnames.is_empty() {
        println!("No servers configured. Use --server or --server-file to name some.");
        return Ok(());
    }

    let mut registry = Registry::new(Box::new(CliProvider));
    for hostname in hostnames {
        registry.register(Server::new(hostname));
    }

    match command {
        Commands::List { json } => {
            handlers::handle_list_all(&registry, json)?;
        }
        Commands::Locate { user } => {
            handlers::handle_locate_user(&registry, &user)?;
        }
        Commands::Shadow { user } => {
            handlers::handle_user_action(&registry, &user, ControlAction::Shadow, "")?;
        }
        Commands::Disconnect { user } => {
            handlers::handle_user_action(&registry, &user, ControlAction::Disconnect, "")?;
        }
        Commands::Logoff { user } => {
            handlers::handle_user_action(&registry, &user, ControlAction::Logoff, "")?;
        }
        Commands::Reset { user } => {
            handlers::handle_user_action(&registry, &user, ControlAction::Reset, "")?;
        }
        Commands::Msg { user, message } => {
            handlers::handle_user_action(&registry, &user, ControlAction::Message, &message)?;
        }
        Commands::Broadcast { message } => {
            handlers::handle_broadcast(&registry, &message)?;
        }
    }

    Ok(())
}
