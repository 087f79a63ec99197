//! # vyom
//!
//! Command-line access to the attribution cookie codec, the edge touch
//! recorder and a file-backed session store.

#![deny(unsafe_code)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use vyom_core::constants::{NAME, VERSION};
use vyom_settings::VyomSettings;

/// Vyom client state tools.
#[derive(Parser, Debug)]
#[command(
    name = NAME,
    version = VERSION,
    about = "Inspect attribution cookies and session storage"
)]
struct Cli {
    /// Settings file (defaults to `~/.vyom/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Attribution cookie tools.
    #[command(subcommand)]
    Attribution(AttributionCommand),
    /// Session store tools.
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
enum AttributionCommand {
    /// Decode a raw cookie value.
    Decode {
        /// URL-encoded JSON cookie value.
        value: String,
    },
    /// Read the attribution cookie out of a `Cookie` header.
    Read {
        /// Full `Cookie` header, e.g. `a=1; vyom_attribution=...`.
        #[arg(long)]
        cookies: String,
    },
    /// Record a touch as the edge layer would.
    Touch {
        /// Requested URL.
        #[arg(long)]
        url: String,
        /// `Referer` header.
        #[arg(long)]
        referrer: Option<String>,
        /// `User-Agent` header.
        #[arg(long)]
        user_agent: Option<String>,
        /// Incoming `Cookie` header.
        #[arg(long, default_value = "")]
        cookies: String,
        /// Mark cookies `Secure`.
        #[arg(long)]
        secure: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Show the hydrated session.
    Status,
    /// Store a bearer token.
    SetToken {
        /// Bearer token.
        token: String,
    },
    /// Clear the session.
    Logout,
}

fn load_settings(path: Option<&PathBuf>) -> VyomSettings {
    let result = match path {
        Some(p) => vyom_settings::load_settings_from_path(p),
        None => vyom_settings::load_settings(),
    };
    result.unwrap_or_else(|error| {
        eprintln!("warning: {error}; using default settings");
        VyomSettings::default()
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_ref());
    vyom_core::logging::init_subscriber(&settings.logging.level);
    tracing::debug!(command = ?cli.command, "dispatching");

    let output = match cli.command {
        Command::Attribution(AttributionCommand::Decode { value }) => commands::decode(&value)?,
        Command::Attribution(AttributionCommand::Read { cookies }) => {
            commands::read(&settings.attribution, &cookies)?
        }
        Command::Attribution(AttributionCommand::Touch {
            url,
            referrer,
            user_agent,
            cookies,
            secure,
        }) => commands::touch(
            &settings.attribution,
            &commands::TouchArgs {
                url: &url,
                referrer: referrer.as_deref(),
                user_agent: user_agent.as_deref(),
                cookies: &cookies,
                secure,
            },
        )?,
        Command::Session(cmd) => {
            let store = commands::open_session(&settings.session);
            match cmd {
                SessionCommand::Status => {}
                SessionCommand::SetToken { token } => store.set_token(token),
                SessionCommand::Logout => store.logout(),
            }
            commands::describe_session(&store)
        }
    };

    println!("{output}");
    Ok(())
}
