//! GoBarber CLI - command-line client for the GoBarber booking API
//!
//! This CLI provides a `gobarber` command that signs in, keeps the session on
//! disk between runs, and drives the profile and password recovery flows.

mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gobarber_core::{AppContext, ClientConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{avatar, login, logout, password, profile, whoami};

/// GoBarber CLI - book your next haircut from the terminal
#[derive(Parser, Debug)]
#[command(name = "gobarber", author, version, about = "GoBarber - command-line client")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// API base URL (overrides config and GOBARBER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides config and GOBARBER_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session for later commands
    Login {
        /// Account e-mail
        #[arg(long)]
        email: String,

        /// Account password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update name, e-mail and optionally the password
    Profile {
        /// New display name
        #[arg(long)]
        name: String,

        /// New e-mail
        #[arg(long)]
        email: String,

        /// Current password, required to change it
        #[arg(long)]
        old_password: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,

        /// New password, repeated
        #[arg(long)]
        password_confirmation: Option<String>,
    },

    /// Upload a new avatar image
    Avatar {
        /// Image file to upload
        file: PathBuf,
    },

    /// E-mail a password recovery link
    ForgotPassword {
        /// Account e-mail
        #[arg(long)]
        email: String,
    },

    /// Set a new password from a recovery link
    ResetPassword {
        /// Recovery link or its query string (`?token=...`)
        #[arg(long)]
        link: String,

        /// New password
        #[arg(long)]
        password: String,

        /// New password, repeated
        #[arg(long)]
        password_confirmation: String,
    },
}

/// Resolves configuration: files, then environment, then flags.
fn load_config(args: &Args) -> ClientConfig {
    let mut config = ClientConfig::discover_and_load();

    if let Some(api_url) = &args.api_url {
        config.api.base_url.clone_from(api_url);
    }
    if let Some(session_file) = &args.session_file {
        config.storage.session_file = Some(session_file.clone());
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = Some(log_level.clone());
    }

    config
}

fn parse_level(level: Option<&str>) -> Level {
    match level {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("error") => Level::ERROR,
        _ => Level::WARN,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args);

    // Initialize tracing
    let level = parse_level(config.log_level.as_deref());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let context = Arc::new(AppContext::with_file_store(config)?);

    match args.command {
        Command::Login { email, password } => {
            login::execute(&context, email, password).await?;
        }
        Command::Logout => {
            logout::execute(&context)?;
        }
        Command::Whoami { json } => {
            whoami::execute(&context, json)?;
        }
        Command::Profile { name, email, old_password, password, password_confirmation } => {
            let data = profile::ProfileArgs { name, email, old_password, password, password_confirmation };
            profile::execute(&context, data).await?;
        }
        Command::Avatar { file } => {
            avatar::execute(&context, &file).await?;
        }
        Command::ForgotPassword { email } => {
            password::forgot(&context, email).await?;
        }
        Command::ResetPassword { link, password, password_confirmation } => {
            password::reset(&context, &link, password, password_confirmation).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_level(Some("error")), Level::ERROR);
        assert_eq!(parse_level(Some("bogus")), Level::WARN);
        assert_eq!(parse_level(None), Level::WARN);
    }

    #[test]
    fn test_args_parse_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "gobarber",
            "whoami",
            "--json",
            "--api-url",
            "http://api.test/",
            "--session-file",
            "/tmp/session.json",
        ])
        .unwrap();

        assert_eq!(args.api_url.as_deref(), Some("http://api.test/"));
        assert_eq!(args.session_file, Some(PathBuf::from("/tmp/session.json")));
        assert!(matches!(args.command, Command::Whoami { json: true }));
    }

    #[test]
    fn test_args_require_subcommand() {
        assert!(Args::try_parse_from(["gobarber"]).is_err());
    }
}
