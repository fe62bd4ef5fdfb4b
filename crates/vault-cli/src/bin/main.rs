//! Passvault CLI
//!
//! Authenticates against the remote service, then serves a JSON-lines vault
//! session on stdin/stdout. Logs go to stderr so stdout stays a clean
//! protocol channel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use vault_cli::{AuthClient, StdioSession};
use vault_core::storage::default_data_dir;
use vault_core::{generate_secret, strength, SettingsManager, StorageBackend, Vault};

/// Passvault - credential vault with security analysis
#[derive(Parser, Debug)]
#[command(name = "passvault")]
#[command(version)]
#[command(about = "Store credentials and inspect their security posture")]
struct Args {
    /// Base URL of the authentication service (overrides settings.json)
    #[arg(long, env = "PASSVAULT_AUTH_URL")]
    auth_url: Option<String>,

    /// Record storage: memory or file (overrides settings.json)
    #[arg(long, env = "PASSVAULT_STORAGE")]
    storage: Option<StorageBackend>,

    /// Directory for settings and file storage
    #[arg(long, env = "PASSVAULT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Account password (prompted for when absent)
    #[arg(long, env = "PASSVAULT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account with the authentication service
    Register { username: String },
    /// Log in and serve a vault session on stdio
    Login { username: String },
    /// Score a secret
    Strength { secret: String },
    /// Generate a random secret
    Generate {
        #[arg(long)]
        length: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let settings = SettingsManager::new(&data_dir)?.get().clone();

    let auth_url = args.auth_url.unwrap_or(settings.auth_url);
    let backend = args.storage.unwrap_or(settings.storage);
    let timeout = Duration::from_secs(settings.request_timeout_secs);

    match args.command {
        Command::Strength { secret } => {
            let report = strength::evaluate(&secret);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Generate { length } => {
            let secret = generate_secret(length.unwrap_or(settings.generated_length))?;
            println!("{}", secret.expose());
        }
        Command::Register { username } => {
            let password = read_password(args.password)?;
            let client = AuthClient::new(&auth_url, timeout)?;
            client.register(&username, &password).await?;
            eprintln!("Registered {}", username);
        }
        Command::Login { username } => {
            let password = read_password(args.password)?;
            let client = AuthClient::new(&auth_url, timeout)?;
            client.login(&username, &password).await?;

            let mut vault = Vault::open_backend(backend, &data_dir).await?;
            vault.login(&username);
            eprintln!("Welcome, {}", vault.session().display_name());
            info!("Vault storage: {}", vault.backend_name());

            let vault = Arc::new(RwLock::new(vault));
            StdioSession::new(vault, settings.generated_length).run().await?;
            info!("Session closed");
        }
    }

    Ok(())
}

fn read_password(given: Option<String>) -> std::io::Result<String> {
    match given {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: "),
    }
}
