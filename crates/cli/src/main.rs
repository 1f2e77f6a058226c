//! Jungle Park CLI - data directory management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write demo menu, programs, and banners into the data directory
//! jp seed
//!
//! # Create a staff account
//! jp admin create -u dana -p secret123 -r Bartender
//!
//! # Reset a staff password (forces a change on next login)
//! jp admin set-password -u dana -p newpass123
//!
//! # Toggle the owner authorization gate
//! jp authorize on
//!
//! # Toggle maintenance mode
//! jp maintenance off
//! ```
//!
//! Every command works directly on the JSON documents under `DATA_DIR`,
//! using the same configuration loading as the site server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jp")]
#[command(author, version, about = "Jungle Park CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write demo menu, programs, and banners into the data directory
    Seed {
        /// Overwrite documents that already contain records
        #[arg(long)]
        force: bool,
    },
    /// Manage staff accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Switch the owner authorization gate for booking requests
    Authorize {
        #[command(subcommand)]
        state: Switch,
    },
    /// Switch maintenance mode for the public site
    Maintenance {
        #[command(subcommand)]
        state: Switch,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new staff account
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`Administrator`, `Bartender`, `Cashier`)
        #[arg(short, long, default_value = "Cashier")]
        role: String,
    },
    /// Reset a password; the account must change it on next login
    SetPassword {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// New password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum Switch {
    /// Turn the flag on
    On,
    /// Turn the flag off
    Off,
}

impl Switch {
    const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { force } => commands::seed::demo_data(force).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                password,
                role,
            } => {
                commands::admin::create_user(&username, &password, &role).await?;
            }
            AdminAction::SetPassword { username, password } => {
                commands::admin::set_password(&username, &password).await?;
            }
        },
        Commands::Authorize { state } => {
            commands::switches::authorize(state.enabled()).await?;
        }
        Commands::Maintenance { state } => {
            commands::switches::maintenance(state.enabled()).await?;
        }
    }
    Ok(())
}
