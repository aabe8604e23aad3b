//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use formauth_core::components::Gender;
use formauth_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "formauth")]
#[command(version)]
#[command(about = "Validated form and login flow for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fill and submit the validated form
    Form {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// male or female (case-insensitive)
        #[arg(long)]
        gender: Option<Gender>,

        #[arg(long)]
        hiking: bool,

        #[arg(long)]
        running: bool,

        #[arg(long)]
        swimming: bool,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,

        #[arg(long, env = "FORMAUTH_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Read the password from the first line of stdin
        #[arg(long, conflicts_with = "password")]
        password_stdin: bool,
    },

    /// Clear the stored session
    Logout,

    /// Show the stored session without contacting the provider
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a config file with defaults
    Init,
    /// Print the default config template
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive UI
    let Some(command) = cli.command else {
        return commands::tui::run(&config);
    };

    logging::init_stderr(&config.logging.level);

    match command {
        Commands::Form {
            first_name,
            last_name,
            gender,
            hiking,
            running,
            swimming,
        } => commands::form::run(&commands::form::FormArgs {
            first_name,
            last_name,
            gender,
            hiking,
            running,
            swimming,
        }),

        Commands::Login {
            email,
            password,
            password_stdin,
        } => commands::auth::login(&config, email, password, password_stdin).await,

        Commands::Logout => commands::auth::logout(&config),

        Commands::Status => commands::auth::status(&config),

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
