//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use herdlink_core::api::ApiClient;
use herdlink_core::config::Config;
use herdlink_core::session::{SessionStore, session_cache};

mod commands;

#[derive(Parser)]
#[command(name = "herdlink")]
#[command(version)]
#[command(about = "Dairy-farm operations from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in to the backend and cache the session
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and clear the cached session
    Logout,

    /// Show the identity of the cached session
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Herd registry commands
    Cows {
        #[command(subcommand)]
        command: CowsCommands,
    },

    /// Farm task commands
    Tasks {
        #[command(subcommand)]
        command: TasksCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the backend base URL in the config file
    SetUrl {
        /// The base URL to persist
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[derive(clap::Subcommand)]
enum CowsCommands {
    /// Lists cows in the herd registry
    List {
        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Shows a single cow
    Show {
        /// The ID of the cow to show
        #[arg(value_name = "COW_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum TasksCommands {
    /// Lists farm tasks
    List {
        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Marks a task as completed
    Complete {
        /// The ID of the task to complete
        #[arg(value_name = "TASK_ID")]
        id: i64,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // Config commands never touch the network or the session.
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(url),
        };
    }

    let store = SessionStore::with_session(session_cache::load().context("load session cache")?);
    let client = ApiClient::from_config(&config, store).context("build API client")?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, password).await
        }
        Commands::Logout => commands::auth::logout(client.store()),
        Commands::Whoami => commands::auth::whoami(client.store()),
        Commands::Cows { command } => match command {
            CowsCommands::List { page } => {
                commands::cows::list(&client, page, config.page_size).await
            }
            CowsCommands::Show { id } => commands::cows::show(&client, id).await,
        },
        Commands::Tasks { command } => match command {
            TasksCommands::List { page } => {
                commands::tasks::list(&client, page, config.page_size).await
            }
            TasksCommands::Complete { id } => commands::tasks::complete(&client, id).await,
        },
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
