mod commands;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use hoshimi_api::traits::SortOrder;
use hoshimi_api::{ApiError, MasteraniClient};
use hoshimi_core::config::AppConfig;
use hoshimi_core::plugin::{LoggerPlugin, PersistedState};
use hoshimi_core::seed::StaffPick;
use hoshimi_core::storage::StateStorage;
use hoshimi_core::{HoshimiError, Store, WindowMode};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] HoshimiError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Usage(String),
}

#[derive(Parser)]
#[command(name = "hoshimi", version, about = "Browse anime, keep favorites and watch progress")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Staff picks, latest releases and the catalog in one go.
    Home,
    /// Browse or search the catalog.
    Browse {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        order: Option<SortOrder>,
    },
    /// Latest episode releases.
    Releases,
    /// Fetch an anime's details and episodes.
    Details { id: u64 },
    /// Streaming mirrors for an episode.
    Links { slug: String, episode: u32 },
    /// Preferred genres, used to filter browsing.
    Genre {
        #[arg(value_enum)]
        op: Op,
        id: u32,
    },
    Favorite {
        #[arg(value_enum)]
        op: Op,
        id: u64,
    },
    Watching {
        #[arg(value_enum)]
        op: Op,
        id: u64,
    },
    /// Record the playback position of an episode.
    Progress { id: u64, episode: u32, seconds: f64 },
    /// Print a stored view without fetching.
    Show {
        #[arg(value_enum)]
        view: View,
    },
    /// Set the player window mode.
    Window { mode: WindowMode },
    /// Forget persisted favorites, watch progress and preferences.
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Op {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum View {
    Catalog,
    Favorites,
    Watching,
    Searched,
    Picks,
    Genres,
    Releases,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("hoshimi: {e}");
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("hoshimi: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<(), CliError> {
    if let Command::Reset = command {
        let storage = StateStorage::open(&AppConfig::ensure_db_path()?)?;
        return commands::reset(&storage, &config.storage.state_key);
    }

    let store = build_store(config)?;
    let api = MasteraniClient::new(&config.api.base_url, config.api.timeout())?;
    let result = commands::dispatch(command, &store, &api).await;
    store.flush().await;
    result
}

fn build_store(config: &AppConfig) -> Result<Store, CliError> {
    let mut builder = Store::builder()
        .cdn(config.api.cdn())
        .staff_picks(StaffPick::builtin()?)
        .plugin(LoggerPlugin);
    if config.storage.persist {
        let path = AppConfig::ensure_db_path()?;
        let storage = StateStorage::open(&path)?;
        builder = builder.plugin(PersistedState::open(
            storage,
            config.storage.state_key.clone(),
        )?);
    }
    Ok(builder.build())
}
