//! Torreblanca command-line client for the school records and events API.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod format;
mod logging;

use commands::{
    cmd_country, cmd_create, cmd_delete, cmd_events, cmd_get, cmd_list, cmd_primary, cmd_region,
    cmd_search, cmd_update, CreateArgs, Services, UpdateArgs,
};
use torreblanca_core::types::DbId;

#[derive(Parser)]
#[command(name = "torreblanca")]
#[command(about = "Manage school records and browse events on the Torreblanca API")]
#[command(after_help = "\
ENVIRONMENT:
  TORREBLANCA_API_ROOT    API root (default: https://escuelatorreblanca.cl/api)
  REQUEST_TIMEOUT_SECS    Optional whole-request timeout in seconds
  RUST_LOG                Log filter, logs are written to stderr")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record in server order
    List,
    /// Show the primary (first) record
    Primary,
    /// Show one record by id
    Get { id: DbId },
    /// Records whose name contains TERM, ignoring case
    Search { term: String },
    /// Records in a region
    Region { name: String },
    /// Records in a country
    Country { name: String },
    /// Create a record
    Create(CreateArgs),
    /// Change fields of an existing record
    Update(UpdateArgs),
    /// Delete a record
    Delete { id: DbId },
    /// List events, split into upcoming and past
    Events {
        /// Only upcoming events
        #[arg(long, conflicts_with = "past")]
        upcoming: bool,
        /// Only past events
        #[arg(long)]
        past: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let services = Services::from_env()?;

    match cli.command {
        Commands::List => cmd_list(&services, cli.json).await,
        Commands::Primary => cmd_primary(&services, cli.json).await,
        Commands::Get { id } => cmd_get(&services, id, cli.json).await,
        Commands::Search { term } => cmd_search(&services, &term, cli.json).await,
        Commands::Region { name } => cmd_region(&services, &name, cli.json).await,
        Commands::Country { name } => cmd_country(&services, &name, cli.json).await,
        Commands::Create(args) => cmd_create(&services, args).await,
        Commands::Update(args) => cmd_update(&services, args).await,
        Commands::Delete { id } => cmd_delete(&services, id).await,
        Commands::Events { upcoming, past } => {
            cmd_events(&services, upcoming, past, cli.json).await
        }
    }
}
