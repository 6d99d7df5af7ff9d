//! # Eco Directory CLI (`eco`)
//!
//! ## Usage
//!
//! ```bash
//! eco --config ./config/eco.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `eco sources` | List configured listings and where they load from |
//! | `eco list <listing>` | Show one page of a listing as cards |
//! | `eco facets <listing>` | Show the filter options of a listing |
//! | `eco admin <listing>` | Show the admin table, optionally deleting a record |
//! | `eco nav` | Show navigation items from the entity-type lookup |
//! | `eco serve` | Start the JSON HTTP API |
//!
//! ## Examples
//!
//! ```bash
//! # Accelerators in Algiers, oldest first
//! eco list accelerators --filter Algiers --sort asc
//!
//! # Second page of media outlets matching "radio"
//! eco list media --search radio --page 2
//!
//! # Delete a record without prompting
//! eco admin accelerators --delete 3 --yes
//! ```

use clap::{Parser, Subcommand};
use eco_directory::admin::{self, AdminArgs};
use eco_directory::listing::{self, ListOutput, ListingRequest};
use eco_directory::{config, logging, nav_cmd, server, sources};
use eco_directory_core::models::SortOrder;
use std::path::PathBuf;

/// Eco Directory CLI: browse and administer ecosystem listings.
#[derive(Parser)]
#[command(
    name = "eco",
    about = "Eco Directory: browse and administer startup ecosystem listings",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/eco.toml")]
    config: PathBuf,

    /// Log at debug level regardless of `[log].level`.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured listings and their origins.
    Sources,

    /// Show one page of a listing.
    ///
    /// Search matches name, description and category, case-insensitively.
    /// Changing the search or filter starts from page 1.
    List {
        /// Listing name as configured under `[sources.<name>]`.
        listing: String,

        #[arg(long)]
        search: Option<String>,

        /// Category value, or `all`.
        #[arg(long)]
        filter: Option<String>,

        /// `desc` (newest first, default) or `asc`.
        #[arg(long)]
        sort: Option<SortOrder>,

        /// 1-based page; out-of-range pages are clamped.
        #[arg(long)]
        page: Option<usize>,

        /// Print the page as JSON.
        #[arg(long)]
        json: bool,

        /// Show full descriptions.
        #[arg(long)]
        expand: bool,
    },

    /// Show the filter options of a listing.
    Facets { listing: String },

    /// Show the admin table of a listing.
    Admin {
        listing: String,

        /// Filter rows on the listing's search column.
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<usize>,

        /// Delete the record with this id (asks for confirmation).
        #[arg(long)]
        delete: Option<String>,

        /// Confirm the deletion without prompting.
        #[arg(long, requires = "delete")]
        yes: bool,
    },

    /// Show navigation items built from the `entity_types` lookup.
    Nav {
        #[arg(long)]
        json: bool,
    },

    /// Start the JSON HTTP API on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    logging::init(&cfg.log.level, cli.verbose)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::List {
            listing: name,
            search,
            filter,
            sort,
            page,
            json,
            expand,
        } => {
            let req = ListingRequest {
                search,
                filter,
                sort,
                page,
            };
            listing::run_list(&cfg, &name, &req, ListOutput { json, expand }).await?;
        }
        Commands::Facets { listing: name } => {
            listing::run_facets(&cfg, &name).await?;
        }
        Commands::Admin {
            listing: name,
            search,
            page,
            delete,
            yes,
        } => {
            let args = AdminArgs {
                search,
                page,
                delete,
                yes,
            };
            admin::run_admin(&cfg, &name, &args).await?;
        }
        Commands::Nav { json } => {
            nav_cmd::run_nav(&cfg, json).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
