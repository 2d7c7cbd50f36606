//! # Coffee & Wifi CLI (`cafes`)
//!
//! The `cafes` binary serves the web app and offers a few maintenance
//! commands that work directly on the café store.
//!
//! ## Usage
//!
//! ```bash
//! cafes --config ./config/cafes.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cafes init` | Create an empty store file if none exists |
//! | `cafes list` | Print every café in the store |
//! | `cafes add ...` | Validate and append a café |
//! | `cafes serve` | Start the HTTP server (requires `SECRET_KEY`) |
//!
//! ## Examples
//!
//! ```bash
//! cafes init
//! cafes add --name "Joe's" --location https://maps.example/x \
//!     --opening 8AM --closing 5:30PM --coffee 3 --wifi 0 --power 5
//! cafes list
//! SECRET_KEY=change-me cafes serve
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use coffee_wifi::config::{self, SecretKey};
use coffee_wifi::form::CafeSubmission;
use coffee_wifi::store::CsvStore;
use coffee_wifi::{add_cmd, list_cmd, server};

const DEFAULT_CONFIG_PATH: &str = "./config/cafes.toml";

/// Coffee & Wifi: browse and submit cafés rated for coffee, wifi, and power.
#[derive(Parser)]
#[command(
    name = "cafes",
    about = "Coffee & Wifi: browse and submit cafés rated for coffee, wifi, and power",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, `./config/cafes.toml` is used if it exists and
    /// built-in defaults otherwise.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the store file.
    ///
    /// Safe to run repeatedly; an existing store is never truncated.
    Init,

    /// Print every café in the store.
    List,

    /// Validate a café and append it to the store.
    ///
    /// Uses the same rules as the web form. Ratings are numbers: coffee
    /// 1-5, wifi and power 0-5.
    Add {
        #[arg(long)]
        name: String,

        /// Location on Google Maps (URL).
        #[arg(long)]
        location: String,

        /// Opening time, e.g. `8AM`.
        #[arg(long)]
        opening: String,

        /// Closing time, e.g. `5:30PM`.
        #[arg(long)]
        closing: String,

        #[arg(long)]
        coffee: String,

        #[arg(long)]
        wifi: String,

        #[arg(long)]
        power: String,
    },

    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind`. The `SECRET_KEY` environment variable must
    /// be set; it signs the form tokens.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffee_wifi=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_config_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };

    match cli.command {
        Commands::Init => {
            let store = CsvStore::from_config(&cfg);
            if store.init()? {
                println!("Created cafe store at {}", store.path().display());
            } else {
                println!("Cafe store already exists at {}", store.path().display());
            }
        }
        Commands::List => {
            list_cmd::run_list(&cfg)?;
        }
        Commands::Add {
            name,
            location,
            opening,
            closing,
            coffee,
            wifi,
            power,
        } => {
            let submission = CafeSubmission {
                name,
                location,
                opening,
                closing,
                coffee_rating: coffee,
                wifi_rating: wifi,
                power_rating: power,
                csrf_token: String::new(),
            };
            add_cmd::run_add(&cfg, &submission)?;
        }
        Commands::Serve => {
            let secret = SecretKey::from_env()?;
            server::run_server(&cfg, secret).await?;
        }
    }

    Ok(())
}
