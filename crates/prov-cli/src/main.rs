use anyhow::Result;
use clap::{Parser, Subcommand};
use prov_cli::commands::ledger::{AddArgs, SourceSpec};
use prov_cli::commands::{keys, ledger};
use prov_cli::config::{Config, LEDGER_ENV};
use prov_ledger::{Address, ProductId};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Product provenance ledger CLI.
#[derive(Parser, Debug)]
#[command(name = "provctl", author = "provctl contributors", version)]
struct Cli {
    /// Configuration file (defaults to ./provctl.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Ledger snapshot path, overriding the config file and PROVCTL_LEDGER.
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty ledger owned by the key's address.
    Init {
        /// Key file of the owner.
        #[arg(long)]
        owner_key: PathBuf,
        /// Replace an existing ledger file.
        #[arg(long)]
        force: bool,
    },
    /// Print the ledger owner.
    Owner,
    /// Authorize an address (owner only).
    Authorize {
        /// Key file of the caller.
        #[arg(long)]
        key: PathBuf,
        /// Address to authorize.
        address: Address,
    },
    /// Show whether an address is authorized.
    Status {
        address: Address,
    },
    /// Register a product under the key's address.
    Add {
        /// Key file of the registrant.
        #[arg(long)]
        key: PathBuf,
        #[arg(long)]
        id: ProductId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Source product as `provider:id:signature`, repeatable.
        #[arg(long = "source")]
        sources: Vec<SourceSpec>,
    },
    /// Show a registered product and its direct sources.
    Trace {
        registrant: Address,
        id: ProductId,
        /// Walk the full ancestry instead of one level.
        #[arg(long)]
        recursive: bool,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Re-verify every stored source link.
    Audit,
    /// Generate a secp256k1 key.
    Keygen {
        /// Write the key to this file instead of printing it.
        output: Option<PathBuf>,
    },
    /// Sign a source link: product `id` of the key's address endorsing `verifier`.
    Sign {
        #[arg(long)]
        key: PathBuf,
        id: ProductId,
        verifier: Address,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env(std::env::var(LEDGER_ENV).ok());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = config.ledger_path(cli.ledger.as_deref());
    debug!(ledger = %path.display(), "resolved ledger path");

    match cli.command {
        Commands::Init { owner_key, force } => ledger::cmd_init(&path, &owner_key, force),
        Commands::Owner => ledger::cmd_owner(&path),
        Commands::Authorize { key, address } => ledger::cmd_authorize(&path, &key, address),
        Commands::Status { address } => ledger::cmd_status(&path, address),
        Commands::Add {
            key,
            id,
            name,
            time,
            location,
            sources,
        } => ledger::cmd_add(
            &path,
            &key,
            AddArgs {
                id,
                name,
                time,
                location,
                sources,
            },
        ),
        Commands::Trace {
            registrant,
            id,
            recursive,
            json,
        } => ledger::cmd_trace(&path, registrant, id, recursive, json),
        Commands::Audit => ledger::cmd_audit(&path),
        Commands::Keygen { output } => keys::cmd_keygen(output),
        Commands::Sign { key, id, verifier } => keys::cmd_sign(&key, id, verifier),
    }
}
