// src/main.rs
//
// reloop CLI
//
// Every subcommand prints JSON on stdout. Failures print an ErrorResponse
// as JSON on stderr and exit non-zero.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use reloop::application::commands;
use reloop::application::{AppState, ErrorResponse};
use reloop::config::AppConfig;
use reloop::domain::ReturnItemInput;
use reloop::services::{CreateReturnRequest, DecisionEngine};

#[derive(Parser, Debug)]
#[command(name = "reloop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to {CONFIG_DIR}/reloop/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide an item without storing it (JSON item from --file or stdin)
    Decide {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Register a return (JSON request from --file or stdin)
    Intake {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Run the decision engine on a pending return
    Process { return_id: String },
    /// Replace a return's disposition with a reviewer decision
    Override {
        return_id: String,
        /// relist, outlet, marketplace_resale, donate, discard, manual_review
        disposition: String,
        #[arg(short, long)]
        platform: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List returns, newest first
    List,
    /// Show one return
    Show { return_id: String },
    /// Delete a return and its listings
    Delete { return_id: String },
    /// List resale listings
    Listings {
        /// pending, listed, sold, withdrawn
        #[arg(short, long)]
        status: Option<String>,
        #[arg(short, long = "return")]
        return_id: Option<String>,
    },
    /// Record a sale
    Sell { listing_id: String, price: f64 },
    /// Take a listing down
    Withdraw { listing_id: String },
    /// Returns report
    Analytics,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ErrorResponse>() {
            Some(response) => match serde_json::to_string_pretty(response) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", response),
            },
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config);

    dispatch(&config, cli.command)
}

/// Pure decisions never touch the database; every other command opens it
fn dispatch(config: &AppConfig, command: Command) -> anyhow::Result<()> {
    let open = || AppState::initialize(config).context("Failed to open the returns database");

    match command {
        Command::Decide { file } => {
            let input: ReturnItemInput = read_json(file.as_deref())?;
            print_json(&commands::decide_item(&DecisionEngine::default(), input)?)
        }
        Command::Intake { file } => {
            let request: CreateReturnRequest = read_json(file.as_deref())?;
            let state = open()?;
            let id = commands::create_return(&state, request)?;
            print_json(&commands::get_return(&state, &id)?)
        }
        Command::Process { return_id } => {
            print_json(&commands::process_return(&open()?, &return_id)?)
        }
        Command::Override {
            return_id,
            disposition,
            platform,
            note,
        } => print_json(&commands::apply_override(
            &open()?,
            &return_id,
            &disposition,
            platform.as_deref(),
            note,
        )?),
        Command::List => print_json(&commands::list_returns(&open()?)?),
        Command::Show { return_id } => print_json(&commands::get_return(&open()?, &return_id)?),
        Command::Delete { return_id } => {
            commands::delete_return(&open()?, &return_id)?;
            print_json(&serde_json::json!({ "deleted": return_id }))
        }
        Command::Listings { status, return_id } => {
            let state = open()?;
            match return_id {
                Some(return_id) => print_json(&commands::listings_for_return(&state, &return_id)?),
                None => print_json(&commands::list_listings(&state, status.as_deref())?),
            }
        }
        Command::Sell { listing_id, price } => {
            print_json(&commands::sell_listing(&open()?, &listing_id, price)?)
        }
        Command::Withdraw { listing_id } => {
            print_json(&commands::withdraw_listing(&open()?, &listing_id)?)
        }
        Command::Analytics => print_json(&commands::get_analytics(&open()?)?),
    }
}

/// RUST_LOG wins over the configured filter
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(file: Option<&Path>) -> anyhow::Result<T> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Cannot read stdin")?;
            buffer
        }
    };

    serde_json::from_str(&content).map_err(|e| {
        anyhow::Error::new(ErrorResponse::validation(format!(
            "Malformed JSON input: {}",
            e
        )))
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
