use std::path::PathBuf;

use aavebanks::api::{ApiResponse, BanksResponse, DashboardResponse, ProtocolResponse};
use aavebanks::config::{default_config_path, Config};
use aavebanks::{DashboardService, Entry};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. Logs go to stderr, tables to stdout.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "aavebanks", version)]
#[command(about = "Rank Aave's deposits against the largest U.S. banks")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the ranked table around Aave (default)
    Dashboard {
        /// Show every row instead of the window around Aave
        #[arg(long)]
        all: bool,

        /// Print the API response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show Aave's normalized deposits
    Aave {
        #[arg(long)]
        json: bool,
    },
    /// Show the bank list as extracted from the Federal Reserve release
    Banks {
        #[arg(long)]
        json: bool,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path)?;

    let command = cli.command.unwrap_or(Command::Dashboard {
        all: false,
        json: false,
    });

    match command {
        Command::Config => {
            println!("Config file: {}", config_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Command::Dashboard { all, json } => {
            let service = DashboardService::from_config(&config)?;
            let dashboard = service.dashboard().await?;

            if json {
                let response = DashboardResponse::from(dashboard);
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            let ranking = &dashboard.ranking;
            let shown = if all {
                ranking.entries.as_slice()
            } else {
                config.display.window().select(&ranking.entries, ranking.aave_index())
            };

            println!("{}", headline(ranking.aave_rank));
            println!();
            print!("{}", render_table(shown));
            println!();
            println!("Source: {}", dashboard.source);
            println!(
                "Showing {} of {} entries. Last updated: {}",
                shown.len(),
                ranking.entries.len(),
                dashboard.last_updated
            );
        }
        Command::Aave { json } => {
            let service = DashboardService::from_config(&config)?;
            let entry = service.protocol_entry().await?;

            if json {
                let response: ProtocolResponse = ApiResponse::ok(entry);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}: {}", entry.name, entry.deposits);
            }
        }
        Command::Banks { json } => {
            let service = DashboardService::from_config(&config)?;
            let banks = service.bank_list().await?;

            if json {
                let response = BanksResponse::from(banks);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_table(&banks.entries));
                println!();
                println!(
                    "{} banks from {} (extraction: {})",
                    banks.entries.len(),
                    banks.source,
                    banks.tier
                );
            }
        }
    }

    Ok(())
}

fn headline(aave_rank: Option<usize>) -> String {
    match aave_rank {
        Some(rank) => format!("Aave ranks #{rank} among U.S. banks by deposit size."),
        None => "Aave compared with top U.S. banks by deposit size.".to_string(),
    }
}

/// Plain text table; the Aave row is marked with `*`.
fn render_table(entries: &[Entry]) -> String {
    let name_width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let deposits_width = entries
        .iter()
        .map(|entry| entry.deposits.len())
        .max()
        .unwrap_or(0)
        .max("Deposits".len());

    let mut out = format!(
        "  {:>4}  {:<name_width$}  {:>deposits_width$}\n",
        "Rank", "Name", "Deposits"
    );
    for entry in entries {
        let marker = if entry.is_aave { '*' } else { ' ' };
        let rank = entry.rank.map(|rank| rank.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{marker} {rank:>4}  {:<name_width$}  {:>deposits_width$}\n",
            entry.name, entry.deposits
        ));
    }
    out
}
