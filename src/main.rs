use std::io::{self, BufRead, Write};

use clap::Parser;
use eyre::{eyre, Result};
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

mod access;
mod client;
mod history;
mod models;
mod report;

use client::{BlockCypherClient, DEFAULT_API_URL, DEFAULT_PAGE_LIMIT};
use history::{HistoryOptions, DEFAULT_MAX_BATCHES};
use report::{ReportOptions, DEFAULT_DISPLAY_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "btc-addr-report", version)]
struct Cli {
    /// Bitcoin address to report on (prompted for when omitted)
    address: Option<String>,

    /// Base URL of the BlockCypher chain endpoint
    #[arg(long, env = "BLOCKCYPHER_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Optional BlockCypher API token
    #[arg(long, env = "BLOCKCYPHER_TOKEN")]
    token: Option<String>,

    /// Maximum number of history pages to walk
    #[arg(long, env = "MAX_BATCHES", default_value_t = DEFAULT_MAX_BATCHES)]
    max_batches: usize,

    /// Transactions requested per page
    #[arg(long, env = "PAGE_LIMIT", default_value_t = DEFAULT_PAGE_LIMIT)]
    page_limit: u32,

    /// Transactions printed per direction
    #[arg(long, env = "DISPLAY_LIMIT", default_value_t = DEFAULT_DISPLAY_LIMIT)]
    display_limit: usize,
}

fn prompt_address() -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter a Bitcoin address: ")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(eyre!("no address given on stdin"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let address = match cli.address {
        Some(address) => address,
        None => prompt_address()?,
    };

    let client = BlockCypherClient::new(cli.api_url, cli.token)?;
    let opts = ReportOptions {
        history: HistoryOptions {
            max_batches: cli.max_batches,
            page_limit: cli.page_limit,
        },
        display_limit: cli.display_limit,
    };

    let mut stdout = io::stdout().lock();
    report::print_report(&client, &address, opts, &mut stdout).await?;
    stdout.flush()?;

    Ok(())
}
