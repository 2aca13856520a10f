use anyhow::Result;
use clap::Parser;
use colored::*;
use std::time::{Duration, Instant};

mod api_client;
mod output;
mod sse_client;

use api_client::ApiClient;
use output::{print_arrival, print_summary, RunResult};
use sse_client::Connection;

#[derive(Parser)]
#[command(name = "onenine-client")]
#[command(about = "Shows when each value of 1..=9 reaches the client")]
struct Cli {
    /// Base URL of the server (e.g., http://localhost:4000)
    #[arg(long, default_value = "http://localhost:4000")]
    base_url: String,

    /// Which endpoint to call
    #[arg(long, value_enum, default_value = "both")]
    mode: ModeChoice,

    /// Seconds to wait for any single value before giving up
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, PartialEq)]
enum ModeChoice {
    /// Only the eager list endpoint
    List,
    /// Only the streaming flux endpoint
    Flux,
    /// Both, one after the other
    Both,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    let timeout = Duration::from_secs(cli.timeout_secs);
    let mut results = Vec::new();

    if cli.mode != ModeChoice::Flux {
        println!("\n{}", "=== LIST ===".bright_white().bold());
        println!("{} Waiting for the whole list...", "→".blue());

        let api_client = ApiClient::new(reqwest::Client::new(), cli.base_url.clone());
        let result = api_client.fetch_list().await?;
        for arrival in &result.arrivals {
            print_arrival("list", arrival);
        }
        results.push(result);
    }

    if cli.mode != ModeChoice::List {
        println!("\n{}", "=== FLUX ===".bright_white().bold());
        println!("{} Subscribing to the event stream...", "→".blue());

        results.push(stream_flux(&cli.base_url, timeout).await?);
    }

    print_summary(&results);

    if results.iter().all(RunResult::is_complete) {
        Ok(())
    } else {
        anyhow::bail!("At least one endpoint did not deliver 1 through 9")
    }
}

async fn stream_flux(base_url: &str, timeout: Duration) -> Result<RunResult> {
    let mut connection = Connection::establish(base_url)?;
    let started: Instant = connection.started();
    let mut arrivals = Vec::new();

    while let Some(arrival) = connection.next_arrival(timeout).await? {
        print_arrival("flux", &arrival);
        arrivals.push(arrival);
    }

    Ok(RunResult {
        endpoint: sse_client::FLUX_PATH.to_string(),
        arrivals,
        total: started.elapsed(),
    })
}
