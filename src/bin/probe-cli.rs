use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "Fire the probe routes of a running upstream-probe service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// No bound, no cancellation
    Unbounded,
    /// Bounded wait, call left running on expiry
    Deadline,
    /// Bounded wait, manual cancellation gate
    Gate,
    /// Bounded wait, unified cancellation context
    Context,
    /// Fire every strategy in order
    All,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let strategies: Vec<&str> = match cli.command {
        Commands::Unbounded => vec!["unbounded"],
        Commands::Deadline => vec!["deadline"],
        Commands::Gate => vec!["gate"],
        Commands::Context => vec!["context"],
        Commands::All => vec!["unbounded", "deadline", "gate", "context"],
    };

    // Outcomes land in the service's logs; this side only sees timing.
    for strategy in strategies {
        let started = Instant::now();
        let res = client
            .get(format!("{}/probe/{}", cli.url, strategy))
            .send()
            .await?;
        println!(
            "{:<10} {} in {:?}",
            strategy,
            res.status(),
            started.elapsed()
        );
    }

    Ok(())
}
