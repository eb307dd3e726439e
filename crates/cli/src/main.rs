use clap::{Parser, Subcommand};

mod commands;

use commands::{AnalyzeArgs, PayoffArgs, ServerArgs};

#[derive(Parser)]
#[command(name = "stock-insight")]
#[command(about = "Stock analysis and option payoff modelling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full earnings/sector/macro analysis for a ticker
    Analyze(AnalyzeArgs),
    /// Compute a payoff curve and break-evens for a position
    Payoff(PayoffArgs),
    /// Start the web API server
    Server(ServerArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            commands::run_analyze(args).await?;
        }
        Commands::Payoff(args) => {
            commands::run_payoff(args)?;
        }
        Commands::Server(args) => {
            commands::run_server(args).await?;
        }
    }

    Ok(())
}
