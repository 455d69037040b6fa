use clap::Parser;
use stock_sim::cli::{Cli, Commands};
use stock_sim::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {:#}", cli.config, e);
            eprintln!("Using bundled default configuration");
            Config::parse(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _telemetry = stock_sim::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!(mode = %args.mode, "Starting playback");
            args.execute(&config).await?;
        }
        Commands::Backtest(args) => {
            tracing::info!(mode = %args.mode, "Starting backtest");
            args.execute(&config).await?;
        }
        Commands::Tickers(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
