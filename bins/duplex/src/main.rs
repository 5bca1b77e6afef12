mod config;
mod error;

use clap::Parser;
use config::{Cli, Commands};

mod cmd;

use cmd::run::Direction;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Apply(args) => cmd::run::run(args, Direction::Decode).await,
        Commands::Unapply(args) => cmd::run::run(args, Direction::Encode).await,
        Commands::Check(args) => cmd::check::run(args).await,
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
