use clap::Parser;
use tracing::info;

use tokenwatch::adapter::inbound::cli::command::{Cli, Commands};
use tokenwatch::adapter::inbound::cli::output::{self, OutputConfig};
use tokenwatch::adapter::inbound::cli::{check, run, show, tick};
use tokenwatch::error::Result;
use tokenwatch::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = dispatch(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    if let Commands::CheckConfig = cli.command {
        return check::execute_config(&cli.config);
    }

    let config = Config::load_or_default(&cli.config)?;
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "tokenwatch starting");

    match cli.command {
        Commands::Run => run::execute(config).await,
        Commands::Tick(args) => tick::execute(&config, &args).await,
        Commands::Show => show::execute(&config),
        Commands::CheckConfig => check::execute_config(&cli.config),
    }
}
