//! HEO CLI - run and query the Himalayan earth-observation indicator service.

use clap::Parser;
use dotenv::dotenv;
use log::debug;

#[derive(Parser)]
#[command(
    name = "heo-cli",
    version,
    about = "Himalayan earth-observation indicator toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: heo_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; NASA keys and HEO_* settings may come from it
    let env_file = dotenv().ok();
    env_logger::init();
    if let Some(path) = env_file {
        debug!("loaded environment from {}", path.display());
    }
    let cli = Cli::parse();
    heo_cmd::run(cli.command).await
}
