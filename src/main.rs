//! One-Shield Triage - Main Entry Point

use clap::Parser;

use oneshield_triage::api::{self, Cli};
use oneshield_triage::constants::{APP_NAME, APP_VERSION};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str())).init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    api::execute(cli)
}
