use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sso_agent::server;
use sso_agent::service::SsoService;
use sso_agent::utils::config_loader;
use sso_agent::utils::logging::{self, LogLevel};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "sso-agent.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load and validate config; any problem aborts startup
    // -------------------------------

    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build resolver, issuer and dispatcher
    // -------------------------------

    let sso = Arc::new(SsoService::from_config(&service_config)?);

    // -------------------------------
    // 3. Serve
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config, sso).await?;

    Ok(())
}
