use anyhow::Result;
use clap::Parser;
use crud_rest_gateway::{config, server};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crud-gateway", about = "REST gateway that turns CRUD requests into unsigned transactions")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "config/gateway.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = config::GatewayConfig::load(&args.config)?;

    tracing::info!(
        listen = %cfg.listen,
        store  = %cfg.store_name,
        prefix = %cfg.bech32_prefix,
        "starting crud gateway"
    );
    server::run(cfg).await
}
