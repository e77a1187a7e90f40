mod batch;
mod bing;
mod cli;
mod fetch;

pub const USER_AGENT: &str = concat!("wallgrab/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use bing::client::BingClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wallgrab=info".parse()?),
        )
        .init();

    let config = cli::Cli::parse().into_config();
    info!(query = %config.query, limit = config.limit, "starting wallgrab");

    let http = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let search = BingClient::new(http.clone());

    let report = batch::run(&search, &http, &config).await?;
    print!("{}", batch::format_report(&report));

    Ok(())
}
