use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use coverart_server::config::Config;
use coverart_server::serve;

#[derive(Parser, Debug)]
#[command(name = "coverart-server")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yml")]
    config: PathBuf,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    let config = Config::load(&args.config)?;
    info!(
        "config loaded base_dir={} overrides={:?} artist_candidates={:?} album_candidates={:?}",
        config.base_dir, config.root_overrides, config.images.artist, config.images.album
    );

    let app = serve::router(Arc::new(config));
    let addr = format!("0.0.0.0:{}", args.port);
    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
