//! Flowlist main entry point

use clap::Parser;
use flowlist_api::start_server;
use flowlist_config::Config;
use flowlist_core::Dataset;
use flowlist_data::JsonDataSource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "flowlist")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight transaction list web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The logger is not up yet, so a fallback warning goes straight to stderr
    let config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[WARN] {}; using built-in defaults", e);
            Config::default()
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    let rt = Runtime::new()?;
    rt.block_on(async {
        let source = Arc::new(JsonDataSource);
        let mut dataset = Dataset::new(config.clone(), source);

        let data_path = config.data_path();
        if data_path.exists() {
            if let Err(e) = dataset.load(data_path.clone()).await {
                log::error!("Failed to load {}: {}", data_path.display(), e);
            }
        } else {
            log::warn!("Data file not found: {}", data_path.display());
        }

        let dataset = Arc::new(RwLock::new(dataset));
        start_server(config, dataset).await
    })
}
