mod api;
mod server_config;
mod session_store;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::config::{ConfigManager, FileContentConfigProvider};
use common::{log, logger};
use server_config::{DEFAULT_CONFIG_PATH, ServerConfig};
use session_store::GameSessionStore;
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write the effective config to `--config` and exit.
    #[arg(long)]
    init_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config()?;

    if args.init_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config.display());
        return Ok(());
    }

    log!(
        "Loaded config from {} (bind {}, static files {})",
        args.config.display(),
        config.bind_address,
        config.static_files_path
    );

    let store = GameSessionStore::new();
    run_web_server(&config, store.clone()).await?;

    log!("Server shut down gracefully after {} games", store.game_count().await);

    Ok(())
}
