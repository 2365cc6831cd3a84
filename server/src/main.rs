use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use common::config::ConfigManager;
use common::{log, log_error, logger};
use snake_server::server_config::DEFAULT_CONFIG_PATH;
use snake_server::{ServerConfig, SnakeServer, StarterController};

#[derive(Parser)]
#[command(name = "snake_server")]
struct Args {
    /// YAML configuration file; defaults apply when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides the configured port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);
    if args.write_default_config {
        config_manager.set_config(&ServerConfig::default())?;
        println!("Wrote default configuration to {}", config_manager.source());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);
    log!("Using configuration from {}", config_manager.source());

    let controller = Arc::new(StarterController::new(config.snake_color));
    let server = SnakeServer::start(&config, controller).await?;

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log!("Shutdown signal received");
                shutdown.trigger();
            }
            Err(e) => log_error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    server.wait().await?;
    log!("Server shut down gracefully");

    Ok(())
}
