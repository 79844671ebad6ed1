//! path-mount server.
//!
//! Serves static responders mounted under path prefixes, as declared in a
//! TOML configuration file.
//!
//! ```text
//!  request ─▶ request id ─▶ trace ─▶ timeout ─▶ App
//!                                               ├─ mount("/foo", [respond, mount("/bar", ..)])
//!                                               └─ mount("/hello", [respond])
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use path_mount::config::{self, ConfigError, ServerConfig};
use path_mount::lifecycle::{signals, Shutdown};
use path_mount::observability::{logging, metrics};
use path_mount::HttpServer;

#[derive(Parser)]
#[command(name = "path-mount")]
#[command(about = "Serve static responders mounted under path prefixes", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    config::validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "path-mount starting"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let app = config::build_app(&config).map_err(ConfigError::Mount)?;
    tracing::info!(mounts = config.mounts.len(), "Application built");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    let server = HttpServer::new(app, config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
