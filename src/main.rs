//! URL shortener server.
//!
//! # Architecture Overview
//!
//! ```text
//!   request path
//!        │
//!        ▼
//!   ┌─────────┐  miss  ┌─────────┐  miss  ┌─────────┐  miss  ┌───────────┐
//!   │  store  │───────▶│  file   │───────▶│ literal │───────▶│  default  │
//!   │  layer  │        │  layer  │        │  layer  │        │ responder │
//!   └────┬────┘        └────┬────┘        └────┬────┘        └─────┬─────┘
//!        │ hit              │ hit              │ hit               │
//!        ▼                  ▼                  ▼                   ▼
//!   303 See Other, Location: <mapped url>            200 "/" greeting | 404
//!
//!   startup (once): config → paths file → store seed + snapshot → chain
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use url_shortener::config::{load_config, validation::validate_config, ConfigError};
use url_shortener::lifecycle::build_chain;
use url_shortener::observability::logging;
use url_shortener::{HttpServer, ShortenerConfig, Shutdown};

#[derive(Parser)]
#[command(name = "url-shortener")]
#[command(about = "Redirect short paths to their configured URLs", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Paths file (.yaml, .yml or .json).
    #[arg(short, long)]
    file: Option<String>,

    /// Listening port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Embedded store directory.
    #[arg(long)]
    db: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ShortenerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ShortenerConfig::default(),
        };

        if let Some(file) = self.file {
            config.sources.paths_file = file;
        }
        if let Some(port) = self.port {
            config.listener.set_port(port);
        }
        if let Some(db) = self.db {
            config.sources.store_path = db;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level);
    tracing::info!("url-shortener v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        paths_file = %config.sources.paths_file,
        store = %config.sources.store_path,
        bucket = %config.sources.bucket,
        "Configuration loaded"
    );

    // Store and file I/O is blocking; keep it off the async workers.
    let chain = tokio::task::spawn_blocking({
        let config = config.clone();
        move || build_chain(&config)
    })
    .await??;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(chain, &config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
