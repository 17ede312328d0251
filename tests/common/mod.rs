//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tokio::net::TcpListener;
use url_shortener::lifecycle::build_chain;
use url_shortener::{HttpServer, ShortenerConfig, Shutdown};

/// Write a paths file named `name` into `dir`.
pub fn write_paths(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Config pointing at `paths_file` and a store under `dir`.
pub fn config_for(dir: &Path, paths_file: &Path) -> ShortenerConfig {
    let mut config = ShortenerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.sources.paths_file = paths_file.to_string_lossy().into_owned();
    config.sources.store_path = dir.join("url_shortener.db").to_string_lossy().into_owned();
    config
}

/// Build the chain, bind an ephemeral port and serve in the background.
pub async fn start_server(config: ShortenerConfig, shutdown: &Shutdown) -> SocketAddr {
    let chain = build_chain(&config).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(chain, &config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
