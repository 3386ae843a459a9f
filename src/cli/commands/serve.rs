//! Serve the JSON API

use docverify::config::{AppConfig, StorageBackend};
use docverify::server;

/// Bind and serve until interrupted
///
/// Host and port fall back to the `[server]` section of the config.
pub fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    if config.storage.backend == StorageBackend::Memory {
        log::warn!("memory backend: requests are lost when the server stops");
    }
    server::serve(&config.workflow(), &host, port)
}
