//! Project Timer MCP Server Entry Point
//!
//! Initializes logging, loads configuration, starts the notification event
//! stream, and serves the MCP protocol on the configured transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use project_timer_mcp::core::{Broadcaster, Config, EventServer, McpServer, TransportService};
use project_timer_mcp::domains::timers::{TimerService, TimerStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Notifications are best-effort: a busy port only disables them
    let broadcaster = Arc::new(Broadcaster::new());
    if config.events.enabled {
        EventServer::new(config.events.clone(), broadcaster.clone())
            .start()
            .await;
    } else {
        info!("Desktop notifications disabled by configuration");
        broadcaster.disable();
    }

    let store = TimerStore::new(config.timers.file.clone());
    info!("Timer file: {}", store.path().display());
    let timers = Arc::new(TimerService::new(store, broadcaster));

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, timers);

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
