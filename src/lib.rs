//! Project Timer MCP Server Library
//!
//! An MCP (Model Context Protocol) server exposing one tool, `project_timer`,
//! that starts and stops named task timers. Active timers are persisted in a
//! JSON file, and every start/stop is pushed to desktop listeners over a
//! Server-Sent Events stream.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server, transports and
//!   the notification channel
//! - **domains**: business logic organized by bounded contexts
//!   - **timers**: timer lifecycle, persistence and duration formatting
//!   - **tools**: the `project_timer` tool
//!   - **resources**: the `timers://active` resource
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use project_timer_mcp::core::{Broadcaster, Config, McpServer};
//! use project_timer_mcp::domains::timers::{TimerService, TimerStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let timers = Arc::new(TimerService::new(
//!         TimerStore::new(config.timers.file.clone()),
//!         Arc::new(Broadcaster::new()),
//!     ));
//!     let server = McpServer::new(config, timers);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
