//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the timer
//! server: error handling, configuration, the MCP server handler, the
//! transport layer, and the notification channel.

pub mod config;
pub mod error;
pub mod notifications;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use notifications::{Broadcaster, EventServer, TimerEvent};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
