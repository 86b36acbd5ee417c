//! Resources domain module.
//!
//! Resources represent data that MCP clients can read. The server exposes the
//! running timers so an assistant can check what is being tracked without
//! starting or stopping anything.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use service::ResourceService;
