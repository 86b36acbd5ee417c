//! Tools domain module.
//!
//! Tools are executable functions that MCP clients can call. This server
//! exposes a single tool, `project_timer`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder wiring tools to the timer service
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
pub mod router;

pub use error::ToolError;
pub use router::build_tool_router;
