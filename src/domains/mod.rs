//! Domains module containing business logic organized by bounded contexts.
//!
//! - **timers**: the timer lifecycle, persistence and duration formatting
//! - **tools**: the `project_timer` MCP tool
//! - **resources**: read-only views of the running timers

pub mod resources;
pub mod timers;
pub mod tools;
