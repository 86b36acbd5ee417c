//! Tool definitions module.
//!
//! Each tool is defined in its own file with its parameters, its
//! `execute()` logic and the route that registers it with rmcp.

pub mod project_timer;

pub use project_timer::{ProjectTimerParams, ProjectTimerTool, TimerAction};
