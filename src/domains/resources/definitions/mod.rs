//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and a
//! `read` function producing the current content.

mod active_timers;

pub use active_timers::ActiveTimersResource;

use super::ResourceError;
use crate::domains::timers::TimerService;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Render the current content of the resource.
    fn read(timers: &TimerService) -> Result<String, ResourceError>;
}
