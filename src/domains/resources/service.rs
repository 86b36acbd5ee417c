//! Resource service implementation.
//!
//! Resources are defined in `definitions/` and listed here. Content is
//! rendered on every read, so it always reflects the timer file on disk.

use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};
use std::sync::Arc;
use tracing::info;

use super::definitions::{ActiveTimersResource, ResourceDefinition};
use super::error::ResourceError;
use crate::domains::timers::TimerService;

/// Service for listing and reading resources.
pub struct ResourceService {
    timers: Arc<TimerService>,
}

impl ResourceService {
    /// Create a new ResourceService backed by the timer service.
    pub fn new(timers: Arc<TimerService>) -> Self {
        info!("Initializing ResourceService");
        Self { timers }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        vec![describe::<ActiveTimersResource>()]
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        if uri != ActiveTimersResource::URI {
            return Err(ResourceError::not_found(uri));
        }
        let content = render::<ActiveTimersResource>(&self.timers)?;

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}

fn describe<R: ResourceDefinition>() -> Resource {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());
    raw.no_annotation()
}

fn render<R: ResourceDefinition>(timers: &TimerService) -> Result<ResourceContents, ResourceError> {
    Ok(ResourceContents::TextResourceContents {
        uri: R::URI.to_string(),
        mime_type: Some(R::MIME_TYPE.to_string()),
        text: R::read(timers)?,
        meta: None,
    })
}
