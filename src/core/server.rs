//! MCP server implementation.
//!
//! This module contains the `ServerHandler` that answers MCP protocol
//! messages by delegating to the tool router and the resource service.
//! Tools are defined in `domains/tools/definitions/` and wired up in
//! `domains/tools/router.rs`; adding a tool does not require changes here.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{resources::ResourceService, timers::TimerService, tools::build_tool_router};

const INSTRUCTIONS: &str = "Tracks time spent on named tasks. Call project_timer with \
     action \"start\" and a taskName when work on a task begins, and with action \"stop\" \
     and the same taskName when it ends to get the elapsed time. Read timers://active to \
     see which timers are running.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by the given timer service.
    pub fn new(config: Config, timers: Arc<TimerService>) -> Self {
        Self {
            config: Arc::new(config),
            resource_service: Arc::new(ResourceService::new(timers.clone())),
            tool_router: build_tool_router::<Self>(timers),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notifications::Broadcaster;
    use crate::domains::timers::TimerStore;
    use rmcp::{RoleClient, ServiceError, ServiceExt, service::RunningService};
    use tempfile::TempDir;

    fn server(dir: &TempDir) -> McpServer {
        let timers = Arc::new(TimerService::new(
            TimerStore::new(dir.path().join("timers.json")),
            Arc::new(Broadcaster::new()),
        ));
        McpServer::new(Config::default(), timers)
    }

    #[test]
    fn test_server_info() {
        let temp_dir = TempDir::new().unwrap();
        let server = server(&temp_dir);
        let info = server.get_info();

        assert_eq!(info.server_info.name, "project-timer");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.instructions.unwrap().contains("project_timer"));
    }

    #[test]
    fn test_server_exposes_timer_tool() {
        let temp_dir = TempDir::new().unwrap();
        let server = server(&temp_dir);
        let tools = server.tool_router.list_all();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "project_timer");
    }

    async fn connect(server: McpServer) -> RunningService<RoleClient, ()> {
        let (server_io, client_io) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            if let Ok(running) = server.serve(server_io).await {
                let _ = running.waiting().await;
            }
        });
        ().serve(client_io).await.unwrap()
    }

    fn call(arguments: serde_json::Value) -> CallToolRequestParam {
        serde_json::from_value(serde_json::json!({
            "name": "project_timer",
            "arguments": arguments,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let client = connect(server(&temp_dir)).await;

        let result = client
            .call_tool(call(serde_json::json!({
                "action": "start",
                "taskName": "Design review"
            })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert!(temp_dir.path().join("timers.json").exists());

        client.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_tool_arguments_are_invalid_params() {
        let temp_dir = TempDir::new().unwrap();
        let client = connect(server(&temp_dir)).await;

        for arguments in [
            serde_json::json!({ "action": "start", "taskName": "" }),
            serde_json::json!({ "action": "pause", "taskName": "Design review" }),
            serde_json::json!({ "action": "stop" }),
        ] {
            match client.call_tool(call(arguments)).await {
                Err(ServiceError::McpError(error)) => {
                    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
                }
                other => panic!("expected invalid params, got {:?}", other),
            }
        }
        assert!(!temp_dir.path().join("timers.json").exists());

        client.cancel().await.unwrap();
    }
}
