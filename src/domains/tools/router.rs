//! Tool Router - builds the rmcp ToolRouter.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::ProjectTimerTool;
use crate::domains::timers::TimerService;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(timers: Arc<TimerService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(ProjectTimerTool::create_route(timers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notifications::Broadcaster;
    use crate::domains::timers::TimerStore;
    use tempfile::TempDir;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let temp_dir = TempDir::new().unwrap();
        let timers = Arc::new(TimerService::new(
            TimerStore::new(temp_dir.path().join("timers.json")),
            Arc::new(Broadcaster::new()),
        ));

        let router: ToolRouter<TestServer> = build_tool_router(timers);
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "project_timer");
    }
}
