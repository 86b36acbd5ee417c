//! Project timer tool definition.
//!
//! A single tool with two actions: `start` records the current time for a
//! task, `stop` removes it again and reports how long it ran.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::timers::{
    StartOutcome, StopOutcome, StoppedTimer, TimerService, format_timestamp,
};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// What the timer tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    /// Begin timing the task.
    Start,
    /// Stop timing the task and report the elapsed time.
    Stop,
}

impl TimerAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Parameters for the project timer tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimerParams {
    /// What to do: "start" begins timing, "stop" ends it.
    pub action: TimerAction,

    /// The name of the task, e.g. "Sunny Side Cafe hero image".
    #[schemars(length(min = 1))]
    pub task_name: String,
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Structured result of a timer action.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct TimerReport {
    /// The action that was performed.
    action: TimerAction,
    /// Task the action applied to.
    task_name: String,
    /// False when `stop` found no running timer for the task.
    found: bool,
    /// Start time (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<String>,
    /// Stop time (RFC 3339), for `stop` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    stopped_at: Option<String>,
    /// Elapsed milliseconds, for `stop` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u64>,
    /// Human-readable elapsed time, for `stop` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted: Option<String>,
    /// Start time of a running timer that `start` discarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    replaced_started_at: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Project timer tool - starts and stops named task timers.
pub struct ProjectTimerTool;

impl ProjectTimerTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "project_timer";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Start or stop a timer for a named task to track how long you spend on it. \
         Call with action \"start\" when work begins and action \"stop\" with the same taskName when it ends; \
         stopping reports the elapsed time. Starting a task that is already running restarts its timer.";

    /// Decode and validate raw tool arguments.
    pub fn parse_params(arguments: JsonObject) -> Result<ProjectTimerParams, ToolError> {
        let params: ProjectTimerParams =
            serde_json::from_value(serde_json::Value::Object(arguments))
                .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        if params.task_name.is_empty() {
            return Err(ToolError::invalid_arguments("taskName must not be empty"));
        }

        Ok(params)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(action = params.action.as_str(), task = %params.task_name))]
    pub fn execute(params: &ProjectTimerParams, timers: &TimerService) -> CallToolResult {
        info!(
            "Project timer called: {} '{}'",
            params.action.as_str(),
            params.task_name
        );

        let outcome = match params.action {
            TimerAction::Start => timers.start(&params.task_name).map(start_result),
            TimerAction::Stop => timers.stop(&params.task_name).map(stop_result),
        };

        match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("Timer action failed: {}", e);
                CallToolResult::error(vec![Content::text(format!(
                    "Could not {} timer for \"{}\": {}",
                    params.action.as_str(),
                    params.task_name,
                    e
                ))])
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ProjectTimerParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<TimerReport>().into()),
            icons: None,
            meta: None,
            title: Some("Project Timer".into()),
        }
    }

    /// Create a ToolRoute bound to the given timer service.
    pub fn create_route<S>(timers: Arc<TimerService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let timers = timers.clone();
            async move {
                let params = Self::parse_params(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &timers))
            }
            .boxed()
        })
    }
}

fn start_result(outcome: StartOutcome) -> CallToolResult {
    let started_at = format_timestamp(&outcome.started_at);
    let replaced = outcome.replaced.as_ref().map(format_timestamp);

    let mut lines = vec![
        format!("Timer started for: \"{}\"", outcome.task_name),
        format!("Start time: {}", started_at),
    ];
    if let Some(previous) = &replaced {
        lines.push(format!(
            "A timer for this task was already running since {}; it has been restarted.",
            previous
        ));
    }
    lines.push(
        "Call project_timer with action \"stop\" and the same taskName when you're done."
            .to_string(),
    );

    let report = TimerReport {
        action: TimerAction::Start,
        task_name: outcome.task_name,
        found: true,
        started_at: Some(started_at),
        stopped_at: None,
        elapsed_ms: None,
        formatted: None,
        replaced_started_at: replaced,
    };

    report_result(lines.join("\n"), &report)
}

fn stop_result(outcome: StopOutcome) -> CallToolResult {
    match outcome {
        StopOutcome::NotFound { task_name } => {
            let summary = format!(
                "No active timer found for \"{}\". Did you start one first?",
                task_name
            );
            let report = TimerReport {
                action: TimerAction::Stop,
                task_name,
                found: false,
                started_at: None,
                stopped_at: None,
                elapsed_ms: None,
                formatted: None,
                replaced_started_at: None,
            };
            report_result(summary, &report)
        }
        StopOutcome::Stopped(StoppedTimer {
            task_name,
            started_at,
            stopped_at,
            elapsed_ms,
            formatted,
        }) => {
            let started_at = format_timestamp(&started_at);
            let stopped_at = format_timestamp(&stopped_at);
            let summary = [
                format!("Timer stopped for: \"{}\"", task_name),
                String::new(),
                format!("Start:   {}", started_at),
                format!("Stop:    {}", stopped_at),
                format!("Elapsed: {} ms ({})", elapsed_ms, formatted),
            ]
            .join("\n");

            let report = TimerReport {
                action: TimerAction::Stop,
                task_name,
                found: true,
                started_at: Some(started_at),
                stopped_at: Some(stopped_at),
                elapsed_ms: Some(elapsed_ms),
                formatted: Some(formatted),
                replaced_started_at: None,
            };
            report_result(summary, &report)
        }
    }
}

/// Text summary plus structured content.
fn report_result(summary: String, report: &TimerReport) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(summary)],
        structured_content: serde_json::to_value(report).ok(),
        is_error: Some(false),
        meta: None,
    }
}

// ============================================================================
// Tests
// ============================================================================
