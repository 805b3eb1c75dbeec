//! MCP server implementation for Waypoint
//!
//! Exposes the planner operations as Model Context Protocol tools over stdio.
//! Replies are the same confirmation strings the CLI prints; failures are
//! returned as tool errors whose text starts with `Error:`.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};
use waypoint_core::Planner;

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreatePlan, DecomposeTask, McpResult, ReflectOnPlan, SetSubgoals, ShowPlan, TrackProgress,
    UpdatePlan,
};

const USAGE_INSTRUCTIONS: &str = r#"Waypoint keeps a multi-step implementation plan in a markdown file inside the workspace, so the plan survives restarts and can be read by humans.

Recommended workflow:
1. Break the request down with `decompose_task`.
2. Persist the plan with `create_plan`.
3. Record the qualities the result must have with `set_subgoals`.
4. Keep step state current with `update_plan`.
5. Log execution progress with `track_progress`.
6. Capture lessons and close the loop with `reflect_on_plan`.

Replies starting with `Error:` mean the request failed. Validation errors leave the plan untouched; a cleanup request on an unfinished plan still saves the new entry. Replies starting with `Warning:` mean the plan was saved but a follow-up step failed.

Plan files default to `agent_plan.md` and must stay inside the workspace."#;

/// MCP server for Waypoint
#[derive(Clone)]
pub struct WaypointMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    /// Create a new Waypoint MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a new markdown-backed execution plan. Parameters: task (required), steps (optional; derived from the task when omitted), plan_file (default 'agent_plan.md'), overwrite (default false). The first step starts in_progress."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "update_plan",
        description = "Update the status of one step in an existing plan. Parameters: step_number (required, 1-based), status (required: pending|in_progress|completed|blocked), note (optional, appended to the progress log), plan_file (default 'agent_plan.md'). Only one step can be in_progress at a time."
    )]
    async fn update_plan(&self, params: Parameters<UpdatePlan>) -> McpResult {
        self.handlers().update_plan(params).await
    }

    #[tool(
        name = "decompose_task",
        description = "Break a task description into concise, ordered implementation steps without writing anything. Parameters: task (required), max_steps (default 6). Returns a numbered list."
    )]
    async fn decompose_task(&self, params: Parameters<DecomposeTask>) -> McpResult {
        self.handlers().decompose_task(params).await
    }

    #[tool(
        name = "set_subgoals",
        description = "Set or append subgoals that guide implementation quality. Parameters: subgoals (required), plan_file (default 'agent_plan.md'), replace (default true; false appends and keeps existing statuses)."
    )]
    async fn set_subgoals(&self, params: Parameters<SetSubgoals>) -> McpResult {
        self.handlers().set_subgoals(params).await
    }

    #[tool(
        name = "track_progress",
        description = "Append a progress update and optionally complete the plan. Parameters: message (required), percent_complete (optional, 0..100; 100 completes the plan), plan_file (default 'agent_plan.md'), complete_plan (default false), cleanup_plan_file (default false; deletes the file once the plan is completed)."
    )]
    async fn track_progress(&self, params: Parameters<TrackProgress>) -> McpResult {
        self.handlers().track_progress(params).await
    }

    #[tool(
        name = "reflect_on_plan",
        description = "Record a short reflection on the current plan. Parameters: summary (required), risks (optional), next_actions (optional), plan_file (default 'agent_plan.md'), finalize (default false; completes every step and subgoal), cleanup_plan_file (default false)."
    )]
    async fn reflect_on_plan(&self, params: Parameters<ReflectOnPlan>) -> McpResult {
        self.handlers().reflect_on_plan(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Return the regenerated markdown of a plan, including its embedded JSON state. Parameters: plan_file (default 'agent_plan.md')."
    )]
    async fn show_plan(&self, params: Parameters<ShowPlan>) -> McpResult {
        self.handlers().show_plan(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "waypoint".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(USAGE_INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Waypoint MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
