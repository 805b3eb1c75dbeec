//! MCP tool handlers implementation

use std::{fmt, sync::Arc};

use log::debug;
use rmcp::{handler::server::tool::Parameters, model::CallToolResult, ErrorData};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::{sync::Mutex, task};
use waypoint_core::{document, params as core, OperationStatus, Outcome, Planner};

use super::errors::{to_call_result, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// The wrapper adds the MCP-side derives to a core parameter type while
// (de)serializing transparently as the wrapped value.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type UpdatePlan = McpParams<core::UpdatePlan>;
pub type DecomposeTask = McpParams<core::DecomposeTask>;
pub type SetSubgoals = McpParams<core::SetSubgoals>;
pub type TrackProgress = McpParams<core::TrackProgress>;
pub type ReflectOnPlan = McpParams<core::ReflectOnPlan>;
pub type ShowPlan = McpParams<core::ShowPlan>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// The regenerated markdown of a plan, returned by `show_plan`.
struct RenderedPlan(String);

impl fmt::Display for RenderedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Outcome for RenderedPlan {}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    /// Runs one planner operation on the blocking pool while holding the
    /// planner lock, so tool calls never interleave their file writes.
    async fn run<P, T, F>(&self, tool: &'static str, params: P, op: F) -> McpResult
    where
        P: fmt::Debug + Send + 'static,
        T: Outcome + Send + 'static,
        F: FnOnce(&Planner, &P) -> waypoint_core::Result<T> + Send + 'static,
    {
        debug!("{tool}: {params:?}");

        let planner = self.planner.clone().lock_owned().await;
        let status = task::spawn_blocking(move || OperationStatus::from_result(op(&*planner, &params)))
            .await
            .map_err(|e| to_mcp_error(&format!("{tool} did not complete"), e))?;

        debug!("{tool} -> {status}");
        Ok(to_call_result(status))
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        self.run("create_plan", params.into_inner(), |planner, p| planner.create_plan(p))
            .await
    }

    pub async fn update_plan(&self, Parameters(params): Parameters<UpdatePlan>) -> McpResult {
        self.run("update_plan", params.into_inner(), |planner, p| planner.update_plan(p))
            .await
    }

    pub async fn decompose_task(&self, Parameters(params): Parameters<DecomposeTask>) -> McpResult {
        self.run("decompose_task", params.into_inner(), |planner, p| {
            planner.decompose_task(p)
        })
        .await
    }

    pub async fn set_subgoals(&self, Parameters(params): Parameters<SetSubgoals>) -> McpResult {
        self.run("set_subgoals", params.into_inner(), |planner, p| planner.set_subgoals(p))
            .await
    }

    pub async fn track_progress(&self, Parameters(params): Parameters<TrackProgress>) -> McpResult {
        self.run("track_progress", params.into_inner(), |planner, p| {
            planner.track_progress(p)
        })
        .await
    }

    pub async fn reflect_on_plan(
        &self,
        Parameters(params): Parameters<ReflectOnPlan>,
    ) -> McpResult {
        self.run("reflect_on_plan", params.into_inner(), |planner, p| {
            planner.reflect_on_plan(p)
        })
        .await
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<ShowPlan>) -> McpResult {
        self.run("show_plan", params.into_inner(), |planner, p| {
            let state = planner.show_plan(p)?;
            document::render(&state).map(RenderedPlan)
        })
        .await
    }
}
