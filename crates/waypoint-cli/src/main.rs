//! Waypoint CLI Application
//!
//! Command-line interface and MCP server for markdown-backed agent plans.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::{params::ShowPlan, PlannerBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        workspace,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_workspace_root(workspace)
        .build()
        .context("Failed to initialize planner")?;

    info!("Waypoint started in {}", planner.workspace_root().display());

    match command {
        Some(Commands::Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        Some(command) => Cli::new(planner, TerminalRenderer::new(!no_color)).handle_command(command),
        None => Cli::new(planner, TerminalRenderer::new(!no_color)).show_plan(&ShowPlan::default()),
    }
}
