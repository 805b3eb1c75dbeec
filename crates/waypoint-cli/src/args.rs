use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    CreatePlanArgs, DecomposeTaskArgs, ReflectOnPlanArgs, SetSubgoalsArgs, ShowPlanArgs,
    TrackProgressArgs, UpdatePlanArgs,
};

/// Persistent markdown plans for task-execution agents
///
/// Waypoint keeps a multi-step plan in a markdown document inside a workspace
/// directory. The document carries a readable summary and an embedded JSON
/// block with the authoritative state, so a plan survives restarts and can be
/// inspected or edited by hand. Run `waypoint serve` to expose the same
/// operations as MCP tools over stdio.
#[derive(Parser)]
#[command(version, about, name = "waypoint")]
pub struct Args {
    /// Workspace root that confines every plan path. Defaults to the current
    /// directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
///
/// Without a command, the default plan document is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new plan document
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Change the status of one step
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Split a task into ordered steps without writing anything
    #[command(alias = "d")]
    Decompose(DecomposeTaskArgs),
    /// Set or append subgoals
    #[command(alias = "g")]
    Subgoals(SetSubgoalsArgs),
    /// Log progress, optionally completing and removing the plan
    #[command(alias = "p")]
    Progress(TrackProgressArgs),
    /// Record a reflection, optionally finalizing and removing the plan
    #[command(alias = "r")]
    Reflect(ReflectOnPlanArgs),
    /// Show a plan document
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Start the MCP server
    Serve,
}
