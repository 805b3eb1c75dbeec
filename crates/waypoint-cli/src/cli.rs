//! Command-line argument wrappers and the command handler.
//!
//! Each subcommand has a clap `Args` struct that converts into the matching
//! core parameter type, so clap attributes stay out of `waypoint-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → OperationStatus
//! ```
//!
//! [`Cli`] runs one command and prints the reply. Failures are returned as
//! errors so the process exits non-zero.

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use log::debug;
use waypoint_core::{
    decompose::DEFAULT_MAX_STEPS, document, params::*, ItemStatus, OperationStatus, Outcome,
    Planner,
};

use crate::{args::Commands, renderer::TerminalRenderer};

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Create a new plan document
///
/// Without `--step`, the task is split into steps heuristically.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Overall goal of the plan
    pub task: String,
    #[arg(
        short,
        long = "step",
        help = "Explicit step, in order (repeat for each step)"
    )]
    pub steps: Vec<String>,
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_PLAN_FILE,
        help = "Plan document path, relative to the workspace"
    )]
    pub plan_file: String,
    #[arg(long, help = "Replace an existing plan document")]
    pub overwrite: bool,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            task: val.task,
            steps: val.steps,
            plan_file: val.plan_file,
            overwrite: val.overwrite,
        }
    }
}

/// Change the status of one step
///
/// Moving a step to in_progress demotes any other in_progress step to
/// pending.
#[derive(Args)]
pub struct UpdatePlanArgs {
    #[arg(
        allow_negative_numbers = true,
        help = "1-based number of the step to update"
    )]
    pub step_number: i64,
    #[arg(help = "New status for the step")]
    pub status: ItemStatusArg,
    #[arg(short, long, default_value = "", help = "Note appended to the progress log")]
    pub note: String,
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_PLAN_FILE,
        help = "Plan document path, relative to the workspace"
    )]
    pub plan_file: String,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            step_number: val.step_number,
            status: val.status.to_string(),
            note: val.note,
            plan_file: val.plan_file,
        }
    }
}

/// Split a task into ordered steps
#[derive(Args)]
pub struct DecomposeTaskArgs {
    /// Free-text task description
    pub task: String,
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_STEPS,
        allow_negative_numbers = true,
        help = "Maximum number of steps to return"
    )]
    pub max_steps: i64,
}

impl From<DecomposeTaskArgs> for DecomposeTask {
    fn from(val: DecomposeTaskArgs) -> Self {
        DecomposeTask {
            task: val.task,
            max_steps: val.max_steps,
        }
    }
}

/// Set or append subgoals
///
/// Subgoals that already exist keep their status; new ones start pending.
#[derive(Args)]
pub struct SetSubgoalsArgs {
    #[arg(required = true, help = "Subgoal descriptions, in order")]
    pub subgoals: Vec<String>,
    #[arg(
        short,
        long,
        help = "Append to the existing subgoals instead of replacing them"
    )]
    pub append: bool,
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_PLAN_FILE,
        help = "Plan document path, relative to the workspace"
    )]
    pub plan_file: String,
}

impl From<SetSubgoalsArgs> for SetSubgoals {
    fn from(val: SetSubgoalsArgs) -> Self {
        SetSubgoals {
            subgoals: val.subgoals,
            plan_file: val.plan_file,
            replace: !val.append,
        }
    }
}

/// Log progress against a plan
#[derive(Args)]
pub struct TrackProgressArgs {
    /// Progress note
    pub message: String,
    #[arg(
        short,
        long = "percent",
        allow_negative_numbers = true,
        help = "Completion percentage (0-100); 100 completes the plan"
    )]
    pub percent_complete: Option<i64>,
    #[arg(short, long = "complete", help = "Mark every step and subgoal completed")]
    pub complete_plan: bool,
    #[arg(long = "cleanup", help = "Delete the plan document once it is completed")]
    pub cleanup_plan_file: bool,
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_PLAN_FILE,
        help = "Plan document path, relative to the workspace"
    )]
    pub plan_file: String,
}

impl From<TrackProgressArgs> for TrackProgress {
    fn from(val: TrackProgressArgs) -> Self {
        TrackProgress {
            message: val.message,
            percent_complete: val.percent_complete,
            plan_file: val.plan_file,
            complete_plan: val.complete_plan,
            cleanup_plan_file: val.cleanup_plan_file,
        }
    }
}

/// Record a reflection
#[derive(Args)]
pub struct ReflectOnPlanArgs {
    /// Short summary of where the plan stands
    pub summary: String,
    #[arg(short, long = "risk", help = "Risk surfaced by the reflection (repeatable)")]
    pub risks: Vec<String>,
    #[arg(
        short,
        long = "next-action",
        help = "Follow-up action surfaced by the reflection (repeatable)"
    )]
    pub next_actions: Vec<String>,
    #[arg(long, help = "Mark every step and subgoal completed")]
    pub finalize: bool,
    #[arg(long = "cleanup", help = "Delete the plan document once it is completed")]
    pub cleanup_plan_file: bool,
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_PLAN_FILE,
        help = "Plan document path, relative to the workspace"
    )]
    pub plan_file: String,
}

impl From<ReflectOnPlanArgs> for ReflectOnPlan {
    fn from(val: ReflectOnPlanArgs) -> Self {
        ReflectOnPlan {
            summary: val.summary,
            risks: val.risks,
            next_actions: val.next_actions,
            plan_file: val.plan_file,
            finalize: val.finalize,
            cleanup_plan_file: val.cleanup_plan_file,
        }
    }
}

/// Show a plan document
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_PLAN_FILE,
        help = "Plan document path, relative to the workspace"
    )]
    pub plan_file: String,
}

impl From<ShowPlanArgs> for ShowPlan {
    fn from(val: ShowPlanArgs) -> Self {
        ShowPlan {
            plan_file: val.plan_file,
        }
    }
}

/// Command-line representation of step statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ItemStatusArg {
    /// Not started yet
    Pending,
    /// Currently being worked on
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    /// Finished
    Completed,
    /// Waiting on something outside the plan
    Blocked,
}

impl From<ItemStatusArg> for ItemStatus {
    fn from(val: ItemStatusArg) -> Self {
        match val {
            ItemStatusArg::Pending => ItemStatus::Pending,
            ItemStatusArg::InProgress => ItemStatus::InProgress,
            ItemStatusArg::Completed => ItemStatus::Completed,
            ItemStatusArg::Blocked => ItemStatus::Blocked,
        }
    }
}

impl std::fmt::Display for ItemStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ItemStatus::from(*self))
    }
}

// ============================================================================
// Command handler
// ============================================================================

/// Runs one CLI command against a planner and prints the reply.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Dispatches a command. `serve` is handled by the caller.
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Create(args) => self.report(self.planner.create_plan(&args.into())),
            Commands::Update(args) => self.report(self.planner.update_plan(&args.into())),
            Commands::Decompose(args) => self.report(self.planner.decompose_task(&args.into())),
            Commands::Subgoals(args) => self.report(self.planner.set_subgoals(&args.into())),
            Commands::Progress(args) => self.report(self.planner.track_progress(&args.into())),
            Commands::Reflect(args) => self.report(self.planner.reflect_on_plan(&args.into())),
            Commands::Show(args) => self.show_plan(&args.into()),
            Commands::Serve => bail!("serve must be started from main"),
        }
    }

    /// Renders the regenerated document for a plan.
    pub fn show_plan(&self, params: &ShowPlan) -> Result<()> {
        debug!("show_plan: {}", params.plan_file);
        let rendered = self
            .planner
            .show_plan(params)
            .and_then(|state| document::render(&state));
        match rendered {
            Ok(markdown) => self.renderer.render(&markdown),
            Err(e) => bail!("{e}"),
        }
    }

    fn report<T: Outcome>(&self, result: waypoint_core::Result<T>) -> Result<()> {
        let status = OperationStatus::from_result(result);
        if status.is_failure() {
            bail!("{}", status.message);
        }
        println!("{status}");
        Ok(())
    }
}
