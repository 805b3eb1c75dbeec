use std::path::PathBuf;

use tempfile::TempDir;
use waypoint_core::{CreatePlan, PlannerBuilder};

/// Helper function to create a planner rooted in a fresh workspace
pub fn create_test_planner() -> (TempDir, waypoint_core::Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = PlannerBuilder::new()
        .with_workspace_root(Some(temp_dir.path()))
        .build()
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Creates `plan_file` with the given steps and returns its absolute path.
pub fn create_plan_with_steps(
    planner: &waypoint_core::Planner,
    temp_dir: &TempDir,
    plan_file: &str,
    steps: &[&str],
) -> PathBuf {
    planner
        .create_plan(&CreatePlan {
            task: "Integration task".to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            plan_file: plan_file.to_string(),
            overwrite: false,
        })
        .expect("Failed to create plan");
    temp_dir.path().join(plan_file)
}
