//! Tests for the planner module.

use std::{fs, io, path::Path};

use tempfile::TempDir;

use super::*;
use crate::{
    display::{Completion, OperationStatus},
    error::PlannerError,
    models::{ItemStatus, PlanStatus},
    params::{
        CreatePlan, DecomposeTask, ReflectOnPlan, SetSubgoals, ShowPlan, TrackProgress, UpdatePlan,
    },
    storage::{EntryKind, FsStorage, PlanStorage},
};

/// Helper function to create a test planner
fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = PlannerBuilder::new()
        .with_workspace_root(Some(temp_dir.path()))
        .build()
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Filesystem storage whose deletes always fail.
struct UndeletableStorage;

impl PlanStorage for UndeletableStorage {
    fn kind(&self, path: &Path) -> EntryKind {
        FsStorage.kind(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        FsStorage.read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        FsStorage.write(path, contents)
    }

    fn remove(&self, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
    }
}

fn create_three_step_plan(planner: &Planner) {
    planner
        .create_plan(&CreatePlan {
            task: "Ship feature".to_string(),
            steps: vec!["Design".into(), "Build".into(), "Test".into()],
            ..Default::default()
        })
        .expect("Failed to create plan");
}

fn set_step(planner: &Planner, step_number: i64, status: &str) {
    planner
        .update_plan(&UpdatePlan {
            step_number,
            status: status.to_string(),
            ..Default::default()
        })
        .expect("Failed to update step");
}

fn show(planner: &Planner) -> crate::models::PlanState {
    planner
        .show_plan(&ShowPlan::default())
        .expect("Failed to load plan")
}

#[test]
fn test_create_plan_initial_state() {
    let (temp_dir, planner) = create_test_planner();
    let created = planner
        .create_plan(&CreatePlan {
            task: "  Ship feature ".to_string(),
            steps: vec!["Design".into(), " Design ".into(), "Build".into()],
            ..Default::default()
        })
        .unwrap();

    assert_eq!(created.step_count, 2);
    assert_eq!(created.path, "agent_plan.md");
    assert!(temp_dir.path().join("agent_plan.md").is_file());

    let state = show(&planner);
    assert_eq!(state.task, "Ship feature");
    assert_eq!(state.status, PlanStatus::Active);
    assert_eq!(state.percent_complete, Some(0));
    assert_eq!(state.steps[0].status, ItemStatus::InProgress);
    assert_eq!(state.steps[1].status, ItemStatus::Pending);
    assert_eq!(state.progress_log.len(), 1);
    assert_eq!(state.progress_log[0].message, "Plan created");
    assert_eq!(state.progress_log[0].percent_complete, Some(0));
    assert_eq!(state.updated_at, state.created_at);
}

#[test]
fn test_create_plan_derives_steps() {
    let (_temp_dir, planner) = create_test_planner();
    let created = planner
        .create_plan(&CreatePlan {
            task: "Read the code then fix the bug then add a test".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(created.step_count, 3);
    assert_eq!(show(&planner).steps[1].description, "fix the bug");
}

#[test]
fn test_create_plan_refuses_existing_file() {
    let (temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);
    let before = fs::read_to_string(temp_dir.path().join("agent_plan.md")).unwrap();

    let err = planner
        .create_plan(&CreatePlan {
            task: "Other".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, PlannerError::AlreadyExists { .. }));
    assert_eq!(
        err.to_string(),
        "Plan file 'agent_plan.md' already exists and overwrite is False"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("agent_plan.md")).unwrap(),
        before
    );

    planner
        .create_plan(&CreatePlan {
            task: "Other".to_string(),
            steps: vec!["One".into()],
            overwrite: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(show(&planner).task, "Other");
}

#[test]
fn test_create_plan_rejects_directory() {
    let (temp_dir, planner) = create_test_planner();
    fs::create_dir(temp_dir.path().join("plans")).unwrap();

    let err = planner
        .create_plan(&CreatePlan {
            task: "Task".to_string(),
            plan_file: "plans".to_string(),
            overwrite: true,
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "'plans' is a directory");
}

#[test]
fn test_create_plan_outside_workspace() {
    let (_temp_dir, planner) = create_test_planner();
    let err = planner
        .create_plan(&CreatePlan {
            task: "Task".to_string(),
            plan_file: "../escape.md".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, PlannerError::OutsideWorkspace { .. }));
}

#[test]
fn test_update_plan_single_in_progress() {
    let (_temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);

    set_step(&planner, 3, "in_progress");
    let state = show(&planner);
    assert_eq!(state.active_step_count(), 1);
    assert_eq!(state.steps[0].status, ItemStatus::Pending);
    assert_eq!(state.steps[2].status, ItemStatus::InProgress);

    // Blocking leaves other steps alone.
    set_step(&planner, 1, "blocked");
    let state = show(&planner);
    assert_eq!(state.steps[0].status, ItemStatus::Blocked);
    assert_eq!(state.steps[2].status, ItemStatus::InProgress);
}

#[test]
fn test_update_plan_recomputes_percent_and_status() {
    let (_temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);

    set_step(&planner, 1, "completed");
    let state = show(&planner);
    assert_eq!(state.percent_complete, Some(33));
    assert_eq!(state.status, PlanStatus::Active);

    set_step(&planner, 2, "completed");
    assert_eq!(show(&planner).percent_complete, Some(67));

    let updated = planner
        .update_plan(&UpdatePlan {
            step_number: 3,
            status: "completed".into(),
            note: "  all done ".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.to_string(), "Updated step 3 to 'completed' in agent_plan.md");

    let state = show(&planner);
    assert_eq!(state.percent_complete, Some(100));
    assert_eq!(state.status, PlanStatus::Completed);
    let last = state.progress_log.last().unwrap();
    assert_eq!(last.message, "all done");
    assert_eq!(last.percent_complete, None);

    // Reopening a step reactivates the plan.
    set_step(&planner, 2, "pending");
    assert_eq!(show(&planner).status, PlanStatus::Active);
}

#[test]
fn test_update_plan_errors() {
    let (temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);
    let before = fs::read_to_string(temp_dir.path().join("agent_plan.md")).unwrap();

    let err = planner
        .update_plan(&UpdatePlan {
            step_number: 4,
            status: "completed".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "step_number 4 is out of range (1..3)");

    let err = planner
        .update_plan(&UpdatePlan {
            step_number: 1,
            status: "done".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("agent_plan.md")).unwrap(),
        before
    );

    let err = planner
        .update_plan(&UpdatePlan {
            step_number: 1,
            status: "completed".into(),
            plan_file: "missing.md".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Plan file 'missing.md' not found");
}

#[test]
fn test_update_plan_without_steps() {
    let (temp_dir, planner) = create_test_planner();
    let state = crate::models::PlanState::new("Empty", Vec::new(), jiff::Timestamp::now());
    fs::write(
        temp_dir.path().join("agent_plan.md"),
        crate::document::render(&state).unwrap(),
    )
    .unwrap();

    let err = planner
        .update_plan(&UpdatePlan {
            step_number: 1,
            status: "completed".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, PlannerError::NoSteps));
}

#[test]
fn test_set_subgoals_replace_and_append() {
    let (_temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);

    let set = planner
        .set_subgoals(&SetSubgoals {
            subgoals: vec!["Fast".into(), "Safe".into()],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(set.to_string(), "Set 2 subgoal(s) in agent_plan.md");

    planner
        .reflect_on_plan(&ReflectOnPlan {
            summary: "Done".into(),
            finalize: true,
            ..Default::default()
        })
        .unwrap();

    let append = SetSubgoals {
        subgoals: vec!["Safe".into(), "Small".into()],
        replace: false,
        ..Default::default()
    };
    let updated = planner.set_subgoals(&append).unwrap();
    assert_eq!(updated.to_string(), "Updated 3 subgoal(s) in agent_plan.md");

    let first = show(&planner).subgoals;
    planner.set_subgoals(&append).unwrap();
    let second = show(&planner).subgoals;
    assert_eq!(first, second);

    let descriptions: Vec<_> = second.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(descriptions, ["Fast", "Safe", "Small"]);
    assert_eq!(second[0].status, ItemStatus::Completed);
    assert_eq!(second[1].status, ItemStatus::Completed);
    assert_eq!(second[2].status, ItemStatus::Pending);
    assert_eq!(second.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn test_track_progress_explicit_percent_is_kept() {
    let (_temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);

    let logged = planner
        .track_progress(&TrackProgress {
            message: "Halfway there".into(),
            percent_complete: Some(50),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(
        logged.to_string(),
        "Logged progress in agent_plan.md (status=active, progress=50%)"
    );

    let state = show(&planner);
    assert_eq!(state.percent_complete, Some(50));
    assert_eq!(state.progress_log.last().unwrap().percent_complete, Some(50));

    planner
        .track_progress(&TrackProgress {
            message: "Note".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(show(&planner).percent_complete, Some(0));
}

#[test]
fn test_track_progress_hundred_completes() {
    let (_temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);
    planner
        .set_subgoals(&SetSubgoals {
            subgoals: vec!["Fast".into()],
            ..Default::default()
        })
        .unwrap();

    planner
        .track_progress(&TrackProgress {
            message: "Done".into(),
            percent_complete: Some(100),
            ..Default::default()
        })
        .unwrap();

    let state = show(&planner);
    assert_eq!(state.status, PlanStatus::Completed);
    assert_eq!(state.percent_complete, Some(100));
    assert!(state.steps.iter().all(|s| s.status == ItemStatus::Completed));
    assert!(state.subgoals.iter().all(|s| s.status == ItemStatus::Completed));
}

#[test]
fn test_track_progress_cleanup_removes_file() {
    let (temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);

    let result = planner
        .track_progress(&TrackProgress {
            message: "Wrapped up".into(),
            complete_plan: true,
            cleanup_plan_file: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(result.to_string(), "Completed plan and removed agent_plan.md");
    assert!(!temp_dir.path().join("agent_plan.md").exists());
}

#[test]
fn test_cleanup_failure_is_warning() {
    let temp_dir = TempDir::new().unwrap();
    let planner = PlannerBuilder::new()
        .with_workspace_root(Some(temp_dir.path()))
        .with_storage(UndeletableStorage)
        .build()
        .unwrap();
    create_three_step_plan(&planner);

    let result = planner.track_progress(&TrackProgress {
        message: "Wrapped up".into(),
        complete_plan: true,
        cleanup_plan_file: true,
        ..Default::default()
    });
    assert!(matches!(result, Ok(Completion::CleanupFailed { .. })));

    let status = OperationStatus::from_result(result);
    assert!(status
        .to_string()
        .starts_with("Warning: Plan completed but cleanup failed for 'agent_plan.md':"));

    // The completed state was saved before the delete was attempted.
    let state = show(&planner);
    assert_eq!(state.status, PlanStatus::Completed);
    assert_eq!(state.percent_complete, Some(100));
}

#[test]
fn test_reflect_cleanup_requires_completion() {
    let (temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);

    let err = planner
        .reflect_on_plan(&ReflectOnPlan {
            summary: "Checkpoint".into(),
            cleanup_plan_file: true,
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, PlannerError::CleanupRequiresCompletion));
    assert!(temp_dir.path().join("agent_plan.md").exists());

    // The reflection itself was persisted.
    assert_eq!(show(&planner).reflections.len(), 1);
}

#[test]
fn test_reflect_without_finalize_keeps_status() {
    let (_temp_dir, planner) = create_test_planner();
    create_three_step_plan(&planner);
    set_step(&planner, 1, "completed");
    planner
        .track_progress(&TrackProgress {
            message: "Estimate".into(),
            percent_complete: Some(90),
            ..Default::default()
        })
        .unwrap();

    let recorded = planner
        .reflect_on_plan(&ReflectOnPlan {
            summary: " Mid-point review ".into(),
            risks: vec!["Flaky CI".into(), "Flaky CI".into(), " ".into()],
            next_actions: vec!["Pin versions".into()],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(
        recorded.to_string(),
        "Recorded reflection in agent_plan.md (total reflections=1)"
    );

    let state = show(&planner);
    assert_eq!(state.percent_complete, Some(33));
    assert_eq!(state.status, PlanStatus::Active);
    let reflection = &state.reflections[0];
    assert_eq!(reflection.summary, "Mid-point review");
    assert_eq!(reflection.risks, ["Flaky CI"]);
    assert_eq!(reflection.next_actions, ["Pin versions"]);
}

#[test]
fn test_decompose_task_operation() {
    let (temp_dir, planner) = create_test_planner();
    let steps = planner
        .decompose_task(&DecomposeTask {
            task: "Inspect code then implement plan tools then run tests".into(),
            max_steps: 4,
        })
        .unwrap();
    assert!((2..=4).contains(&steps.0.len()));
    assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[test]
fn test_corrupt_plan_is_not_rewritten() {
    let (temp_dir, planner) = create_test_planner();
    let path = temp_dir.path().join("agent_plan.md");
    fs::write(&path, "# Agent Plan\n\nNo state here.\n").unwrap();

    let err = planner
        .track_progress(&TrackProgress {
            message: "Progress".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(err.is_corruption());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Agent Plan\n\nNo state here.\n"
    );
}
