mod common;

use std::fs;

use aria_core::{load_plan, AriaError, DecomposeRequest, Decomposer, Plan, PlanStore, TaskStatus};
use common::{CannedModel, TODO_REPLY};
use tempfile::TempDir;

fn decomposed_plan() -> Plan {
    Decomposer::new(CannedModel(TODO_REPLY))
        .build(&DecomposeRequest {
            goal: "Build a todo app".to_string(),
            tech_stack: "Rust".to_string(),
            constraints: vec!["Two weeks".to_string()],
        })
        .expect("decomposition should succeed")
}

#[test]
fn test_round_trip_keeps_generated_ids() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let store = PlanStore::new(temp_dir.path());
    let plan = decomposed_plan();

    let generated = plan.modules[1].id.clone();
    assert!(generated.starts_with("module-"));

    let path = store.save(&plan, None).unwrap();
    assert_eq!(path.parent(), Some(temp_dir.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("build-a-todo-app-"));

    let loaded = store.load(&path).unwrap();
    assert_eq!(loaded, plan);
    assert_eq!(loaded.modules[1].id, generated);
    assert_eq!(loaded.total_hours, 9.5);
    assert_eq!(loaded.tech_stack, "Rust");
}

#[test]
fn test_saved_document_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/dir/plan.json");

    let saved = PlanStore::new(temp_dir.path())
        .save(&decomposed_plan(), Some(&path))
        .unwrap();
    assert_eq!(saved, path);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.contains("\n  \"top_modules\": ["));

    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["decomposer_version"], "1.0");
    assert_eq!(document["top_modules"][0]["tasks"][0]["status"], "pending");
    assert!(document.get("modules").is_none());
}

#[test]
fn test_status_changes_survive_reload() {
    let temp_dir = TempDir::new().unwrap();
    let store = PlanStore::new(temp_dir.path());
    let mut plan = decomposed_plan();
    let path = store.save(&plan, None).unwrap();

    plan.find_task_mut("task-ui").unwrap().status = TaskStatus::Completed;
    store.save(&plan, Some(&path)).unwrap();

    let loaded = load_plan(&path).unwrap();
    assert_eq!(loaded.completed_count(), 1);
    assert!(loaded.find_task("task-ui").unwrap().is_completed());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    let err = load_plan(&missing).unwrap_err();
    assert!(matches!(err, AriaError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        format!("Plan file not found: {}", missing.display())
    );
}

#[test]
fn test_load_malformed_json_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"goal\": \"g\", \"top_modules\": [").unwrap();

    assert!(matches!(load_plan(&path).unwrap_err(), AriaError::Parse { .. }));
}

#[test]
fn test_load_wrong_shape_is_schema_error() {
    let temp_dir = TempDir::new().unwrap();

    let no_modules = temp_dir.path().join("no-modules.json");
    fs::write(&no_modules, r#"{"goal": "g"}"#).unwrap();
    assert!(matches!(load_plan(&no_modules).unwrap_err(), AriaError::Schema { .. }));

    let bad_status = temp_dir.path().join("bad-status.json");
    fs::write(
        &bad_status,
        r#"{"goal": "g", "top_modules": [{"id": "m", "name": "M",
            "tasks": [{"id": "t", "title": "T", "status": "started"}]}]}"#,
    )
    .unwrap();
    assert!(matches!(load_plan(&bad_status).unwrap_err(), AriaError::Schema { .. }));
}
