use std::str::FromStr;

use super::*;

fn create_test_task(id: &str, hours: f64, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: String::new(),
        priority: Priority::Medium,
        estimated_hours: hours,
        dependencies: vec![],
        acceptance_criteria: vec![],
        status,
    }
}

fn create_test_plan() -> Plan {
    Plan {
        goal: "Test goal".to_string(),
        architecture_overview: String::new(),
        total_hours: 0.0,
        modules: vec![
            Module {
                id: "module-a".to_string(),
                name: "A".to_string(),
                description: String::new(),
                estimated_hours: 0.0,
                tasks: vec![
                    create_test_task("task-1", 2.0, TaskStatus::Completed),
                    create_test_task("task-2", 1.5, TaskStatus::Pending),
                ],
            },
            Module {
                id: "module-b".to_string(),
                name: "B".to_string(),
                description: String::new(),
                estimated_hours: 0.0,
                tasks: vec![create_test_task("task-3", 4.0, TaskStatus::Pending)],
            },
        ],
        risks: vec![],
        success_criteria: vec![],
        tech_stack: String::new(),
        constraints: vec![],
        decomposer_version: DECOMPOSER_VERSION.to_string(),
    }
}

#[test]
fn test_priority_from_str() {
    assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
    assert_eq!(Priority::from_str(" low ").unwrap(), Priority::Low);
    assert!(Priority::from_str("urgent").is_err());
}

#[test]
fn test_status_from_str_and_toggle() {
    assert_eq!(
        TaskStatus::from_str("Completed").unwrap(),
        TaskStatus::Completed
    );
    assert!(TaskStatus::from_str("done").is_err());
    assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
    assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
}

#[test]
fn test_plan_counts() {
    let plan = create_test_plan();
    assert_eq!(plan.task_count(), 3);
    assert_eq!(plan.completed_count(), 1);
    assert_eq!(plan.task_ids().len(), 3);
    assert!(plan.find_task("task-3").is_some());
    assert!(plan.find_task("task-9").is_none());
}

#[test]
fn test_recompute_total_hours() {
    let mut plan = create_test_plan();
    plan.total_hours = 100.0;
    plan.recompute_total_hours();
    assert_eq!(plan.total_hours, 7.5);
}

#[test]
fn test_plan_serializes_modules_as_top_modules() {
    let plan = create_test_plan();
    let value = serde_json::to_value(&plan).unwrap();
    assert!(value.get("top_modules").is_some());
    assert!(value.get("modules").is_none());
    assert_eq!(value["top_modules"][0]["tasks"][0]["status"], "completed");
    assert_eq!(value["top_modules"][0]["tasks"][1]["priority"], "medium");
}

#[test]
fn test_task_defaults_on_deserialize() {
    let task: Task = serde_json::from_str(r#"{"id": "t", "title": "Minimal"}"#).unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, Priority::Medium);
    assert!(task.dependencies.is_empty());
    assert_eq!(task.estimated_hours, 0.0);
}

#[test]
fn test_plan_requires_top_modules() {
    let result = serde_json::from_str::<Plan>(r#"{"goal": "g"}"#);
    assert!(result.is_err());
}
