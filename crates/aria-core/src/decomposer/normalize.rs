//! Turning loosely typed model output into a typed [`Plan`].
//!
//! The model's JSON is checked for the required shape first, then every
//! module and task is rebuilt field by field with explicit defaults.

use std::{collections::HashSet, str::FromStr};

use log::warn;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    error::{AriaError, Result},
    models::{Module, Plan, Priority, Task, TaskStatus, DECOMPOSER_VERSION},
};

/// Keys every plan object must carry.
pub const REQUIRED_KEYS: [&str; 2] = ["goal", "top_modules"];

/// Values the caller supplied that override whatever the model returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanContext {
    pub tech_stack: String,
    pub constraints: Vec<String>,
}

/// A dependency id that matches no task in the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyWarning {
    pub task_id: String,
    pub dependency: String,
}

/// Generate an id of the form `<prefix>-xxxxxxxx`.
pub fn generate_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &hex[..8])
}

/// Check that `raw` has the top-level shape of a plan.
///
/// # Errors
///
/// Returns `AriaError::Schema` if it is not an object, a required key is
/// missing, or `top_modules` is not a list.
pub fn validate_shape(raw: &Value) -> Result<()> {
    let obj = raw
        .as_object()
        .ok_or_else(|| AriaError::schema("Plan must be a JSON object"))?;

    for key in REQUIRED_KEYS {
        if !obj.contains_key(key) {
            return Err(AriaError::schema(format!("Plan missing required key: {key}")));
        }
    }

    let modules = obj["top_modules"]
        .as_array()
        .ok_or_else(|| AriaError::schema("top_modules must be a list"))?;

    for (index, module) in modules.iter().enumerate() {
        let module = module
            .as_object()
            .ok_or_else(|| AriaError::schema(format!("top_modules[{index}] must be an object")))?;
        match module.get("tasks") {
            None | Some(Value::Null) | Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(AriaError::schema(format!(
                    "top_modules[{index}].tasks must be a list"
                )))
            }
        }
    }

    Ok(())
}

/// Validate and normalize raw model output into a typed plan.
///
/// Missing ids are generated, task defaults are filled in, duplicate task
/// ids are replaced and `total_hours` is recomputed from the tasks.
///
/// # Errors
///
/// Returns `AriaError::Schema` when [`validate_shape`] fails or a module or
/// task is not an object.
pub fn normalize(raw: &Value, context: &PlanContext) -> Result<Plan> {
    validate_shape(raw)?;
    let obj = raw.as_object().ok_or_else(|| AriaError::schema("Plan must be a JSON object"))?;

    let mut seen_modules = HashSet::new();
    let mut seen_tasks = HashSet::new();
    let modules = obj["top_modules"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, module)| {
            normalize_module(index, module, &mut seen_modules, &mut seen_tasks)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut plan = Plan {
        goal: text(obj, "goal"),
        architecture_overview: text(obj, "architecture_overview"),
        total_hours: 0.0,
        modules,
        risks: string_list(obj, "risks"),
        success_criteria: string_list(obj, "success_criteria"),
        tech_stack: context.tech_stack.clone(),
        constraints: context.constraints.clone(),
        decomposer_version: DECOMPOSER_VERSION.to_string(),
    };
    plan.recompute_total_hours();

    Ok(plan)
}

fn normalize_module(
    index: usize,
    raw: &Value,
    seen_modules: &mut HashSet<String>,
    seen_tasks: &mut HashSet<String>,
) -> Result<Module> {
    let obj = raw
        .as_object()
        .ok_or_else(|| AriaError::schema(format!("top_modules[{index}] must be an object")))?;

    let id = unique_id(obj, "module", seen_modules);
    let tasks = obj
        .get("tasks")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(task_index, task)| {
            let task = task.as_object().ok_or_else(|| {
                AriaError::schema(format!(
                    "top_modules[{index}].tasks[{task_index}] must be an object"
                ))
            })?;
            Ok(normalize_task(task, seen_tasks))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut name = text(obj, "name");
    if name.is_empty() {
        name = format!("Module {}", index + 1);
    }

    Ok(Module {
        id,
        name,
        description: text(obj, "description"),
        estimated_hours: hours(obj, "estimated_hours"),
        tasks,
    })
}

fn normalize_task(obj: &Map<String, Value>, seen: &mut HashSet<String>) -> Task {
    let id = unique_id(obj, "task", seen);

    let priority = match obj.get("priority").and_then(Value::as_str) {
        None => Priority::default(),
        Some(raw) => Priority::from_str(raw).unwrap_or_else(|e| {
            warn!("Task {id}: {e}, using medium");
            Priority::default()
        }),
    };

    let status = match obj.get("status").and_then(Value::as_str) {
        None => TaskStatus::default(),
        Some(raw) => TaskStatus::from_str(raw).unwrap_or_else(|e| {
            warn!("Task {id}: {e}, using pending");
            TaskStatus::default()
        }),
    };

    let mut dependencies = Vec::new();
    for dependency in string_list(obj, "dependencies") {
        if !dependencies.contains(&dependency) {
            dependencies.push(dependency);
        }
    }

    let mut title = text(obj, "title");
    if title.is_empty() {
        title = "Untitled task".to_string();
    }

    Task {
        id,
        title,
        description: text(obj, "description"),
        priority,
        estimated_hours: hours(obj, "estimated_hours"),
        dependencies,
        acceptance_criteria: string_list(obj, "acceptance_criteria"),
        status,
    }
}

/// Use the object's own id unless it is missing or already taken.
fn unique_id(obj: &Map<String, Value>, prefix: &str, seen: &mut HashSet<String>) -> String {
    let given = text(obj, "id");
    let id = if given.is_empty() {
        generate_id(prefix)
    } else if seen.contains(&given) {
        let fresh = generate_id(prefix);
        warn!("Duplicate {prefix} id {given}, renamed to {fresh}");
        fresh
    } else {
        given
    };
    seen.insert(id.clone());
    id
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A non-negative, finite hour estimate. Anything else becomes 0.
fn hours(obj: &Map<String, Value>, key: &str) -> f64 {
    let value = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().trim_end_matches('h').parse().unwrap_or_default(),
        _ => 0.0,
    };
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("Ignoring invalid {key} value {value}");
        0.0
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Cross-check every dependency against the plan's task ids.
///
/// Unresolved references are logged as warnings and returned; they never
/// fail the plan.
pub fn check_dependencies(plan: &Plan) -> Vec<DependencyWarning> {
    let ids = plan.task_ids();
    let mut warnings = Vec::new();

    for task in plan.tasks() {
        for dependency in &task.dependencies {
            if !ids.contains(dependency.as_str()) {
                warn!("Task {} has invalid dependency: {dependency}", task.id);
                warnings.push(DependencyWarning {
                    task_id: task.id.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    warnings
}
