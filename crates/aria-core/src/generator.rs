//! Automated project generation from a plan.
//!
//! Writes a README with the plan summary and one checklist per task, then
//! lets the plugin matching the plan's tech stack emit source files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{
    display::Hours,
    error::{IoResultExt, Result},
    models::{Plan, Task},
    plugins::{file_stem, GenerationContext, GenerationInput, PluginRegistry},
};

/// Default output directory for automated walks.
pub const DEFAULT_OUTPUT_DIR: &str = "generated-project";

/// Files written and failures collected while generating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub plugin: Option<String>,
    pub generated_files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl GenerationReport {
    /// True when no task failed.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Generate the project for `plan` under `output_dir`.
///
/// Failures of individual tasks are collected in the report.
///
/// # Errors
///
/// Returns `AriaError::FileSystem` if the output directory or the README
/// cannot be written.
pub fn generate_project(
    plan: &Plan,
    output_dir: &Path,
    registry: &PluginRegistry,
) -> Result<GenerationReport> {
    fs::create_dir_all(output_dir).at_path(output_dir)?;

    let plugin = registry.for_stack(&plan.tech_stack);
    let mut report = GenerationReport {
        output_dir: output_dir.to_path_buf(),
        plugin: plugin.map(|p| p.name().to_string()),
        ..GenerationReport::default()
    };

    let readme = output_dir.join("README.md");
    fs::write(&readme, plan.to_string()).at_path(&readme)?;
    report.generated_files.push(readme);

    let tasks_dir = output_dir.join("tasks");
    let context = GenerationContext {
        goal: &plan.goal,
        output_dir,
    };

    for task in plan.tasks() {
        let checklist = tasks_dir.join(format!("{}.md", file_stem(&task.id)));
        let written = fs::create_dir_all(&tasks_dir)
            .and_then(|()| fs::write(&checklist, task_checklist(task)));
        match written {
            Ok(()) => report.generated_files.push(checklist),
            Err(e) => report
                .errors
                .push(format!("{}: failed to write checklist: {e}", task.id)),
        }

        if let Some(plugin) = plugin {
            let outcome = plugin.generate(GenerationInput::Task(task), &context);
            report.generated_files.extend(outcome.files_created);
            if let Some(error) = outcome.error {
                warn!("Generation failed for task {}: {error}", task.id);
                report.errors.push(format!("{}: {error}", task.id));
            }
        }
    }

    info!(
        "Generated {} files in {} ({} errors)",
        report.generated_files.len(),
        output_dir.display(),
        report.errors.len()
    );
    Ok(report)
}

fn task_checklist(task: &Task) -> String {
    let mut doc = format!("# {}\n\n", task.title);
    doc.push_str(&format!(
        "- Id: {}\n- Priority: {}\n- Estimate: {} hours\n- Status: {}\n",
        task.id,
        task.priority,
        Hours(task.estimated_hours),
        task.status
    ));
    if !task.dependencies.is_empty() {
        doc.push_str(&format!("- Depends on: {}\n", task.dependencies.join(", ")));
    }
    if !task.description.is_empty() {
        doc.push_str(&format!("\n{}\n", task.description));
    }

    doc.push_str("\n## Acceptance Criteria\n\n");
    if task.acceptance_criteria.is_empty() {
        doc.push_str("- [ ] Done\n");
    }
    let mark = if task.is_completed() { 'x' } else { ' ' };
    for criterion in &task.acceptance_criteria {
        doc.push_str(&format!("- [{mark}] {criterion}\n"));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(tech_stack: &str) -> Plan {
        let mut plan: Plan = serde_json::from_value(serde_json::json!({
            "goal": "Todo",
            "top_modules": [{"id": "m1", "name": "Backend", "tasks": [
                {"id": "task-a", "title": "API", "estimated_hours": 3,
                 "acceptance_criteria": ["returns 200"]},
                {"id": "task-b", "title": "DB", "status": "completed",
                 "acceptance_criteria": ["migrates"]}
            ]}]
        }))
        .unwrap();
        plan.tech_stack = tech_stack.to_string();
        plan
    }

    #[test]
    fn test_generate_without_plugin() {
        let temp_dir = tempfile::tempdir().unwrap();
        let report = generate_project(
            &plan("Rust"),
            temp_dir.path(),
            &PluginRegistry::with_builtins(),
        )
        .unwrap();

        assert!(report.success());
        assert_eq!(report.plugin, None);
        assert_eq!(report.generated_files.len(), 3);

        let readme = fs::read_to_string(temp_dir.path().join("README.md")).unwrap();
        assert!(readme.starts_with("# Todo"));

        let checklist = fs::read_to_string(temp_dir.path().join("tasks/task-a.md")).unwrap();
        assert!(checklist.contains("- Estimate: 3 hours"));
        assert!(checklist.contains("- [ ] returns 200"));

        let done = fs::read_to_string(temp_dir.path().join("tasks/task-b.md")).unwrap();
        assert!(done.contains("- [x] migrates"));
    }

    #[test]
    fn test_generate_with_matching_plugin() {
        let temp_dir = tempfile::tempdir().unwrap();
        let report = generate_project(
            &plan("Python, Flask"),
            temp_dir.path(),
            &PluginRegistry::with_builtins(),
        )
        .unwrap();

        assert!(report.success());
        assert_eq!(report.plugin.as_deref(), Some("flask"));
        assert_eq!(report.generated_files.len(), 5);
        let modules = fs::read_dir(temp_dir.path().join("app/tasks")).unwrap().count();
        assert_eq!(modules, 2);
    }

    #[test]
    fn test_task_ids_cannot_escape_output_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("a/out");
        let plan: Plan = serde_json::from_value(serde_json::json!({
            "goal": "Todo",
            "tech_stack": "Next.js",
            "top_modules": [{"id": "m1", "name": "Backend", "tasks": [
                {"id": "../../escaped", "title": "Sneaky"}
            ]}]
        }))
        .unwrap();

        let report =
            generate_project(&plan, &output, &PluginRegistry::with_builtins()).unwrap();

        assert!(report.success());
        assert_eq!(report.generated_files.len(), 3);
        for file in &report.generated_files {
            assert!(file.starts_with(&output), "{} escaped", file.display());
            assert!(!file.to_string_lossy().contains(".."));
        }
        assert!(!temp_dir.path().join("a/escaped.md").exists());
        assert!(!temp_dir.path().join("escaped").exists());
    }
}
