//! Tabular view of a plan, one row per task.

use std::fmt;

use super::Hours;
use crate::models::Plan;

/// Markdown table with the columns Module, Task, Hours, Priority and
/// Dependencies. The module name is printed only on its first row.
pub struct PlanTable<'a>(pub &'a Plan);

impl fmt::Display for PlanTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "**{}**", cell(&plan.goal))?;
        writeln!(f)?;

        if plan.task_count() == 0 {
            return writeln!(f, "No tasks in this plan.");
        }

        writeln!(f, "| Module | Task | Hours | Priority | Dependencies |")?;
        writeln!(f, "|:-|:-|-:|:-|:-|")?;
        for module in &plan.modules {
            for (index, task) in module.tasks.iter().enumerate() {
                let module_name = if index == 0 { cell(&module.name) } else { String::new() };
                writeln!(
                    f,
                    "| {} | {} | {} | {} | {} |",
                    module_name,
                    cell(&task.title),
                    Hours(task.estimated_hours),
                    task.priority,
                    cell(&task.dependencies.join(", "))
                )?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Total: {} hours", Hours(plan.total_hours))
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
