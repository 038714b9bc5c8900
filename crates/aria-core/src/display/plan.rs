//! Markdown display for plans, modules and the status enums.

use std::fmt;

use super::Hours;
use crate::models::{Module, Plan, Priority, Task, TaskStatus};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.goal)?;
        writeln!(f)?;

        if !self.architecture_overview.is_empty() {
            writeln!(f, "## Architecture Overview")?;
            writeln!(f)?;
            writeln!(f, "{}", self.architecture_overview)?;
            writeln!(f)?;
        }

        writeln!(f, "## Modules")?;
        writeln!(f)?;
        if self.modules.is_empty() {
            writeln!(f, "No modules in this plan.")?;
            writeln!(f)?;
        }
        for module in &self.modules {
            write!(f, "{module}")?;
        }

        write_list(f, "Risks", &self.risks)?;
        write_list(f, "Success Criteria", &self.success_criteria)?;
        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    writeln!(f)
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.name)?;
        writeln!(f)?;
        let description = if self.description.is_empty() {
            "No description"
        } else {
            &self.description
        };
        writeln!(f, "**Description**: {description}")?;
        writeln!(f)?;

        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** ({} hours, {} priority)",
            self.title,
            Hours(self.estimated_hours),
            self.priority
        )?;

        if !self.dependencies.is_empty() {
            writeln!(f, "  - Dependencies: {}", self.dependencies.join(", "))?;
        }

        if !self.acceptance_criteria.is_empty() {
            writeln!(f, "  - Acceptance Criteria:")?;
            for criterion in &self.acceptance_criteria {
                writeln!(f, "    - {criterion}")?;
            }
        }
        Ok(())
    }
}
