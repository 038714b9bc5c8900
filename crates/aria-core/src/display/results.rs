//! Display for operation outcomes: plan overviews, analysis reports,
//! scaffolding, generation and walk results.

use std::fmt;

use super::Hours;
use crate::{
    generator::GenerationReport,
    models::Plan,
    plugins::{AnalysisReport, ScaffoldResult},
    walker::WalkSummary,
};

/// Short statistics block for a plan.
///
/// ```rust
/// use aria_core::{display::PlanOverview, models::Plan};
///
/// let plan: Plan = serde_json::from_str(r#"{"goal": "g", "top_modules": []}"#).unwrap();
/// assert!(PlanOverview(&plan).to_string().contains("- Total Tasks: 0"));
/// ```
pub struct PlanOverview<'a>(pub &'a Plan);

impl fmt::Display for PlanOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "## Plan Summary")?;
        writeln!(f)?;
        writeln!(f, "- Modules: {}", plan.modules.len())?;
        writeln!(f, "- Total Tasks: {}", plan.task_count())?;
        writeln!(f, "- Completed: {}/{}", plan.completed_count(), plan.task_count())?;
        writeln!(f, "- Estimated Hours: {}", Hours(plan.total_hours))
    }
}

/// A one-line success or failure message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.success { "✅" } else { "❌" };
        writeln!(f, "{icon} {}", self.message)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Project Analysis")?;
        writeln!(f)?;
        writeln!(f, "- Framework: {}", self.framework)?;
        if let Some(version) = &self.version {
            writeln!(f, "- Version: {version}")?;
        }
        writeln!(f, "- Files analyzed: {}", self.files_analyzed)?;
        if let Some(app_router) = self.app_router_used {
            writeln!(f, "- App Router: {}", if app_router { "yes" } else { "no" })?;
        }

        for (heading, items) in [
            ("Issues", &self.issues),
            ("Recommendations", &self.recommendations),
        ] {
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "### {heading}")?;
            writeln!(f)?;
            for item in items {
                writeln!(f, "- {item}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScaffoldResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            let error = self.error.as_deref().unwrap_or("Scaffolding failed");
            return write!(f, "{}", OperationStatus::failure(error));
        }

        let location = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        write!(
            f,
            "{}",
            OperationStatus::success(format!("Project created at {location}"))
        )?;

        if !self.next_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next steps:")?;
            writeln!(f)?;
            for step in &self.next_steps {
                writeln!(f, "- `{step}`")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = format!(
            "Generated {} files in {}",
            self.generated_files.len(),
            self.output_dir.display()
        );
        if self.success() {
            write!(f, "{}", OperationStatus::success(message))?;
        } else {
            write!(
                f,
                "{}",
                OperationStatus::failure(format!("{message} with {} errors", self.errors.len()))
            )?;
        }

        if let Some(plugin) = &self.plugin {
            writeln!(f)?;
            writeln!(f, "Plugin: {plugin}")?;
        }

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Errors:")?;
            for error in &self.errors {
                writeln!(f, "- {error}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for WalkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stopped_early {
            writeln!(f, "Walkthrough stopped early.")?;
        } else {
            writeln!(f, "Walkthrough complete.")?;
        }
        writeln!(f)?;
        writeln!(f, "- Completed: {}", self.completed)?;
        writeln!(f, "- Skipped: {}", self.skipped)?;
        writeln!(f, "- Blocked by dependencies: {}", self.blocked)?;
        if self.already_done > 0 {
            writeln!(f, "- Already completed: {}", self.already_done)?;
        }
        Ok(())
    }
}
