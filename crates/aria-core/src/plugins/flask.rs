use std::{fs, path::Path};

use log::debug;

use super::{
    id_hash, write_files, AnalysisReport, GenerationContext, GenerationInput, GenerationOutcome,
    Plugin, ScaffoldResult,
};
use crate::{error::Result, models::Task};

const APP_PY: &str = r#"from flask import Flask

app = Flask(__name__)


@app.route("/")
def index():
    return "Hello, World!"


if __name__ == "__main__":
    app.run(debug=True)
"#;

const REQUIREMENTS: &str = "flask\npython-dotenv\n";

const DOTENV: &str = "FLASK_APP=app.py\nFLASK_ENV=development\n";

const GITIGNORE: &str = "__pycache__/\n*.pyc\n*.pyo\n*.pyd\n.Python\nenv/\nvenv/\n.venv/\n.env\n";

/// Flask applications.
#[derive(Debug, Default)]
pub struct FlaskPlugin;

impl Plugin for FlaskPlugin {
    fn name(&self) -> &str {
        "flask"
    }

    fn description(&self) -> &str {
        "Flask project scaffolding and analysis"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn analyze(&self, project: &Path) -> Result<AnalysisReport> {
        let mut report = AnalysisReport::new("flask");

        let requirements = project.join("requirements.txt");
        if requirements.is_file() {
            report.files_analyzed += 1;
            match fs::read_to_string(&requirements) {
                Ok(content) if lists_flask(&content) => {
                    report.version = Some("detected".to_string());
                }
                Ok(_) => report
                    .issues
                    .push("flask is not listed in requirements.txt".to_string()),
                Err(e) => {
                    debug!("Failed to read {}: {e}", requirements.display());
                    report
                        .issues
                        .push("Could not read requirements.txt".to_string());
                }
            }
        }

        if project.join("pyproject.toml").is_file() {
            report.files_analyzed += 1;
        }

        if project.join("app.py").is_file() || project.join("application.py").is_file() {
            report.files_analyzed += 1;
        } else {
            report
                .recommendations
                .push("Add an app.py entry point so `flask run` finds the app".to_string());
        }

        if !project.join("tests").is_dir() {
            report
                .recommendations
                .push("Add a tests/ directory with pytest tests".to_string());
        }

        Ok(report)
    }

    fn scaffold(&self, name: &str, target: &Path) -> ScaffoldResult {
        let project_dir = target.join(name);
        let files = [
            ("app.py", APP_PY.to_string()),
            ("requirements.txt", REQUIREMENTS.to_string()),
            (".env", DOTENV.to_string()),
            (".gitignore", GITIGNORE.to_string()),
        ];

        match write_files(&project_dir, &files) {
            Ok(_) => ScaffoldResult::created(
                project_dir,
                vec![
                    format!("cd {name}"),
                    "python -m venv venv".to_string(),
                    "source venv/bin/activate  # On Windows: venv\\Scripts\\activate".to_string(),
                    "pip install -r requirements.txt".to_string(),
                    "flask run".to_string(),
                ],
            ),
            Err(e) => ScaffoldResult::failed(format!(
                "Failed to create {}: {e}",
                project_dir.display()
            )),
        }
    }

    fn generate(
        &self,
        input: GenerationInput<'_>,
        context: &GenerationContext<'_>,
    ) -> GenerationOutcome {
        let GenerationInput::Task(task) = input else {
            return GenerationOutcome::failed("The flask plugin generates code from tasks only");
        };

        let relative = format!("app/tasks/{}.py", python_identifier(&task.id));
        match write_files(context.output_dir, &[(relative.as_str(), task_module(task))]) {
            Ok(files) => GenerationOutcome::files(files),
            Err(e) => GenerationOutcome::failed(format!("Failed to write {relative}: {e}")),
        }
    }
}

fn lists_flask(requirements: &str) -> bool {
    requirements.lines().any(|line| {
        let name: String = line
            .trim()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        name.eq_ignore_ascii_case("flask")
    })
}

/// A Python identifier for a task id, distinct for distinct ids.
///
/// Ids that are already identifiers are kept. Others have their invalid
/// characters replaced, a `t_` prefix and the id's hash appended.
fn python_identifier(id: &str) -> String {
    let clean: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let valid = clean == id && id.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_');
    if valid {
        clean
    } else {
        format!("t_{clean}_{:08x}", id_hash(id))
    }
}

fn task_module(task: &Task) -> String {
    let mut module = format!("\"\"\"{}\n", task.title.replace("\"\"\"", "'''"));
    if !task.description.is_empty() {
        module.push('\n');
        module.push_str(&task.description.replace("\"\"\"", "'''"));
        module.push('\n');
    }
    module.push_str("\"\"\"\n\n\n");
    module.push_str(&format!("def {}():\n", python_identifier(&task.id)));
    for criterion in &task.acceptance_criteria {
        module.push_str(&format!("    # Acceptance: {criterion}\n"));
    }
    module.push_str("    raise NotImplementedError\n");
    module
}
