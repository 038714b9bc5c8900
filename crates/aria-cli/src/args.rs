//! Command-line arguments.
//!
//! Argument structs carry clap attributes only; each converts into the core
//! request type where one exists, so aria-core stays free of CLI concerns.

use std::path::PathBuf;

use aria_core::DecomposeRequest;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// AI project planning assistant
///
/// aria asks a language model to break a project goal into modules and
/// tasks, saves the plan as JSON, and helps you work through it.
#[derive(Parser)]
#[command(version, about, name = "aria")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the aria version
    Version,
    /// Break a project goal into a plan
    Decompose(DecomposeArgs),
    /// Display a saved plan
    View(ViewArgs),
    /// Analyze an existing project directory
    Analyze(AnalyzeArgs),
    /// Scaffold a new project from a template
    New(NewArgs),
    /// Walk through a plan, interactively or by generating code
    Run(RunArgs),
    /// Review a source file with the model
    Review(ReviewArgs),
}

#[derive(ClapArgs)]
pub struct DecomposeArgs {
    /// The project goal, in plain words
    pub goal: String,
    /// Where to save the plan. Defaults to a timestamped file in the plans
    /// directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Technology stack to target, e.g. "Next.js, Postgres"
    #[arg(long, default_value = "")]
    pub tech_stack: String,
    /// Comma-separated constraints
    #[arg(long, default_value = "")]
    pub constraints: String,
}

impl From<&DecomposeArgs> for DecomposeRequest {
    fn from(args: &DecomposeArgs) -> Self {
        DecomposeRequest {
            goal: args.goal.clone(),
            tech_stack: args.tech_stack.trim().to_string(),
            constraints: DecomposeRequest::parse_constraints(&args.constraints),
        }
    }
}

/// How `view` presents a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewFormat {
    /// Full-screen dashboard (falls back to tree when not on a terminal)
    Interactive,
    Tree,
    Table,
    Summary,
}

#[derive(ClapArgs)]
pub struct ViewArgs {
    /// Plan file to display
    pub plan_file: PathBuf,
    #[arg(short, long, value_enum, default_value_t = ViewFormat::Interactive)]
    pub format: ViewFormat,
}

#[derive(ClapArgs)]
pub struct AnalyzeArgs {
    /// Project directory
    pub path: PathBuf,
    /// Also write the report as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Use this plugin instead of detecting one from marker files
    #[arg(long)]
    pub plugin: Option<String>,
}

#[derive(ClapArgs)]
pub struct NewArgs {
    /// Template (plugin) name, e.g. flask or nextjs
    pub template: String,
    /// Name of the project directory to create
    pub name: String,
    /// Directory to create the project in
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(ClapArgs)]
pub struct RunArgs {
    /// Plan file to walk
    pub plan_file: PathBuf,
    /// Ask about each task and record completions in the plan (default)
    #[arg(long, overrides_with = "no_interactive")]
    pub interactive: bool,
    /// Generate the project from the plan without prompting
    #[arg(long, overrides_with = "interactive")]
    pub no_interactive: bool,
    /// Output directory for generated code
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    pub fn is_interactive(&self) -> bool {
        !self.no_interactive
    }
}

#[derive(ClapArgs)]
pub struct ReviewArgs {
    /// Source file to review
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_decompose_args_into_request() {
        let args = Args::parse_from([
            "aria",
            "decompose",
            "Build a shop",
            "--tech-stack",
            " Next.js ",
            "--constraints",
            "cheap, fast",
        ]);
        let Commands::Decompose(decompose) = args.command else {
            panic!("expected decompose");
        };

        let request = DecomposeRequest::from(&decompose);
        assert_eq!(request.goal, "Build a shop");
        assert_eq!(request.tech_stack, "Next.js");
        assert_eq!(request.constraints, vec!["cheap", "fast"]);
    }

    #[test]
    fn test_view_defaults_to_interactive() {
        let args = Args::parse_from(["aria", "view", "plan.json"]);
        let Commands::View(view) = args.command else {
            panic!("expected view");
        };
        assert_eq!(view.format, ViewFormat::Interactive);
    }

    #[test]
    fn test_run_interactive_flags() {
        let run = |extra: &[&str]| {
            let mut argv = vec!["aria", "run", "plan.json"];
            argv.extend_from_slice(extra);
            match Args::parse_from(argv).command {
                Commands::Run(run) => run.is_interactive(),
                _ => panic!("expected run"),
            }
        };

        assert!(run(&[]));
        assert!(!run(&["--no-interactive"]));
        assert!(run(&["--no-interactive", "--interactive"]));
    }

    #[test]
    fn test_no_color_is_global() {
        let args = Args::parse_from(["aria", "new", "flask", "app", "--no-color"]);
        assert!(args.no_color);
    }
}
