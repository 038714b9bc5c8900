//! Command handlers.
//!
//! Each handler takes its parsed arguments, calls into aria-core and prints
//! the result as markdown through the [`TerminalRenderer`].

use std::{
    fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use aria_core::{
    generator::DEFAULT_OUTPUT_DIR,
    load_plan,
    plugins::{CodeReviewPlugin, GenerationContext, GenerationInput},
    ChatClient, Config, DecomposeRequest, Decomposer, NoProgress, OperationStatus, Plan,
    PlanOverview, PlanStore, PlanTable, PlanTree, PlanWalker, Plugin, PluginRegistry, Prompter,
    WalkMode, WalkOutcome,
};
use log::info;

use crate::{
    args::{AnalyzeArgs, DecomposeArgs, NewArgs, ReviewArgs, RunArgs, ViewArgs, ViewFormat},
    dashboard,
    progress::Progress,
    prompt::StdinPrompter,
    renderer::TerminalRenderer,
};

const CODE_REVIEW: &str = "code_review";

pub struct Cli {
    renderer: TerminalRenderer,
    config: Config,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer, config: Config) -> Self {
        Self { renderer, config }
    }

    pub fn version(&self) -> Result<()> {
        self.renderer
            .plain(&format!("aria version {}\n", env!("CARGO_PKG_VERSION")))
    }

    pub fn decompose(&self, args: &DecomposeArgs) -> Result<()> {
        let settings = self
            .config
            .validate()
            .context("Failed to configure model provider")?;
        let client = ChatClient::new(settings)?;
        let request = DecomposeRequest::from(args);

        let spinner = Progress::spinner("Decomposing goal...", self.renderer.is_rich());
        let built = Decomposer::new(client).build(&request);
        spinner.finish_clear();
        let mut plan = built.context("Failed to decompose goal")?;

        let plans_dir = match &args.output {
            Some(output) => output.parent().map(Path::to_path_buf).unwrap_or_default(),
            None => self.config.plans_dir()?,
        };
        let store = PlanStore::new(plans_dir);
        let path = store
            .save(&plan, args.output.as_deref())
            .context("Failed to save plan")?;

        self.renderer.render(&format!(
            "{}\n{}\n{plan}",
            OperationStatus::success(format!("Plan saved to {}", path.display())),
            PlanOverview(&plan)
        ))?;

        if is_interactive_terminal() {
            let mut prompter = StdinPrompter::stdin();
            if prompter.confirm("Open the plan dashboard?")? {
                self.dashboard(&mut plan, &store, &path)?;
            }
        }
        Ok(())
    }

    pub fn view(&self, args: &ViewArgs) -> Result<()> {
        let mut plan = load_plan(&args.plan_file)?;

        match args.format {
            ViewFormat::Interactive if is_interactive_terminal() => {
                let dir = args.plan_file.parent().unwrap_or(Path::new("."));
                self.dashboard(&mut plan, &PlanStore::new(dir), &args.plan_file)
            }
            ViewFormat::Interactive | ViewFormat::Tree => {
                self.renderer.plain(&PlanTree(&plan).to_string())
            }
            ViewFormat::Table => self.renderer.render(&PlanTable(&plan).to_string()),
            ViewFormat::Summary => self
                .renderer
                .render(&format!("{}\n{plan}", PlanOverview(&plan))),
        }
    }

    pub fn analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let registry = self.registry(args.plugin.as_deref() == Some(CODE_REVIEW));
        let report = registry.analyze(&args.path, args.plugin.as_deref())?;
        self.renderer.render(&report.to_string())?;

        if let Some(output) = &args.output {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize analysis report")?;
            fs::write(output, json + "\n")
                .with_context(|| format!("Failed to write {}", output.display()))?;
            self.renderer.render(
                &OperationStatus::success(format!("Analysis saved to {}", output.display()))
                    .to_string(),
            )?;
        }
        Ok(())
    }

    pub fn new_project(&self, args: &NewArgs) -> Result<()> {
        let result =
            PluginRegistry::with_builtins().scaffold(&args.template, &args.name, &args.path);
        if !result.success {
            bail!(result.error.unwrap_or_else(|| "Scaffolding failed".to_string()));
        }
        self.renderer.render(&result.to_string())
    }

    pub fn run(&self, args: &RunArgs) -> Result<()> {
        let mut plan = load_plan(&args.plan_file)?;

        if args.is_interactive() {
            let progress = Progress::tasks(self.renderer.is_rich());
            let mut walker = PlanWalker::new(StdinPrompter::stdin(), progress);
            let walked = walker.walk_interactive(&mut plan);

            // Completions made before a failed prompt are kept
            PlanStore::new(args.plan_file.parent().unwrap_or(Path::new(".")))
                .save(&plan, Some(&args.plan_file))
                .context("Failed to save plan progress")?;
            let summary = walked?;
            info!("Recorded {} completed task(s)", summary.completed);
            return self
                .renderer
                .render(&format!("{summary}\n{}", PlanOverview(&plan)));
        }

        let output_dir = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let registry = PluginRegistry::with_builtins();
        let mut walker = PlanWalker::new(NoPrompts, NoProgress);
        let outcome = walker.walk(
            &mut plan,
            WalkMode::Automated {
                output_dir: &output_dir,
                registry: &registry,
            },
        )?;

        if let WalkOutcome::Generated(report) = outcome {
            self.renderer.render(&report.to_string())?;
            if !report.success() {
                bail!("Code generation finished with {} error(s)", report.errors.len());
            }
        }
        Ok(())
    }

    pub fn review(&self, args: &ReviewArgs) -> Result<()> {
        let code = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;

        let settings = self
            .config
            .validate()
            .context("Failed to configure model provider")?;
        let plugin = CodeReviewPlugin::new(ChatClient::new(settings)?);

        let output_dir = args.file.parent().unwrap_or(Path::new("."));
        let context = GenerationContext {
            goal: "Code review",
            output_dir,
        };

        let spinner = Progress::spinner("Reviewing code...", self.renderer.is_rich());
        let outcome = plugin.generate(GenerationInput::Code(&code), &context);
        spinner.finish_clear();

        match outcome.content {
            Some(review) if outcome.success => self.renderer.render(&format!(
                "## Code Review: {}\n\n{review}\n",
                args.file.display()
            )),
            _ => bail!(outcome
                .error
                .unwrap_or_else(|| "Code review failed".to_string())),
        }
    }

    fn registry(&self, with_code_review: bool) -> PluginRegistry {
        let mut registry = PluginRegistry::with_builtins();
        if with_code_review {
            registry.register_code_review(&self.config);
        }
        registry
    }

    fn dashboard(&self, plan: &mut Plan, store: &PlanStore, path: &Path) -> Result<()> {
        let unsaved = dashboard::run(plan, store, path)?;
        if unsaved {
            self.renderer.render(
                &OperationStatus::failure("Changes made in the dashboard were not saved")
                    .to_string(),
            )?;
        }
        Ok(())
    }
}

/// Prompter for automated walks, which never ask anything.
struct NoPrompts;

impl Prompter for NoPrompts {
    fn confirm(&mut self, _question: &str) -> aria_core::Result<bool> {
        Ok(false)
    }
}

fn is_interactive_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}
