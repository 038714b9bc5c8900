//! Walking a plan task by task.
//!
//! An interactive walk asks the user about each task in module order and
//! marks accepted tasks completed. An automated walk hands the whole plan
//! to the code generator.

use std::path::Path;

use log::{info, warn};

use crate::{
    display::Hours,
    error::Result,
    generator::{generate_project, GenerationReport},
    models::{Plan, Task, TaskStatus},
    plugins::PluginRegistry,
};

/// Yes/no questions put to the user.
pub trait Prompter {
    /// Ask `question`; `Ok(true)` means yes.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Receives progress updates during an interactive walk.
pub trait ProgressSink {
    fn start(&mut self, total: usize);

    /// One more task is done.
    fn advance(&mut self, title: &str);

    /// A message to show without disturbing the progress display.
    fn notice(&mut self, _message: &str) {}

    fn finish(&mut self);
}

/// Progress sink that discards everything.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _total: usize) {}

    fn advance(&mut self, _title: &str) {}

    fn finish(&mut self) {}
}

/// How to walk a plan.
pub enum WalkMode<'a> {
    Interactive,
    Automated {
        output_dir: &'a Path,
        registry: &'a PluginRegistry,
    },
}

/// Counts from an interactive walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Tasks marked completed during this walk
    pub completed: usize,
    /// Tasks the user chose to skip
    pub skipped: usize,
    /// Tasks skipped because a dependency was not completed
    pub blocked: usize,
    /// Tasks that were already completed before the walk
    pub already_done: usize,
    /// The user ended the walk before the last task
    pub stopped_early: bool,
}

/// Result of [`PlanWalker::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Interactive(WalkSummary),
    Generated(GenerationReport),
}

/// Drives a walk through a plan.
pub struct PlanWalker<P, S> {
    prompter: P,
    progress: S,
}

impl<P: Prompter, S: ProgressSink> PlanWalker<P, S> {
    pub fn new(prompter: P, progress: S) -> Self {
        Self { prompter, progress }
    }

    /// Walk `plan` in the given mode.
    ///
    /// # Errors
    ///
    /// Propagates prompter failures in interactive mode and file system
    /// failures of the generator in automated mode.
    pub fn walk(&mut self, plan: &mut Plan, mode: WalkMode<'_>) -> Result<WalkOutcome> {
        match mode {
            WalkMode::Interactive => self.walk_interactive(plan).map(WalkOutcome::Interactive),
            WalkMode::Automated {
                output_dir,
                registry,
            } => {
                info!("Generating project for '{}' in {}", plan.goal, output_dir.display());
                generate_project(plan, output_dir, registry).map(WalkOutcome::Generated)
            }
        }
    }

    /// Ask about every task in order, marking accepted tasks completed.
    ///
    /// A task is offered only when every dependency that names a task in
    /// the plan is completed, either beforehand or earlier in this walk.
    /// Dependencies that name no task are ignored.
    ///
    /// # Errors
    ///
    /// Returns the prompter's error if an answer cannot be read. Tasks
    /// completed before the failure stay completed in `plan`.
    pub fn walk_interactive(&mut self, plan: &mut Plan) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();
        self.progress.start(plan.task_count());

        'modules: for m in 0..plan.modules.len() {
            for t in 0..plan.modules[m].tasks.len() {
                let task = &plan.modules[m].tasks[t];
                let title = task.title.clone();

                if task.is_completed() {
                    summary.already_done += 1;
                    self.progress.advance(&title);
                    continue;
                }

                let waiting_on = unmet_dependencies(plan, task);
                if !waiting_on.is_empty() {
                    warn!("Skipping '{title}': waiting on {}", waiting_on.join(", "));
                    self.progress.notice(&format!(
                        "Skipping '{title}': dependencies not completed ({})",
                        waiting_on.join(", ")
                    ));
                    summary.blocked += 1;
                    continue;
                }

                let question = format!("Execute: {title} ({}h)?", Hours(task.estimated_hours));
                if self.prompter.confirm(&question)? {
                    plan.modules[m].tasks[t].status = TaskStatus::Completed;
                    summary.completed += 1;
                    self.progress.advance(&title);
                } else if self.prompter.confirm("Skip this task and continue?")? {
                    summary.skipped += 1;
                } else {
                    summary.stopped_early = true;
                    break 'modules;
                }
            }
        }

        self.progress.finish();
        info!(
            "Walk finished: {} completed, {} skipped, {} blocked",
            summary.completed, summary.skipped, summary.blocked
        );
        Ok(summary)
    }
}

/// Dependencies of `task` that name a task in `plan` which is not completed.
fn unmet_dependencies(plan: &Plan, task: &Task) -> Vec<String> {
    task.dependencies
        .iter()
        .filter(|dep| plan.find_task(dep).is_some_and(|d| !d.is_completed()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::AriaError;

    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<bool>,
        questions: Vec<String>,
    }

    impl ScriptedPrompter {
        fn answering(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                questions: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, question: &str) -> Result<bool> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| AriaError::parse("no scripted answer left"))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        total: usize,
        advanced: Vec<String>,
        notices: usize,
        finished: bool,
    }

    impl ProgressSink for &mut RecordingProgress {
        fn start(&mut self, total: usize) {
            self.total = total;
        }

        fn advance(&mut self, title: &str) {
            self.advanced.push(title.to_string());
        }

        fn notice(&mut self, _message: &str) {
            self.notices += 1;
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    fn plan() -> Plan {
        serde_json::from_value(serde_json::json!({
            "goal": "Todo",
            "top_modules": [
                {"id": "m1", "name": "Backend", "tasks": [
                    {"id": "t1", "title": "Schema", "estimated_hours": 2},
                    {"id": "t2", "title": "API", "estimated_hours": 3.5, "dependencies": ["t1"]}
                ]},
                {"id": "m2", "name": "Frontend", "tasks": [
                    {"id": "t3", "title": "UI", "estimated_hours": 4, "dependencies": ["t2", "ghost"]}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_accept_everything() {
        let mut plan = plan();
        let mut progress = RecordingProgress::default();
        let prompter = ScriptedPrompter::answering(&[true, true, true]);
        let mut walker = PlanWalker::new(prompter, &mut progress);

        let summary = walker.walk_interactive(&mut plan).unwrap();
        assert_eq!(summary.completed, 3);
        assert!(!summary.stopped_early);
        assert_eq!(
            walker.prompter.questions,
            vec!["Execute: Schema (2h)?", "Execute: API (3.5h)?", "Execute: UI (4h)?"]
        );
        assert_eq!(plan.completed_count(), 3);

        drop(walker);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.advanced, vec!["Schema", "API", "UI"]);
        assert!(progress.finished);
    }

    #[test]
    fn test_declined_dependency_blocks_dependents() {
        let mut plan = plan();
        let mut progress = RecordingProgress::default();
        let prompter = ScriptedPrompter::answering(&[false, true]);
        let mut walker = PlanWalker::new(prompter, &mut progress);

        let summary = walker.walk_interactive(&mut plan).unwrap();
        assert_eq!(
            summary,
            WalkSummary {
                skipped: 1,
                blocked: 2,
                ..WalkSummary::default()
            }
        );
        assert_eq!(plan.completed_count(), 0);

        drop(walker);
        assert_eq!(progress.notices, 2);
        assert!(progress.advanced.is_empty());
    }

    #[test]
    fn test_stop_leaves_later_tasks_untouched() {
        let mut plan = plan();
        let mut walker =
            PlanWalker::new(ScriptedPrompter::answering(&[true, false, false]), NoProgress);

        let summary = walker.walk_interactive(&mut plan).unwrap();
        assert!(summary.stopped_early);
        assert_eq!(summary.completed, 1);
        assert_eq!(walker.prompter.questions.len(), 3);
        assert_eq!(walker.prompter.questions[2], "Skip this task and continue?");
        assert!(plan.find_task("t1").unwrap().is_completed());
        assert!(!plan.find_task("t2").unwrap().is_completed());
        assert!(!plan.find_task("t3").unwrap().is_completed());
    }

    #[test]
    fn test_already_completed_tasks_are_not_offered() {
        let mut plan = plan();
        plan.find_task_mut("t1").unwrap().status = TaskStatus::Completed;
        let mut progress = RecordingProgress::default();
        let prompter = ScriptedPrompter::answering(&[true, true]);
        let mut walker = PlanWalker::new(prompter, &mut progress);

        let summary = walker.walk_interactive(&mut plan).unwrap();
        assert_eq!(summary.already_done, 1);
        assert_eq!(summary.completed, 2);
        assert_eq!(walker.prompter.questions[0], "Execute: API (3.5h)?");

        drop(walker);
        assert_eq!(progress.advanced.len(), 3);
    }

    #[test]
    fn test_prompter_failure_propagates() {
        let mut plan = plan();
        let mut walker = PlanWalker::new(ScriptedPrompter::answering(&[true]), NoProgress);

        assert!(walker.walk_interactive(&mut plan).is_err());
        assert!(plan.find_task("t1").unwrap().is_completed());
    }

    #[test]
    fn test_automated_walk_generates_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut plan = plan();
        let registry = PluginRegistry::with_builtins();
        let mut walker = PlanWalker::new(ScriptedPrompter::default(), NoProgress);

        let outcome = walker
            .walk(
                &mut plan,
                WalkMode::Automated {
                    output_dir: temp_dir.path(),
                    registry: &registry,
                },
            )
            .unwrap();

        let WalkOutcome::Generated(report) = outcome else {
            panic!("expected a generation report");
        };
        assert!(report.success());
        assert!(temp_dir.path().join("README.md").is_file());
        assert!(walker.prompter.questions.is_empty());
    }
}
