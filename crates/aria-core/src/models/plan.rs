//! Plan, module and task model definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Priority, TaskStatus};

/// Version stamped into plans produced by the decomposer.
pub const DECOMPOSER_VERSION: &str = "1.0";

fn default_decomposer_version() -> String {
    DECOMPOSER_VERSION.to_string()
}

/// A structured decomposition of a project goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Plan {
    /// The goal the plan was generated for
    pub goal: String,

    /// High-level description of the architecture
    #[serde(default)]
    pub architecture_overview: String,

    /// Sum of every task estimate
    #[serde(default)]
    pub total_hours: f64,

    /// Ordered modules
    #[serde(rename = "top_modules")]
    pub modules: Vec<Module>,

    /// Potential risks identified by the model
    #[serde(default)]
    pub risks: Vec<String>,

    /// How success of the project is measured
    #[serde(default)]
    pub success_criteria: Vec<String>,

    /// Technology stack the plan targets
    #[serde(default)]
    pub tech_stack: String,

    /// Constraints supplied when the plan was generated
    #[serde(default)]
    pub constraints: Vec<String>,

    /// Normalizer version that produced this document
    #[serde(default = "default_decomposer_version")]
    pub decomposer_version: String,
}

/// A named grouping of tasks within a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Module {
    /// Unique identifier, generated when the model omits it
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Estimate supplied by the model for the whole module
    #[serde(default)]
    pub estimated_hours: f64,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A single unit of work.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Task {
    /// Unique identifier, generated when the model omits it
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub estimated_hours: f64,

    /// Ids of tasks that must be completed first
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub acceptance_criteria: Vec<String>,

    #[serde(default)]
    pub status: TaskStatus,
}

impl Plan {
    /// Iterate over every task in module order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.modules.iter().flat_map(|m| m.tasks.iter())
    }

    /// Mutable iteration over every task in module order.
    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.modules.iter_mut().flat_map(|m| m.tasks.iter_mut())
    }

    /// Total number of tasks across all modules.
    pub fn task_count(&self) -> usize {
        self.modules.iter().map(|m| m.tasks.len()).sum()
    }

    /// Number of tasks whose status is completed.
    pub fn completed_count(&self) -> usize {
        self.tasks()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }

    /// The set of every task id in the plan.
    pub fn task_ids(&self) -> HashSet<&str> {
        self.tasks().map(|t| t.id.as_str()).collect()
    }

    /// Find a task by id.
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks().find(|t| t.id == id)
    }

    /// Find a task by id for mutation.
    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks_mut().find(|t| t.id == id)
    }

    /// Recompute `total_hours` as the sum of every task estimate.
    pub fn recompute_total_hours(&mut self) {
        self.total_hours = self.tasks().map(|t| t.estimated_hours).sum();
    }
}

impl Task {
    /// Whether the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
