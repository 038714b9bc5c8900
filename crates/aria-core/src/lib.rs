//! Core library for aria, a planner that turns a project goal into a
//! structured plan of modules and tasks.
//!
//! The crate covers the whole plan lifecycle:
//!
//! - **Decomposition** ([`decomposer`]): prompt a model through a
//!   [`client::ModelClient`], extract and normalize its JSON answer
//! - **Storage** ([`store`]): plans as indented JSON documents
//! - **Presentation** ([`display`]): markdown summary, table, tree and
//!   result wrappers, all through [`std::fmt::Display`]
//! - **Walking** ([`walker`]): interactive completion of tasks, or automated
//!   generation through [`generator`]
//! - **Plugins** ([`plugins`]): framework-specific analysis, scaffolding and
//!   code generation
//!
//! Everything is synchronous; the only network traffic is one request per
//! decomposition or review.
//!
//! # Quick Start
//!
//! ```rust
//! use aria_core::{PlanStore, PlanTable, Plan};
//!
//! # fn example() -> aria_core::Result<()> {
//! let plan: Plan = serde_json::from_str(
//!     r#"{"goal": "Build a todo app", "top_modules": []}"#,
//! ).unwrap();
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = PlanStore::new(dir.path());
//! let path = store.save(&plan, None)?;
//!
//! let loaded = store.load(&path)?;
//! assert_eq!(loaded, plan);
//! println!("{}", PlanTable(&loaded));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod client;
pub mod config;
pub mod decomposer;
pub mod display;
pub mod error;
pub mod generator;
pub mod models;
pub mod plugins;
pub mod store;
pub mod walker;

// Re-export commonly used types
pub use client::{ChatClient, ModelClient};
pub use config::{Config, Provider};
pub use decomposer::{DecomposeRequest, Decomposer};
pub use display::{OperationStatus, PlanOverview, PlanTable, PlanTree};
pub use error::{AriaError, Result};
pub use generator::{generate_project, GenerationReport};
pub use models::{Module, Plan, Priority, Task, TaskStatus};
pub use plugins::{AnalysisReport, Plugin, PluginRegistry, ScaffoldResult};
pub use store::{load_plan, PlanStore};
pub use walker::{
    NoProgress, PlanWalker, ProgressSink, Prompter, WalkMode, WalkOutcome, WalkSummary,
};
