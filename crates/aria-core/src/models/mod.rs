//! Data models for plans, modules and tasks.
//!
//! These are the typed records persisted by the plan store. Display
//! implementations live in [`crate::display`] so that presentation stays
//! separate from the data itself.
//!
//! On disk a plan looks like this (abridged):
//!
//! ```json
//! {
//!   "goal": "Build a todo app",
//!   "total_hours": 3.0,
//!   "top_modules": [
//!     {
//!       "id": "module-1a2b3c4d",
//!       "name": "Backend",
//!       "tasks": [
//!         { "id": "task-5e6f7a8b", "title": "Create API", "priority": "medium",
//!           "estimated_hours": 3.0, "dependencies": [], "status": "pending" }
//!       ]
//!     }
//!   ]
//! }
//! ```

pub mod plan;
pub mod status;

#[cfg(test)]
mod tests;

pub use plan::{Module, Plan, Task, DECOMPOSER_VERSION};
pub use status::{Priority, TaskStatus};
