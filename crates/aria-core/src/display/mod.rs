//! Display formatting for plans and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly; newtype wrappers
//! provide the alternative views of a plan. Everything except the tree
//! produces markdown, which the CLI renders with termimad.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Views & Result  │    │   Formatted     │
//! │ (Plan, Module)  │───▶│    Wrappers     │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`plan`]: markdown summary of a plan and its modules
//! - [`table`]: one row per task
//! - [`tree`]: box-drawing tree of modules and tasks
//! - [`results`]: plan overview, analysis, scaffold and walk results
//!
//! ```rust
//! use aria_core::{display::PlanTable, models::Plan};
//!
//! let plan: Plan = serde_json::from_str(
//!     r#"{"goal": "Ship it", "top_modules": [{"id": "m1", "name": "Core",
//!         "tasks": [{"id": "t1", "title": "Write code", "estimated_hours": 2}]}]}"#,
//! ).unwrap();
//!
//! let table = PlanTable(&plan).to_string();
//! assert!(table.contains("| Core | Write code | 2 | medium |"));
//! ```

pub mod plan;
pub mod results;
pub mod table;
pub mod tree;

use std::fmt;

pub use results::{OperationStatus, PlanOverview};
pub use table::PlanTable;
pub use tree::PlanTree;

/// Hour estimate without a trailing `.0` for whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hours(pub f64);

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.2}", self.0);
        write!(f, "{}", text.trim_end_matches('0').trim_end_matches('.'))
    }
}
