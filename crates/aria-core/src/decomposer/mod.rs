//! Plan decomposition: from a goal to a validated, normalized [`Plan`].
//!
//! ```text
//! goal ──▶ prompt ──▶ ModelClient ──▶ extract ──▶ normalize ──▶ Plan
//!                                                    │
//!                                     check_dependencies (warnings only)
//! ```
//!
//! - [`prompt`]: the fixed system instruction and the per-request user message
//! - [`extract`]: locating the JSON object inside the model's reply
//! - [`normalize`]: shape validation, defaults, ids and hour totals
//!
//! ```rust,no_run
//! use aria_core::{client::ChatClient, config::Config, DecomposeRequest, Decomposer};
//!
//! # fn example() -> aria_core::Result<()> {
//! let settings = Config::from_env().validate()?;
//! let decomposer = Decomposer::new(ChatClient::new(settings)?);
//! let plan = decomposer.build(&DecomposeRequest {
//!     goal: "Build a todo app".to_string(),
//!     tech_stack: "Rust, Axum".to_string(),
//!     constraints: vec![],
//! })?;
//! println!("{} modules, {}h", plan.modules.len(), plan.total_hours);
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod normalize;
pub mod prompt;


use log::info;

pub use extract::extract_json_object;
pub use normalize::{
    check_dependencies, generate_id, normalize, validate_shape, DependencyWarning, PlanContext,
};

use crate::{
    client::{CompletionOptions, ModelClient},
    error::Result,
    models::Plan,
};

/// Parameters for one decomposition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecomposeRequest {
    pub goal: String,
    pub tech_stack: String,
    pub constraints: Vec<String>,
}

impl DecomposeRequest {
    /// Split a comma-separated constraint string into trimmed entries.
    pub fn parse_constraints(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Turns project goals into plans with the help of a model.
pub struct Decomposer<C> {
    client: C,
}

impl<C: ModelClient> Decomposer<C> {
    /// Creates a decomposer using the default sampling options.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Ask the model for a plan and normalize the answer.
    ///
    /// Dependency references that match no task are logged as warnings and
    /// left in place.
    ///
    /// # Errors
    ///
    /// - `AriaError::Network` / `AriaError::Parse` from the model client
    /// - `AriaError::Parse` if the reply holds no valid JSON object
    /// - `AriaError::Schema` if the object is not plan-shaped
    pub fn build(&self, request: &DecomposeRequest) -> Result<Plan> {
        info!("Starting decomposition for goal: {}", request.goal);

        let messages = prompt::decomposition_messages(
            &request.goal,
            &request.tech_stack,
            &request.constraints,
        );
        let content = self.client.complete(&messages, CompletionOptions::default())?;

        let raw = extract_json_object(&content)?;
        let plan = normalize(
            &raw,
            &PlanContext {
                tech_stack: request.tech_stack.clone(),
                constraints: request.constraints.clone(),
            },
        )?;

        let unresolved = check_dependencies(&plan);
        if !unresolved.is_empty() {
            info!("{} dependency reference(s) could not be resolved", unresolved.len());
        }

        info!(
            "Decomposition completed. Modules: {}, tasks: {}",
            plan.modules.len(),
            plan.task_count()
        );
        Ok(plan)
    }
}
