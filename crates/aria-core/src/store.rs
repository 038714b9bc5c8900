//! Reading and writing plan documents.
//!
//! Plans are stored as indented UTF-8 JSON. Writes are not atomic; a crash
//! mid-write can leave a truncated document behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::{tz::TimeZone, Timestamp};
use log::{debug, info};

use crate::{
    error::{AriaError, IoResultExt, Result},
    models::Plan,
};

const MAX_SLUG_LEN: usize = 50;

/// Persists plans under a plans directory.
#[derive(Debug, Clone)]
pub struct PlanStore {
    plans_dir: PathBuf,
}

impl PlanStore {
    /// Creates a store that saves unnamed plans under `plans_dir`.
    pub fn new(plans_dir: impl Into<PathBuf>) -> Self {
        Self {
            plans_dir: plans_dir.into(),
        }
    }

    /// Directory used for plans saved without an explicit path.
    pub fn plans_dir(&self) -> &Path {
        &self.plans_dir
    }

    /// Write `plan` to `path`, or to a generated file in the plans directory.
    ///
    /// Parent directories are created as needed. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `AriaError::FileSystem` if a directory or the file cannot be
    /// written.
    pub fn save(&self, plan: &Plan, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.plans_dir.join(default_file_name(&plan.goal, Timestamp::now())),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).at_path(parent)?;
        }

        let mut document = serde_json::to_string_pretty(plan)
            .map_err(|e| AriaError::parse(format!("Failed to serialize plan: {e}")))?;
        document.push('\n');
        fs::write(&path, document).at_path(&path)?;

        info!("Plan saved to {}", path.display());
        Ok(path)
    }

    /// Read a plan document.
    ///
    /// # Errors
    ///
    /// - `AriaError::NotFound` if `path` does not exist
    /// - `AriaError::Parse` if the file is not well-formed JSON
    /// - `AriaError::Schema` if the JSON does not have the shape of a plan
    pub fn load(&self, path: &Path) -> Result<Plan> {
        load_plan(path)
    }
}

/// Read a plan document without a configured store.
///
/// # Errors
///
/// See [`PlanStore::load`].
pub fn load_plan(path: &Path) -> Result<Plan> {
    if !path.exists() {
        return Err(AriaError::plan_not_found(path));
    }

    let content = fs::read_to_string(path).at_path(path)?;
    let plan: Plan = serde_json::from_str(&content).map_err(|e| {
        AriaError::from_document_error(&format!("Invalid plan document {}", path.display()), &e)
    })?;

    debug!(
        "Loaded plan '{}' with {} tasks from {}",
        plan.goal,
        plan.task_count(),
        path.display()
    );
    Ok(plan)
}

/// File name for a plan saved without an explicit path:
/// `<slug>-<YYYYMMDD-HHMMSS>.json` in local time.
pub fn default_file_name(goal: &str, at: Timestamp) -> String {
    let stamp = at.to_zoned(TimeZone::system()).strftime("%Y%m%d-%H%M%S");
    format!("{}-{stamp}.json", slugify(goal))
}

/// Lowercase `text`, collapse runs of other characters into single dashes
/// and cap the length.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
        if slug.chars().count() >= MAX_SLUG_LEN {
            break;
        }
    }

    let slug: String = slug.chars().take(MAX_SLUG_LEN).collect();
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "plan".to_string()
    } else {
        slug
    }
}
