//! Project plugins: framework-specific analysis, scaffolding and generation.
//!
//! A [`Plugin`] knows one ecosystem. The [`PluginRegistry`] holds the
//! available plugins keyed by lowercase name and dispatches `analyze` and
//! `scaffold` requests to them.
//!
//! ```rust
//! use aria_core::plugins::PluginRegistry;
//!
//! let registry = PluginRegistry::with_builtins();
//! assert_eq!(registry.names(), vec!["flask", "nextjs"]);
//! ```

mod code_review;
mod flask;
mod nextjs;
mod registry;

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use serde::{Deserialize, Serialize};

pub use code_review::CodeReviewPlugin;
pub use flask::FlaskPlugin;
pub use nextjs::NextJsPlugin;
pub use registry::PluginRegistry;

use crate::{error::Result, models::Task};

/// Findings from analyzing an existing project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub files_analyzed: usize,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_router_used: Option<bool>,
}

impl AnalysisReport {
    /// Empty report for `framework`.
    pub fn new(framework: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            version: None,
            files_analyzed: 0,
            issues: Vec::new(),
            recommendations: Vec::new(),
            app_router_used: None,
        }
    }

    /// Report for a directory no plugin recognizes.
    pub fn unknown() -> Self {
        Self::new("unknown")
    }
}

/// Outcome of scaffolding a new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScaffoldResult {
    pub fn created(path: PathBuf, next_steps: Vec<String>) -> Self {
        Self {
            success: true,
            path: Some(path),
            next_steps,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            next_steps: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// What a plugin is asked to generate from.
#[derive(Debug, Clone, Copy)]
pub enum GenerationInput<'a> {
    /// Produce source for one planned task.
    Task(&'a Task),
    /// Work on a piece of existing code (used by code review).
    Code(&'a str),
}

/// Where generated files go.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub goal: &'a str,
    pub output_dir: &'a Path,
}

/// Outcome of one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub success: bool,
    pub files_created: Vec<PathBuf>,
    /// Text produced without a file, such as a review.
    pub content: Option<String>,
    pub error: Option<String>,
}

impl GenerationOutcome {
    pub fn files(files_created: Vec<PathBuf>) -> Self {
        Self {
            success: true,
            files_created,
            ..Self::default()
        }
    }

    pub fn text(content: String) -> Self {
        Self {
            success: true,
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// One project ecosystem.
pub trait Plugin {
    /// Registry key, lowercase.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn version(&self) -> &str;

    /// Inspect an existing project.
    ///
    /// # Errors
    ///
    /// Returns an error only when the directory itself cannot be read;
    /// problems with individual files become report issues.
    fn analyze(&self, project: &Path) -> Result<AnalysisReport>;

    /// Create `<target>/<name>` with a starter project.
    fn scaffold(&self, name: &str, target: &Path) -> ScaffoldResult;

    fn generate(&self, input: GenerationInput<'_>, context: &GenerationContext<'_>)
        -> GenerationOutcome;

    /// Whether a plan's tech stack description calls for this plugin.
    fn handles_stack(&self, tech_stack: &str) -> bool {
        tech_stack.to_lowercase().contains(self.name())
    }
}

/// Write `files` (relative path, content) under `root`, returning the paths
/// written. Stops at the first failure.
///
/// Relative paths must stay below `root`: absolute paths and `..` segments
/// are rejected.
pub(crate) fn write_files(root: &Path, files: &[(&str, String)]) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for (relative, content) in files {
        let contained = Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path escapes the output directory: {relative}"),
            ));
        }

        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

/// A file name stem for a task id.
///
/// Ids made of ASCII letters, digits, `_` and `-` are used as they are.
/// Any other character becomes `_`, and the id's hash is appended so two
/// ids never share a stem.
pub(crate) fn file_stem(id: &str) -> String {
    let clean: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if clean == id && !id.is_empty() {
        clean
    } else {
        format!("{clean}-{:08x}", id_hash(id))
    }
}

/// 32-bit FNV-1a; stable across runs so regenerated files keep their names.
pub(crate) fn id_hash(id: &str) -> u32 {
    id.bytes().fold(0x811c_9dc5, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}
