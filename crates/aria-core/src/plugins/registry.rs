use std::{collections::BTreeMap, path::Path};

use log::{debug, info, warn};

use super::{AnalysisReport, CodeReviewPlugin, FlaskPlugin, NextJsPlugin, Plugin, ScaffoldResult};
use crate::{
    client::ChatClient,
    config::Config,
    error::{AriaError, Result},
};

/// Available plugins keyed by lowercase name.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the plugins that need no configuration.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NextJsPlugin));
        registry.register(Box::new(FlaskPlugin));
        registry
    }

    /// Add `plugin`, replacing any plugin registered under the same name.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        let name = plugin.name().to_lowercase();
        debug!("Registered plugin {name} v{}", plugin.version());
        self.plugins.insert(name, plugin);
    }

    /// Register the model-backed code review plugin.
    ///
    /// Returns `false`, after logging a warning, when no model client can be
    /// configured.
    pub fn register_code_review(&mut self, config: &Config) -> bool {
        let client = config.validate().and_then(ChatClient::new);
        match client {
            Ok(client) => {
                self.register(Box::new(CodeReviewPlugin::new(client)));
                true
            }
            Err(e) => {
                warn!("Could not load code_review plugin: {e}");
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins.get(&name.to_lowercase()).map(Box::as_ref)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.values().map(Box::as_ref)
    }

    /// The first plugin whose ecosystem is named in `tech_stack`.
    pub fn for_stack(&self, tech_stack: &str) -> Option<&dyn Plugin> {
        self.plugins().find(|plugin| plugin.handles_stack(tech_stack))
    }

    /// Analyze the project at `path` with the named plugin, or with the one
    /// whose marker files are present.
    ///
    /// # Errors
    ///
    /// - `AriaError::NotFound` if `path` does not exist or `plugin` is not
    ///   registered
    /// - Any error the plugin's analysis returns
    pub fn analyze(&self, path: &Path, plugin: Option<&str>) -> Result<AnalysisReport> {
        if !path.exists() {
            return Err(AriaError::path_not_found(path));
        }

        let selected = match plugin {
            Some(name) => Some(self.get(name).ok_or_else(|| AriaError::NotFound {
                what: "Plugin",
                name: name.to_string(),
            })?),
            None => detect(path).and_then(|name| self.get(name)),
        };

        match selected {
            Some(plugin) => {
                info!("Analyzing {} with {} plugin", path.display(), plugin.name());
                plugin.analyze(path)
            }
            None => {
                info!("No plugin recognizes {}", path.display());
                Ok(AnalysisReport::unknown())
            }
        }
    }

    /// Create a project named `name` under `path` from `template`.
    pub fn scaffold(&self, template: &str, name: &str, path: &Path) -> ScaffoldResult {
        match self.get(template) {
            Some(plugin) => {
                info!("Scaffolding {name} from template {template}");
                plugin.scaffold(name, path)
            }
            None => ScaffoldResult::failed(format!(
                "Template '{template}' not found. Available: {}",
                self.names().join(", ")
            )),
        }
    }
}

/// Plugin name suggested by marker files in `path`.
fn detect(path: &Path) -> Option<&'static str> {
    if path.join("package.json").exists() {
        Some("nextjs")
    } else if path.join("requirements.txt").exists() || path.join("pyproject.toml").exists() {
        Some("flask")
    } else {
        None
    }
}
