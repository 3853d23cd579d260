//! `gonext.yaml` generator settings

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional config file at the project root
pub const CONFIG_FILE: &str = "gonext.yaml";

/// Directory holding feature modules unless overridden
pub const DEFAULT_APP_DIR: &str = "app";

/// Settings read from `gonext.yaml`; every field falls back to a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory (relative to the project root) that holds feature modules
    pub app_dir: String,

    /// File extensions whose import paths are rewritten on rebrand
    pub source_extensions: Vec<String>,

    /// Oldest CLI version the project's starter template supports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cli_version: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            app_dir: DEFAULT_APP_DIR.to_string(),
            source_extensions: vec!["go".to_string()],
            min_cli_version: None,
        }
    }
}

impl GeneratorConfig {
    /// Load `gonext.yaml` from `project_root`, or defaults when the file is absent
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ScaffoldError::io(format!("failed to read {}", path.display()), e))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ScaffoldError::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        config.validate(&path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let app_dir = Path::new(&self.app_dir);
        if self.app_dir.is_empty() || app_dir.is_absolute() {
            return Err(ScaffoldError::Config {
                path: path.to_path_buf(),
                reason: "app_dir must be a relative directory".to_string(),
            });
        }
        if self.source_extensions.is_empty() {
            return Err(ScaffoldError::Config {
                path: path.to_path_buf(),
                reason: "source_extensions must list at least one extension".to_string(),
            });
        }
        Ok(())
    }

    /// Whether `path` carries one of the configured source extensions
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.source_extensions
                    .iter()
                    .any(|want| want.trim_start_matches('.') == ext)
            })
    }
}
