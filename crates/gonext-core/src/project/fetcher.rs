//! Starter template materialization
//!
//! Clones the starter repository into a sibling staging directory, strips
//! its git history, then renames the staging directory to the project name.

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::runtime::tool::{git_tool, run_streaming, ToolManager};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command as TokioCommand;
use url::Url;

/// Schemes git can clone from
const CLONE_SCHEMES: &[&str] = &["https", "http", "ssh", "git", "file"];

/// Version-control metadata removed from the fresh clone
const VCS_DIR: &str = ".git";

/// Template source - either remote URL or local repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Starter locator from the product config, overridable via its env variable
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let locator = std::env::var(config.starter_repo_env())
            .unwrap_or_else(|_| config.starter_repo().to_string());
        Self::parse(&locator)
    }

    /// Accepts URLs, scp-like `user@host:path` locators, and existing local paths
    pub fn parse(locator: &str) -> Result<Self> {
        let locator = locator.trim();
        if locator.contains("://") {
            let url = Url::parse(locator)
                .map_err(|e| ScaffoldError::InvalidLocator(format!("{}: {}", locator, e)))?;
            if !CLONE_SCHEMES.contains(&url.scheme()) {
                return Err(ScaffoldError::InvalidLocator(format!(
                    "{}: unsupported scheme '{}'",
                    locator,
                    url.scheme()
                )));
            }
            return Ok(Self::Remote(url));
        }

        if let Some(url) = parse_scp_like(locator) {
            return Ok(Self::Remote(url));
        }

        let path = PathBuf::from(locator);
        if !locator.is_empty() && path.exists() {
            return Ok(Self::Local(path));
        }

        Err(ScaffoldError::InvalidLocator(locator.to_string()))
    }

    /// Argument handed to `git clone`
    pub fn locator(&self) -> OsString {
        match self {
            TemplateSource::Remote(url) => url.as_str().into(),
            TemplateSource::Local(path) => path.as_os_str().to_owned(),
        }
    }

    pub fn display(&self) -> String {
        self.locator().to_string_lossy().into_owned()
    }
}

/// `git@github.com:org/repo.git` -> `ssh://git@github.com/org/repo.git`
fn parse_scp_like(locator: &str) -> Option<Url> {
    let (host_part, path) = locator.split_once(':')?;
    if !host_part.contains('@') || host_part.contains('/') || path.is_empty() {
        return None;
    }
    Url::parse(&format!("ssh://{}/{}", host_part, path.trim_start_matches('/'))).ok()
}

/// Result of a successful fetch
#[derive(Debug)]
pub struct FetchOutcome {
    pub project_dir: PathBuf,
    /// Non-fatal problems (e.g. leftover `.git` directory)
    pub warnings: Vec<String>,
}

/// Clones the starter template into a new project directory
pub struct TemplateFetcher {
    source: TemplateSource,
    clone_tool: ToolManager,
}

impl TemplateFetcher {
    pub fn new(source: TemplateSource) -> Self {
        Self::with_tool(source, git_tool())
    }

    /// Use a different clone tool binary (must accept `clone <src> <dst>`)
    pub fn with_tool(source: TemplateSource, clone_tool: ToolManager) -> Self {
        Self { source, clone_tool }
    }

    /// Clone, strip history, and rename the clone to `target`
    pub async fn fetch_and_rename(&self, target: &Path) -> Result<FetchOutcome> {
        if !self.clone_tool.is_installed() {
            return Err(ScaffoldError::ToolMissing {
                tool: self.clone_tool.name().to_string(),
            });
        }

        let staging = staging_path(target)?;
        if target.exists() {
            return Err(ScaffoldError::RenameFailed {
                from: staging,
                to: target.to_path_buf(),
                reason: "target already exists".to_string(),
            });
        }
        if staging.exists() {
            return Err(ScaffoldError::CloneFailed {
                locator: self.source.display(),
                reason: format!(
                    "staging directory {} already exists (left by an interrupted run); delete it and retry",
                    staging.display()
                ),
            });
        }

        if let Err(e) = self.clone_into(&staging).await {
            discard_staging(&staging);
            return Err(e);
        }

        let mut warnings = Vec::new();
        if let Some(warning) = strip_vcs_metadata(&staging) {
            warnings.push(warning);
        }

        promote(&staging, target)?;

        Ok(FetchOutcome {
            project_dir: target.to_path_buf(),
            warnings,
        })
    }

    async fn clone_into(&self, staging: &Path) -> Result<()> {
        let status = run_streaming(
            TokioCommand::new(self.clone_tool.name())
                .arg("clone")
                .arg(self.source.locator())
                .arg(staging),
        )
        .await
        .map_err(|e| ScaffoldError::CloneFailed {
            locator: self.source.display(),
            reason: e.to_string(),
        })?;

        if !status.success() {
            return Err(ScaffoldError::CloneFailed {
                locator: self.source.display(),
                reason: format!(
                    "{} exited with code {}",
                    self.clone_tool.name(),
                    status.code().unwrap_or(-1)
                ),
            });
        }
        Ok(())
    }
}

/// Sibling `<target>-tmp` directory, so the final rename stays on one filesystem
pub fn staging_path(target: &Path) -> Result<PathBuf> {
    let name = target
        .file_name()
        .ok_or_else(|| ScaffoldError::InvalidName {
            name: target.display().to_string(),
            reason: "project path must end in a directory name",
        })?;

    let mut staging_name = name.to_os_string();
    staging_name.push("-tmp");
    Ok(target.with_file_name(staging_name))
}

/// Remove the clone's `.git` directory. Failure is only worth a warning.
pub fn strip_vcs_metadata(staging: &Path) -> Option<String> {
    let vcs_dir = staging.join(VCS_DIR);
    match fs::remove_dir_all(&vcs_dir) {
        Ok(()) => None,
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => Some(format!(
            "could not remove {} directory: {}",
            vcs_dir.display(),
            e
        )),
    }
}

/// Rename the staging directory to the final project directory.
///
/// On failure the staging directory is removed so the next run starts clean.
pub fn promote(staging: &Path, target: &Path) -> Result<()> {
    let rename_failed = |reason: String| {
        discard_staging(staging);
        ScaffoldError::RenameFailed {
            from: staging.to_path_buf(),
            to: target.to_path_buf(),
            reason,
        }
    };

    if target.exists() {
        return Err(rename_failed("target already exists".to_string()));
    }
    fs::rename(staging, target).map_err(|e| rename_failed(e.to_string()))
}

fn discard_staging(staging: &Path) {
    if staging.exists() {
        let _ = fs::remove_dir_all(staging);
    }
}
