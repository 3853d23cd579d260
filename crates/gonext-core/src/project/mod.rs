//! New-project materialization: fetch the starter template, then rebrand it

pub mod fetcher;
pub mod rewrite;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::manifest;
use std::path::{Path, PathBuf};

pub use fetcher::{FetchOutcome, TemplateFetcher, TemplateSource};
pub use rewrite::{replace_module_references, FileFailure, ModuleIdentifierRewriter, RewriteReport};

/// Inputs of one `new` invocation
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    /// Directory the project is created in
    pub target: PathBuf,
    /// Module identifier the project will declare
    pub module_identifier: String,
    /// Where the starter template is cloned from
    pub source: TemplateSource,
}

/// Result of rebranding a materialized project
#[derive(Debug)]
pub struct RebrandOutcome {
    /// Identifier the starter template declared before the rewrite
    pub old_identifier: String,
    /// The project's generator settings
    pub config: GeneratorConfig,
    pub report: RewriteReport,
}

/// Rewrite a materialized project from the identifier its manifest declares
/// to `new_identifier`
pub fn rebrand(project_dir: &Path, new_identifier: &str) -> Result<RebrandOutcome> {
    let old_identifier = manifest::read_module_identifier(project_dir)?;
    let config = GeneratorConfig::load(project_dir)?;

    let report = ModuleIdentifierRewriter::new(old_identifier.as_str(), new_identifier)
        .with_config(config.clone())
        .rewrite(project_dir)?;

    Ok(RebrandOutcome {
        old_identifier,
        config,
        report,
    })
}
