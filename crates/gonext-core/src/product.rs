//! Product configuration trait for CLI binaries
//!
//! Defines what the `gonext` binary supplies to the shared scaffolding logic:
//! identity, where the starter template lives, and post-setup instructions.

use std::path::Path;

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default git locator of the starter template
    fn starter_repo(&self) -> &'static str;

    /// Environment variable name for overriding the starter locator
    fn starter_repo_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;
}
