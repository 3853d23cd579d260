//! GoNext Core - Scaffolding and code generation for GoNext projects
//!
//! This library backs the `gonext` CLI. It turns a short command into a Go
//! source tree: either a new project cloned from the starter template and
//! rebranded under a new module path, or individual feature components
//! generated from a single name.
//!
//! # Architecture
//!
//! - **Generation** - [`naming`] derives identifiers, [`templates`] renders
//!   them, [`generate`] writes files without ever overwriting existing work
//! - **Project materialization** - [`project`] clones the starter template,
//!   strips its history, and rewrites the module identifier across the tree
//! - **CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use gonext_core::generate::{ComponentGenerator, ModuleScaffolder};
//!
//! let generator = ComponentGenerator::for_project(".")?;
//! let report = ModuleScaffolder::new(&generator).scaffold_module("order")?;
//! ```

pub mod config;
pub mod docs;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod naming;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::GeneratorConfig;
pub use error::{Result, ScaffoldError};
pub use generate::{ComponentGenerator, ComponentKind, ComponentRequest, ModuleScaffolder};
pub use naming::NameBundle;
pub use product::ProductConfig;
pub use project::{ModuleIdentifierRewriter, ProjectSpec, TemplateFetcher, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run_new;
