//! Feature-module code generation
//!
//! - [`ComponentGenerator`]: one file per request, never overwriting existing files
//! - [`ModuleScaffolder`]: directory skeleton plus the five files of a feature module

pub mod component;
pub mod module;

pub use crate::templates::ComponentKind;
pub use component::{ComponentGenerator, ComponentRequest, GeneratedFile};
pub use module::{ModuleScaffolder, ScaffoldReport};

/// Subdirectories every feature module is created with
pub const MODULE_SUBDIRS: [&str; 4] = ["controller", "repository", "route", "service"];
