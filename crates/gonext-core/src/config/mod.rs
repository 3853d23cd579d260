//! Project-level configuration
//!
//! - `gonext.yaml` generator settings (app directory, source extensions)
//! - CLI / starter template version compatibility

pub mod generator;
pub mod version;

pub use generator::{GeneratorConfig, CONFIG_FILE};
pub use version::check_compatibility;
