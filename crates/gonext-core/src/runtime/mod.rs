//! External tool detection and process launching

pub mod launcher;
pub mod tool;

pub use launcher::{launch_plan, start, LaunchPlan};
pub use tool::{air_tool, git_tool, go_tool, run_streaming, ToolConfig, ToolManager};
