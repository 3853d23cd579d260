//! `start` command: run the project once or under hot reload

use super::tool::{air_tool, go_tool, ToolManager};
use crate::error::{Result, ScaffoldError};
use std::path::Path;
use tokio::process::Command as TokioCommand;

/// How to launch the project
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub tool: ToolManager,
    pub args: &'static [&'static str],
}

/// Pick `air` in watch mode, `go run main.go` otherwise
pub fn launch_plan(watch: bool) -> LaunchPlan {
    if watch {
        LaunchPlan {
            tool: air_tool(),
            args: &[],
        }
    } else {
        LaunchPlan {
            tool: go_tool(),
            args: &["run", "main.go"],
        }
    }
}

/// Run the project in `project_root` with inherited stdio until it exits
pub async fn start(project_root: &Path, watch: bool) -> Result<()> {
    let plan = launch_plan(watch);
    if !plan.tool.is_installed() {
        return Err(ScaffoldError::ToolMissing {
            tool: plan.tool.name().to_string(),
        });
    }

    let status = TokioCommand::new(plan.tool.name())
        .args(plan.args)
        .current_dir(project_root)
        .status()
        .await
        .map_err(|e| ScaffoldError::io(format!("failed to run {}", plan.tool.name()), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(ScaffoldError::ProcessFailed {
            program: plan.tool.name().to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}
