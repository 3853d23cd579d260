//! Full feature-module scaffolding

use super::component::{ComponentGenerator, GeneratedFile};
use crate::error::{Result, ScaffoldError};
use crate::naming::NameBundle;
use crate::templates::ComponentKind;
use std::path::PathBuf;

/// Files that make up a feature module, in write order
const MODULE_FILES: [ComponentKind; 5] = [
    ComponentKind::Module,
    ComponentKind::Controller,
    ComponentKind::Service,
    ComponentKind::Repository,
    ComponentKind::Route,
];

/// Outcome of [`ModuleScaffolder::scaffold_module`]
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub module_dir: PathBuf,
    /// Files written by this run
    pub created: Vec<PathBuf>,
    /// Files left untouched because they already existed
    pub skipped: Vec<PathBuf>,
    /// First fatal error; files written before it stay on disk
    pub failure: Option<ScaffoldError>,
}

impl ScaffoldReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Builds a feature module out of [`ComponentGenerator`] calls sharing one name
pub struct ModuleScaffolder<'a> {
    generator: &'a ComponentGenerator,
}

impl<'a> ModuleScaffolder<'a> {
    pub fn new(generator: &'a ComponentGenerator) -> Self {
        Self { generator }
    }

    /// Render every module file up front so a render error writes nothing
    pub fn plan(&self, name: &str) -> Result<Vec<GeneratedFile>> {
        let bundle = NameBundle::derive(name);
        MODULE_FILES
            .iter()
            .map(|kind| self.generator.render(*kind, &bundle, &bundle.path_segment))
            .collect()
    }

    /// Create the skeleton and the five module files.
    ///
    /// Existing files are skipped so a partially generated module can be
    /// completed by running this again. Directory and render failures are
    /// returned as `Err`; write failures after the first written file land in
    /// [`ScaffoldReport::failure`].
    pub fn scaffold_module(&self, name: &str) -> Result<ScaffoldReport> {
        let module_dir = self.generator.ensure_module_dirs(name)?;
        let files = self.plan(name)?;

        let mut report = ScaffoldReport {
            module_dir,
            ..ScaffoldReport::default()
        };

        for file in files {
            match self.generator.write(&file) {
                Ok(()) => report.created.push(file.path),
                Err(ScaffoldError::FileAlreadyExists { path }) => report.skipped.push(path),
                Err(e) => {
                    report.failure = Some(e);
                    break;
                }
            }
        }

        Ok(report)
    }
}
