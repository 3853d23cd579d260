//! Single-file component generation

use super::MODULE_SUBDIRS;
use crate::config::GeneratorConfig;
use crate::error::{Result, ScaffoldError};
use crate::naming::NameBundle;
use crate::templates::{self, ComponentKind, RenderContext};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Permissions for generated files (rw-r--r--)
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// One generation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRequest {
    pub kind: ComponentKind,
    pub name: String,
    pub owning_module: String,
}

impl ComponentRequest {
    pub fn new(kind: ComponentKind, name: impl Into<String>, owning_module: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            owning_module: owning_module.into(),
        }
    }

    /// Request for the wiring file of module `name`
    pub fn module(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(ComponentKind::Module, name.clone(), name)
    }
}

/// A rendered file waiting to be written. Writes never replace an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: ComponentKind,
    pub path: PathBuf,
    pub content: String,
}

/// Renders and writes components into one project
#[derive(Debug, Clone)]
pub struct ComponentGenerator {
    project_root: PathBuf,
    module_identifier: String,
    config: GeneratorConfig,
}

impl ComponentGenerator {
    pub fn new(
        project_root: impl Into<PathBuf>,
        module_identifier: impl Into<String>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            module_identifier: module_identifier.into(),
            config,
        }
    }

    /// Generator for the project at `project_root`, reading `go.mod` and `gonext.yaml` once
    pub fn for_project(project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root = project_root.into();
        let module_identifier = crate::manifest::read_module_identifier(&project_root)?;
        let config = GeneratorConfig::load(&project_root)?;
        Ok(Self::new(project_root, module_identifier, config))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn module_identifier(&self) -> &str {
        &self.module_identifier
    }

    /// Root directory of a feature module
    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.project_root.join(&self.config.app_dir).join(module)
    }

    /// Create the module skeleton; existing directories are left alone
    pub fn ensure_module_dirs(&self, module: &str) -> Result<PathBuf> {
        let module_dir = self.module_dir(module);
        for sub in MODULE_SUBDIRS {
            create_dir(&module_dir.join(sub))?;
        }
        Ok(module_dir)
    }

    /// Destination path for a request
    pub fn destination(&self, kind: ComponentKind, bundle: &NameBundle, owning_module: &str) -> PathBuf {
        let mut path = self.module_dir(owning_module);
        if let Some(dir) = kind.directory() {
            path.push(dir);
        }
        path.push(kind.file_name(bundle));
        path
    }

    /// Render one component with an already derived bundle
    pub fn render(
        &self,
        kind: ComponentKind,
        bundle: &NameBundle,
        owning_module: &str,
    ) -> Result<GeneratedFile> {
        let ctx = RenderContext {
            module_identifier: &self.module_identifier,
            app_dir: &self.config.app_dir,
            owning_module,
        };
        Ok(GeneratedFile {
            kind,
            path: self.destination(kind, bundle, owning_module),
            content: templates::render(kind, bundle, &ctx)?,
        })
    }

    /// Generate a single file.
    ///
    /// Returns the written path, or [`ScaffoldError::FileAlreadyExists`] with
    /// nothing written when the destination is already present.
    pub fn generate(&self, request: &ComponentRequest) -> Result<PathBuf> {
        let bundle = NameBundle::derive(&request.name);

        self.ensure_module_dirs(&request.owning_module)?;
        if let Some(dir) = request.kind.directory() {
            create_dir(&self.module_dir(&request.owning_module).join(dir))?;
        }

        let path = self.destination(request.kind, &bundle, &request.owning_module);
        if path.exists() {
            return Err(ScaffoldError::FileAlreadyExists { path });
        }

        let file = self.render(request.kind, &bundle, &request.owning_module)?;
        self.write(&file)?;
        Ok(file.path)
    }

    /// Create `file` on disk; an existing file is never replaced
    pub fn write(&self, file: &GeneratedFile) -> Result<()> {
        write_new(&file.path, &file.content)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ScaffoldError::DirectoryCreateFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(|source| match source.kind() {
        io::ErrorKind::AlreadyExists => ScaffoldError::FileAlreadyExists {
            path: path.to_path_buf(),
        },
        _ => ScaffoldError::WriteFailed {
            path: path.to_path_buf(),
            source,
        },
    })?;

    file.write_all(content.as_bytes())
        .map_err(|source| ScaffoldError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
}
