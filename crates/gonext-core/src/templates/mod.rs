//! Template rendering for generated Go source files
//!
//! Each [`ComponentKind`] owns one fixed template. Templates use named
//! `{{placeholder}}` markers; rendering fails if a marker has no value, so a
//! template that grows a new placeholder cannot silently render garbage.

pub mod kind;

use crate::error::{Result, ScaffoldError};
use crate::naming::NameBundle;
use std::collections::BTreeMap;

pub use kind::ComponentKind;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Placeholder name -> value mapping
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: BTreeMap<&'static str, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A named template source
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    source: &'static str,
}

impl Template {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Substitute every `{{name}}` marker
    pub fn render(&self, values: &Placeholders) -> Result<String> {
        let mut out = String::with_capacity(self.source.len() + 256);
        let mut rest = self.source;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];
            let end = after.find(CLOSE).ok_or_else(|| ScaffoldError::Render {
                template: self.name,
                placeholder: after.lines().next().unwrap_or_default().to_string(),
            })?;

            let key = after[..end].trim();
            let value = values.get(key).ok_or_else(|| ScaffoldError::Render {
                template: self.name,
                placeholder: key.to_string(),
            })?;
            out.push_str(value);
            rest = &after[end + CLOSE.len()..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Where the generated file sits inside the project's import namespace
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Identifier declared in `go.mod`
    pub module_identifier: &'a str,
    /// Directory holding feature modules (e.g. `app`)
    pub app_dir: &'a str,
    /// Feature module that owns the file
    pub owning_module: &'a str,
}

impl RenderContext<'_> {
    /// Import path of the app package, e.g. `myproj/app`
    pub fn app_path(&self) -> String {
        let app_dir = self.app_dir.replace('\\', "/");
        format!("{}/{}", self.module_identifier, app_dir.trim_matches('/'))
    }

    /// Import prefix of the owning module's sibling packages, e.g. `myproj/app/user`
    pub fn module_path(&self) -> String {
        format!("{}/{}", self.app_path(), self.owning_module)
    }
}

/// Render the template for `kind` with identifiers from `bundle`
pub fn render(kind: ComponentKind, bundle: &NameBundle, ctx: &RenderContext<'_>) -> Result<String> {
    let placeholders = Placeholders::new()
        .with("package", kind.package_name(bundle))
        .with("title", bundle.title.as_str())
        .with("name", bundle.path_segment.as_str())
        .with("plural", bundle.plural_route.as_str())
        .with("app_path", ctx.app_path())
        .with("module_path", ctx.module_path());

    kind.template().render(&placeholders)
}
