//! Component kinds and their fixed templates

use super::Template;
use crate::naming::NameBundle;
use std::fmt;
use std::str::FromStr;

/// Every kind of file the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Controller,
    Service,
    Repository,
    Route,
    Dto,
    Middleware,
    /// Composite kind: the wiring file at the root of a feature module
    Module,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Controller,
        ComponentKind::Service,
        ComponentKind::Repository,
        ComponentKind::Route,
        ComponentKind::Dto,
        ComponentKind::Middleware,
        ComponentKind::Module,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Controller => "controller",
            ComponentKind::Service => "service",
            ComponentKind::Repository => "repository",
            ComponentKind::Route => "route",
            ComponentKind::Dto => "dto",
            ComponentKind::Middleware => "middleware",
            ComponentKind::Module => "module",
        }
    }

    /// Subdirectory inside the owning module; `None` for the module wiring file
    pub fn directory(&self) -> Option<&'static str> {
        match self {
            ComponentKind::Module => None,
            other => Some(other.as_str()),
        }
    }

    /// Generated file name, e.g. `userController.go` or `module.go`
    pub fn file_name(&self, bundle: &NameBundle) -> String {
        let suffix = match self {
            ComponentKind::Controller => "Controller",
            ComponentKind::Service => "Service",
            ComponentKind::Repository => "Repository",
            ComponentKind::Route => "Route",
            ComponentKind::Dto => "DTO",
            ComponentKind::Middleware => "Middleware",
            ComponentKind::Module => return "module.go".to_string(),
        };
        format!("{}{}.go", bundle.path_segment, suffix)
    }

    /// Go package declared by the generated file
    pub fn package_name<'a>(&self, bundle: &'a NameBundle) -> &'a str {
        match self.directory() {
            Some(dir) => dir,
            None => &bundle.path_segment,
        }
    }

    pub fn template(&self) -> Template {
        match self {
            ComponentKind::Controller => Template::new(
                "controller",
                include_str!("../../templates/controller.go.tmpl"),
            ),
            ComponentKind::Service => {
                Template::new("service", include_str!("../../templates/service.go.tmpl"))
            }
            ComponentKind::Repository => Template::new(
                "repository",
                include_str!("../../templates/repository.go.tmpl"),
            ),
            ComponentKind::Route => {
                Template::new("route", include_str!("../../templates/route.go.tmpl"))
            }
            ComponentKind::Dto => Template::new("dto", include_str!("../../templates/dto.go.tmpl")),
            ComponentKind::Middleware => Template::new(
                "middleware",
                include_str!("../../templates/middleware.go.tmpl"),
            ),
            ComponentKind::Module => {
                Template::new("module", include_str!("../../templates/module.go.tmpl"))
            }
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown component kind '{}'", s))
    }
}
