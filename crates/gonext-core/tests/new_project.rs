//! End-to-end: clone a local starter, rebrand it, then generate a module into it

use gonext_core::generate::{ComponentGenerator, ComponentKind, ComponentRequest, ModuleScaffolder};
use gonext_core::project::{rebrand, TemplateFetcher, TemplateSource};
use gonext_core::runtime::git_tool;
use gonext_core::ScaffoldError;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.email=dev@gonext.test", "-c", "user.name=GoNext Dev"])
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

fn starter_repo(root: &Path) -> std::path::PathBuf {
    let starter = root.join("starter");
    fs::create_dir_all(starter.join("app")).unwrap();
    fs::write(starter.join("go.mod"), "module goNext\n\ngo 1.22\n").unwrap();
    fs::write(
        starter.join("main.go"),
        "package main\n\nimport (\n\t\"goNext/app\"\n\t\"goNext/config\"\n)\n\nfunc main() {\n\tapp.Run(config.Load())\n}\n",
    )
    .unwrap();
    fs::write(
        starter.join("app/app.go"),
        "package app\n\n// module goNextExtras is unrelated\nimport \"goNextExtras/util\"\n",
    )
    .unwrap();

    git(&starter, &["init", "-q"]);
    git(&starter, &["add", "."]);
    git(&starter, &["commit", "-q", "-m", "starter"]);
    starter
}

#[tokio::test]
async fn test_new_project_is_rebranded() {
    if !git_tool().is_installed() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let starter = starter_repo(temp.path());
    let target = temp.path().join("shop");

    let fetcher = TemplateFetcher::new(TemplateSource::Local(starter));
    let outcome = fetcher.fetch_and_rename(&target).await.unwrap();

    assert_eq!(outcome.project_dir, target);
    assert!(outcome.warnings.is_empty());
    assert!(!target.join(".git").exists());
    assert!(!temp.path().join("shop-tmp").exists());

    let rebranded = rebrand(&target, "github.com/acme/shop").unwrap();
    assert_eq!(rebranded.old_identifier, "goNext");
    assert!(rebranded.report.failures.is_empty());

    assert_eq!(
        fs::read_to_string(target.join("go.mod")).unwrap(),
        "module github.com/acme/shop\n\ngo 1.22\n"
    );
    let main = fs::read_to_string(target.join("main.go")).unwrap();
    assert!(main.contains("\"github.com/acme/shop/app\""));
    assert!(main.contains("\"github.com/acme/shop/config\""));
    assert!(!main.contains("goNext/"));

    // A longer identifier that merely starts with the old one is left alone
    let app = fs::read_to_string(target.join("app/app.go")).unwrap();
    assert!(app.contains("\"goNextExtras/util\""));
}

#[tokio::test]
async fn test_second_new_into_same_target_fails() {
    if !git_tool().is_installed() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let starter = starter_repo(temp.path());
    let target = temp.path().join("shop");
    let fetcher = TemplateFetcher::new(TemplateSource::Local(starter));

    fetcher.fetch_and_rename(&target).await.unwrap();
    fs::write(target.join("keep.txt"), "mine").unwrap();

    let err = fetcher.fetch_and_rename(&target).await.unwrap_err();
    assert!(matches!(err, ScaffoldError::RenameFailed { .. }));
    assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "mine");
}

#[test]
fn test_module_then_component_in_fresh_project() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("go.mod"), "module github.com/acme/shop\n\ngo 1.22\n").unwrap();

    let generator = ComponentGenerator::for_project(temp.path()).unwrap();
    let report = ModuleScaffolder::new(&generator).scaffold_module("order").unwrap();
    assert!(report.is_complete());
    assert_eq!(report.created.len(), 5);

    let module_file = fs::read_to_string(temp.path().join("app/order/module.go")).unwrap();
    assert!(module_file.contains("\"github.com/acme/shop/app/order/controller\""));
    assert!(module_file.contains("router.Group(\"/orders\")"));

    let dto = generator
        .generate(&ComponentRequest::new(ComponentKind::Dto, "createOrder", "order"))
        .unwrap();
    assert_eq!(dto, temp.path().join("app/order/dto/createOrderDTO.go"));
    assert!(fs::read_to_string(&dto).unwrap().starts_with("package dto"));

    // Re-running the scaffold touches nothing
    let rerun = ModuleScaffolder::new(&generator).scaffold_module("order").unwrap();
    assert!(rerun.created.is_empty());
    assert_eq!(rerun.skipped.len(), 5);
}
