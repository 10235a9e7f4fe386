//! End-to-end runs over temporary documentation trees.

use std::fs;
use std::path::Path;

use docmend::cli::CommandContext;
use docmend::cli::commands::{self, CheckOptions, NormalizeOptions};
use docmend::types::BrokenReason;
use docmend::{
    AssetNormalizer, Config, LinkChecker, ProjectRoot, TreeWalker, repair,
};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> (TempDir, ProjectRoot) {
    let temp = TempDir::new().unwrap();
    let root = ProjectRoot::new(temp.path()).unwrap();
    for (path, body) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, body).unwrap();
    }
    (temp, root)
}

fn context(root: &ProjectRoot) -> CommandContext {
    CommandContext::with_config(root.clone(), Config::default())
}

fn read(root: &ProjectRoot, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_broken_link_reported_with_exit_status() {
    let (_temp, root) = project(&[("a.md", "[x](./missing.md)\n")]);

    let report = LinkChecker::new(&root).check(&TreeWalker::new(&root));
    assert_eq!(report.broken.len(), 1);
    assert_eq!(report.broken[0].reason, BrokenReason::NotFound);
    assert_eq!(report.exit_code(), 1);

    let code = commands::check::run(&context(&root), &CheckOptions::default()).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn test_escape_attempt_is_out_of_scope() {
    let (_temp, root) = project(&[("a.md", "[x](../../etc/passwd)\n")]);

    let report = LinkChecker::new(&root).check(&TreeWalker::new(&root));
    assert_eq!(report.broken.len(), 1);
    assert_eq!(report.broken[0].reason, BrokenReason::OutOfScope);
    assert_eq!(report.valid, 0);
}

#[test]
fn test_check_writes_json_report() {
    let (temp, root) = project(&[
        ("README.md", "[guide](docs/guide.md) [web](https://example.com) [top](#top)\n"),
        ("docs/guide.md", "[back](../README.md)\n"),
    ]);
    let json_path = temp.path().join("out/links.json");
    fs::create_dir_all(json_path.parent().unwrap()).unwrap();

    let options = CheckOptions {
        simple: true,
        only: vec![],
        report: Some(json_path.clone()),
    };
    let code = commands::check::run(&context(&root), &options).unwrap();
    assert_eq!(code, 0);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(json["files_scanned"], 2);
    assert_eq!(json["valid"], 2);
    assert_eq!(json["external"], 1);
    assert_eq!(json["anchor_only"], 1);
}

#[test]
fn test_rename_and_rewrite_then_rerun_is_stable() {
    let (_temp, root) = project(&[
        ("docs/diagrams/generated/My Diagram.png", "png"),
        ("docs/a.md", "![d](My%20Diagram.png)\n"),
    ]);
    let ctx = context(&root);

    let code = commands::normalize::run(&ctx, NormalizeOptions::default()).unwrap();
    assert_eq!(code, 0);
    assert!(root.join("docs/diagrams/generated/my-diagram.png").exists());
    assert!(!root.join("docs/diagrams/generated/My Diagram.png").exists());
    assert_eq!(read(&root, "docs/a.md"), "![d](my-diagram.png)\n");

    let report = read(
        &root,
        "reports-summaries/task-execution/diagram-filename-fix-report.md",
    );
    assert!(report.contains("| docs/diagrams/generated | My Diagram.png | my-diagram.png |"));

    let code = commands::normalize::run(&ctx, NormalizeOptions::default()).unwrap();
    assert_eq!(code, 0);
    assert_eq!(read(&root, "docs/a.md"), "![d](my-diagram.png)\n");
    assert!(root.join("docs/diagrams/generated/my-diagram.png").exists());
}

#[test]
fn test_normalize_dry_run_touches_nothing() {
    let (_temp, root) = project(&[
        ("docs/diagrams/generated/Flow_Chart.png", "png"),
        ("docs/a.md", "![f](diagrams/generated/Flow_Chart.png)\n"),
    ]);

    let options = NormalizeOptions {
        dry_run: true,
        ..Default::default()
    };
    assert_eq!(commands::normalize::run(&context(&root), options).unwrap(), 0);
    assert!(root.join("docs/diagrams/generated/Flow_Chart.png").exists());
    assert_eq!(
        read(&root, "docs/a.md"),
        "![f](diagrams/generated/Flow_Chart.png)\n"
    );
    assert!(!root.join("reports-summaries").exists());
}

#[test]
fn test_collision_gets_suffix() {
    let (_temp, root) = project(&[
        ("docs/diagrams/generated/Foo Bar.png", "a"),
        ("docs/diagrams/generated/foo-bar.png", "b"),
    ]);
    let normalizer = AssetNormalizer::new(&root, false);

    let plan = normalizer.plan(&TreeWalker::new(&root));
    let outcome = normalizer.apply(&plan);
    assert!(outcome.failures.is_empty());

    let dir = root.join("docs/diagrams/generated");
    assert_eq!(fs::read_to_string(dir.join("foo-bar.png")).unwrap(), "b");
    assert_eq!(fs::read_to_string(dir.join("foo-bar-1.png")).unwrap(), "a");
    assert!(!dir.join("Foo Bar.png").exists());
}

#[test]
fn test_collision_suffix_carried_into_links() {
    let (_temp, root) = project(&[
        ("docs/diagrams/generated/A B.png", "space"),
        ("docs/diagrams/generated/A-B.png", "dash"),
        (
            "docs/a.md",
            "[x](diagrams/generated/A-B.png) [y](diagrams/generated/A%20B.png)\n",
        ),
    ]);

    let code = commands::normalize::run(&context(&root), NormalizeOptions::default()).unwrap();
    assert_eq!(code, 0);

    let dir = root.join("docs/diagrams/generated");
    assert_eq!(fs::read_to_string(dir.join("a-b.png")).unwrap(), "space");
    assert_eq!(fs::read_to_string(dir.join("a-b-1.png")).unwrap(), "dash");
    assert_eq!(
        read(&root, "docs/a.md"),
        "[x](diagrams/generated/a-b-1.png) [y](diagrams/generated/a-b.png)\n"
    );
}

#[test]
fn test_relocate_rewrites_references() {
    let (_temp, root) = project(&[
        ("reports-summaries/analysis/audit.md", "# Audit\n"),
        ("docs/index.md", "See [audit](audit.md) and docs/audit.md.\n"),
        ("docs/other.md", "Nothing to see.\n"),
    ]);

    let code = commands::relocate::run(&context(&root), false).unwrap();
    assert_eq!(code, 0);
    assert_eq!(
        read(&root, "docs/index.md"),
        "See [audit](reports-summaries/analysis/audit.md) and \
         reports-summaries/analysis/audit.md.\n"
    );
    assert_eq!(read(&root, "docs/other.md"), "Nothing to see.\n");
}

#[test]
fn test_repair_scenarios() {
    assert_eq!(repair("```\ndef f(): pass\n```\n"), "```python\ndef f(): pass\n```\n");
    assert_eq!(repair("1. a\n3. b\n7. c\n"), "1. a\n2. b\n3. c\n");
    assert_eq!(repair("```\n1. a\n3. b\n```\n"), "```text\n1. a\n3. b\n```\n");
}

#[test]
fn test_fix_check_then_write() {
    let (_temp, root) = project(&[
        ("docs/a.md", "Intro\n1. a\n3. b\n"),
        ("docs/clean.md", "# Clean\n"),
    ]);
    let ctx = context(&root);

    assert_eq!(commands::fix::run(&ctx, &[], true).unwrap(), 1);
    assert_eq!(read(&root, "docs/a.md"), "Intro\n1. a\n3. b\n");

    assert_eq!(commands::fix::run(&ctx, &[], false).unwrap(), 0);
    assert_eq!(read(&root, "docs/a.md"), "Intro\n\n1. a\n2. b\n");

    assert_eq!(commands::fix::run(&ctx, &[], true).unwrap(), 0);
    assert_eq!(read(&root, "docs/clean.md"), "# Clean\n");
}

#[test]
fn test_fix_missing_file_fails() {
    let (_temp, root) = project(&[]);
    let missing = root.join("nope.md");
    let code = commands::fix::run(&context(&root), &[missing], false).unwrap();
    assert_eq!(code, 1);
    assert!(!Path::new(&root.join("nope.md")).exists());
}
