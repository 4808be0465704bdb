//! Integration tests for building patch archives from change sets

use patchjar::{build_patch, ChangeFormat, MappingStrategy, PatchConfig, PatchErrorKind};
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::path::Path;
use std::process::Command;
use tempfile::{tempdir, TempDir};
use zip::ZipArchive;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, relative.as_bytes()).unwrap();
}

/// A compiled Maven project with main and test classes
fn maven_project() -> TempDir {
    let root = tempdir().unwrap();
    for file in [
        "src/main/java/com/example/Foo.java",
        "src/main/java/com/example/Bar.java",
        "src/main/java/com/example/util/JavaUtils.java",
        "src/test/java/com/example/FooTest.java",
        "target/classes/com/example/Foo.class",
        "target/classes/com/example/Foo$Inner.class",
        "target/classes/com/example/Foo$1.class",
        "target/classes/com/example/Bar.class",
        "target/classes/com/example/util/JavaUtils.class",
        "target/test-classes/com/example/FooTest.class",
    ] {
        touch(root.path(), file);
    }
    root
}

fn jar_entries(jar: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(jar).unwrap()).unwrap();
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|n| !n.ends_with('/'))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

#[test]
fn test_svn_status_to_jar() {
    let project = maven_project();
    let jar = project.path().join("dist/patch.jar");
    let status = "\
M       src/main/java/com/example/Foo.java
M       src/test/java/com/example/FooTest.java
D       src/main/java/com/example/Removed.java
M       pom.xml
";

    let config = PatchConfig::new()
        .with_project_root(project.path())
        .with_output(&jar);
    let report = build_patch(status, config).unwrap();

    assert_eq!(
        jar_entries(&jar),
        vec![
            "META-INF/MANIFEST.MF",
            "com/example/Foo$1.class",
            "com/example/Foo$Inner.class",
            "com/example/Foo.class",
            "com/example/FooTest.class",
        ]
    );
    assert_eq!(report.entries_written, 4);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.is_complete());
}

#[test]
fn test_git_diff_to_jar() {
    let project = maven_project();
    let jar = project.path().join("patch.jar");
    let diff = "\
diff --git a/src/main/java/com/example/Bar.java b/src/main/java/com/example/Bar.java
index 1111111..2222222 100644
--- a/src/main/java/com/example/Bar.java
+++ b/src/main/java/com/example/Bar.java
@@ -1 +1 @@
-class Bar {}
+class Bar { }
";

    let config = PatchConfig::new()
        .with_project_root(project.path())
        .with_output(&jar)
        .with_format(ChangeFormat::Diff);
    build_patch(diff, config).unwrap();

    assert_eq!(
        jar_entries(&jar),
        vec!["META-INF/MANIFEST.MF", "com/example/Bar.class"]
    );
}

#[test]
fn test_language_token_in_class_name() {
    let project = maven_project();
    let list = "src/main/java/com/example/util/JavaUtils.java\n";

    // Legacy mapping drops "java" from "JavaUtils" only case-sensitively,
    // so the capitalized name survives
    let legacy_jar = project.path().join("legacy.jar");
    let config = PatchConfig::new()
        .with_project_root(project.path())
        .with_output(&legacy_jar);
    build_patch(list, config).unwrap();
    assert!(jar_entries(&legacy_jar).contains(&"com/example/util/JavaUtils.class".to_string()));

    let aware_jar = project.path().join("aware.jar");
    let config = PatchConfig::new()
        .with_project_root(project.path())
        .with_output(&aware_jar)
        .with_strategy(MappingStrategy::SegmentAware);
    build_patch(list, config).unwrap();
    assert_eq!(jar_entries(&legacy_jar), jar_entries(&aware_jar));
}

#[test]
fn test_listed_directory_is_expanded() {
    let project = maven_project();
    let jar = project.path().join("patch.jar");

    let config = PatchConfig::new()
        .with_project_root(project.path())
        .with_output(&jar)
        .with_nested(false);
    let report = build_patch("src/main/java/com/example/util\n", config).unwrap();

    assert_eq!(report.sources.len(), 1);
    assert_eq!(
        jar_entries(&jar),
        vec!["META-INF/MANIFEST.MF", "com/example/util/JavaUtils.class"]
    );
}

#[test]
fn test_strict_mode_reports_missing_classes() {
    let project = maven_project();
    touch(project.path(), "src/main/java/com/example/NotBuilt.java");

    let config = PatchConfig::new()
        .with_project_root(project.path())
        .with_output(project.path().join("patch.jar"))
        .with_strict(true);
    let err = build_patch(
        "src/main/java/com/example/Foo.java\nsrc/main/java/com/example/NotBuilt.java\n",
        config,
    )
    .unwrap_err();

    match err.kind() {
        Some(PatchErrorKind::MissingArtifacts { sources, .. }) => {
            assert_eq!(sources, &vec!["src/main/java/com/example/NotBuilt.java".to_string()]);
        }
        other => panic!("unexpected error kind: {:?}", other),
    }
    assert!(!project.path().join("patch.jar").exists());
}

fn run_patchjar(args: &[&str], cwd: &Path) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_patchjar"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run patchjar");

    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_cli_builds_jar_from_status_file() {
    let project = maven_project();
    fs::write(
        project.path().join("changes.txt"),
        " M src/main/java/com/example/Bar.java\n",
    )
    .unwrap();

    let (ok, stdout, stderr) = run_patchjar(&["changes.txt", "-o", "out/hotfix"], project.path());
    assert!(ok, "patchjar failed: {}", stderr);
    assert!(stdout.contains("Wrote"), "unexpected output: {}", stdout);
    assert_eq!(
        jar_entries(&project.path().join("out/hotfix.jar")),
        vec!["META-INF/MANIFEST.MF", "com/example/Bar.class"]
    );
}

#[test]
fn test_cli_dry_run_json() {
    let project = maven_project();
    fs::write(
        project.path().join("changes.txt"),
        "src/main/java/com/example/Foo.java\n",
    )
    .unwrap();

    let (ok, stdout, stderr) = run_patchjar(
        &["changes.txt", "--dry-run", "--json", "-o", "p.jar"],
        project.path(),
    );
    assert!(ok, "patchjar failed: {}", stderr);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["sources"][0]["entries"].as_array().unwrap().len(), 3);
    assert!(!project.path().join("p.jar").exists());
}

#[test]
fn test_cli_map_subcommand() {
    let dir = tempdir().unwrap();
    let (ok, stdout, _) = run_patchjar(&["map", "src/main/java/com/example/Foo.java"], dir.path());
    assert!(ok);
    assert!(stdout.contains("target/classes/com/example/Foo.class"));
    assert!(stdout.contains("target/classes/com/example/Foo$*.class"));
}

#[test]
fn test_cli_empty_patch_fails() {
    let project = maven_project();
    fs::write(project.path().join("changes.txt"), "M       README.md\n").unwrap();

    let (ok, _, stderr) = run_patchjar(&["changes.txt"], project.path());
    assert!(!ok);
    assert!(stderr.contains("Nothing to package"), "stderr: {}", stderr);
}

#[test]
fn test_cli_reports_missing_source_once() {
    let project = maven_project();
    fs::write(
        project.path().join("changes.txt"),
        "src/main/java/com/example/Foo.java\nsrc/main/java/com/example/Gone.java\n",
    )
    .unwrap();

    let (ok, _, stderr) = run_patchjar(&["changes.txt", "--dry-run"], project.path());
    assert!(ok, "patchjar failed: {}", stderr);
    assert_eq!(stderr.matches("Gone.java").count(), 1, "stderr: {}", stderr);
}

#[test]
fn test_cli_logs_without_color_when_piped() {
    let project = maven_project();
    fs::write(
        project.path().join("changes.txt"),
        "src/main/java/com/example/Foo.java\n",
    )
    .unwrap();

    let (ok, _, stderr) = run_patchjar(&["changes.txt", "--dry-run", "--verbose"], project.path());
    assert!(ok, "patchjar failed: {}", stderr);
    assert!(stderr.contains("DEBUG"), "stderr: {}", stderr);
    assert!(!stderr.contains('\u{1b}'), "stderr: {:?}", stderr);
}

#[test]
fn test_cli_map_flags_after_subcommand() {
    let dir = tempdir().unwrap();
    let (ok, stdout, stderr) = run_patchjar(
        &["map", "--segment-aware", "src/main/java/com/example/JavaUtils.java"],
        dir.path(),
    );
    assert!(ok, "patchjar failed: {}", stderr);
    assert!(stdout.contains("target/classes/com/example/JavaUtils.class"));
}
