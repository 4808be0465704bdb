//! Property-based tests for the source to artifact path mapping

use patchjar::{map_to_artifact, map_to_nested_artifact_pattern, MappingLayout, MappingStrategy, PathMapper};
use proptest::prelude::*;

/// Package segments that never contain layout tokens
fn package_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-i][a-i0-9_]{0,8}", 0..5)
}

fn class_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,12}".prop_filter("no layout tokens", |s| {
        !s.contains("java") && !s.contains("src")
    })
}

fn join(root: &str, package: &[String], file: &str) -> String {
    let mut parts = vec![root.to_string()];
    parts.extend(package.iter().cloned());
    parts.push(file.to_string());
    parts.join("/")
}

#[test]
fn prop_main_sources_map_to_classes() {
    proptest!(|(package in package_strategy(), class in class_name_strategy())| {
        let source = join("src/main/java", &package, &format!("{}.java", class));
        let expected = join("target/classes", &package, &format!("{}.class", class));
        prop_assert_eq!(map_to_artifact(&source), expected);
    });
}

#[test]
fn prop_test_sources_map_to_test_classes() {
    proptest!(|(package in package_strategy(), class in class_name_strategy())| {
        let source = join("src/test/java", &package, &format!("{}Test.java", class));
        let artifact = map_to_artifact(&source);
        prop_assert!(artifact.starts_with("target/test-classes/"));
        prop_assert!(artifact.ends_with("Test.class"));
    });
}

#[test]
fn prop_nested_pattern_extends_artifact() {
    proptest!(|(package in package_strategy(), class in class_name_strategy())| {
        let source = join("src/main/java", &package, &format!("{}.java", class));
        let artifact = map_to_artifact(&source);
        let stem = artifact.strip_suffix(".class").unwrap();
        prop_assert_eq!(map_to_nested_artifact_pattern(&source), format!("{}$*.class", stem));
    });
}

#[test]
fn prop_strategies_agree_without_language_token() {
    let segment_aware = PathMapper::new(MappingLayout::maven(), MappingStrategy::SegmentAware);
    proptest!(|(package in package_strategy(), class in class_name_strategy())| {
        let source = join("src/main/java", &package, &format!("{}.java", class));
        prop_assert_eq!(segment_aware.map_to_artifact(&source), map_to_artifact(&source));
    });
}

#[test]
fn prop_mapping_is_deterministic() {
    proptest!(|(input in ".{0,64}")| {
        prop_assert_eq!(map_to_artifact(&input), map_to_artifact(&input));
        let segment_aware = PathMapper::new(MappingLayout::maven(), MappingStrategy::SegmentAware);
        prop_assert_eq!(
            segment_aware.map_to_artifact(&input),
            segment_aware.map_to_artifact(&input)
        );
    });
}
