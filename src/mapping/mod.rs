//! Source path to compiled artifact path mapping
//!
//! A source file such as `src/main/java/com/example/Foo.java` is compiled to
//! `target/classes/com/example/Foo.class`, and its inner classes to
//! `target/classes/com/example/Foo$Inner.class`. The mapper produces both the
//! exact artifact path and a glob pattern for the nested artifacts. Mapping is
//! a pure string rewrite and never fails; paths that do not follow the layout
//! come out unchanged where no rule applies.

pub mod layout;
pub mod segments;

pub use layout::{MappingLayout, MappingStrategy};

use serde::{Deserialize, Serialize};

const SEPARATORS: [char; 2] = ['/', '\\'];

/// A source path together with the artifact paths it compiles to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePathMapping {
    pub source_path: String,
    pub artifact_path: String,
    pub nested_pattern: String,
}

impl SourcePathMapping {
    /// Map a source path with the default Maven layout and legacy rules
    pub fn new(source_path: &str) -> Self {
        PathMapper::default().mapping(source_path)
    }
}

/// Path mapper configured with a layout and a rewrite strategy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapper {
    layout: MappingLayout,
    strategy: MappingStrategy,
}

impl PathMapper {
    pub fn new(layout: MappingLayout, strategy: MappingStrategy) -> Self {
        Self { layout, strategy }
    }

    pub fn layout(&self) -> &MappingLayout {
        &self.layout
    }

    pub fn strategy(&self) -> MappingStrategy {
        self.strategy
    }

    /// Rewrite a source path into its compiled artifact path
    pub fn map_to_artifact(&self, source_path: &str) -> String {
        match self.strategy {
            MappingStrategy::Legacy => legacy_map(source_path, &self.layout),
            MappingStrategy::SegmentAware => segments::map_segments(source_path, &self.layout),
        }
    }

    /// Rewrite a source path into a glob pattern matching its nested artifacts
    pub fn map_to_nested_artifact_pattern(&self, source_path: &str) -> String {
        let artifact = self.map_to_artifact(source_path);
        let ext = &self.layout.artifact_extension;
        let nested_ext = format!("$*{}", ext);

        match self.strategy {
            MappingStrategy::Legacy => artifact.replace(ext.as_str(), &nested_ext),
            MappingStrategy::SegmentAware => match artifact.strip_suffix(ext.as_str()) {
                Some(stem) => format!("{}{}", stem, nested_ext),
                None => artifact,
            },
        }
    }

    pub fn mapping(&self, source_path: &str) -> SourcePathMapping {
        SourcePathMapping {
            source_path: source_path.to_string(),
            artifact_path: self.map_to_artifact(source_path),
            nested_pattern: self.map_to_nested_artifact_pattern(source_path),
        }
    }

    /// Archive entry name for an artifact path: the part following the
    /// classes subtree of the build output root, always `/`-separated.
    ///
    /// `target/classes/com/example/Foo.class` becomes `com/example/Foo.class`.
    /// Without a classes subtree the part after the output root is used, and
    /// without an output root the whole normalized path.
    pub fn entry_name(&self, artifact_path: &str) -> String {
        let segments: Vec<&str> = artifact_path
            .split(SEPARATORS)
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let layout = &self.layout;

        let is_classes = |s: &str| s == layout.classes_dir || s == layout.test_classes_dir;
        let start = segments
            .windows(2)
            .position(|w| w[0] == layout.output_root && is_classes(w[1]))
            .map(|i| i + 2)
            .or_else(|| {
                segments
                    .iter()
                    .position(|s| *s == layout.output_root)
                    .map(|i| i + 1)
            })
            .unwrap_or(0);

        segments[start..].join("/")
    }

    /// Return true if the source path lives in the test subtree
    pub fn is_test_source(&self, source_path: &str) -> bool {
        let mut previous: Option<&str> = None;
        for segment in source_path.split(SEPARATORS).filter(|s| !s.is_empty()) {
            if segment == self.layout.test_dir && previous == Some(self.layout.source_root.as_str())
            {
                return true;
            }
            previous = Some(segment);
        }
        false
    }
}

/// Map a source path with the default Maven layout and legacy rules
pub fn map_to_artifact(source_path: &str) -> String {
    PathMapper::default().map_to_artifact(source_path)
}

/// Map a source path to the nested artifact glob with the default layout
pub fn map_to_nested_artifact_pattern(source_path: &str) -> String {
    PathMapper::default().map_to_nested_artifact_pattern(source_path)
}

fn legacy_map(source_path: &str, layout: &MappingLayout) -> String {
    let mut out = source_path.to_string();

    // The source root only matches at the start or after a separator
    for sep in SEPARATORS {
        let from = format!("{}{}", layout.source_root, sep);
        let to = format!("{}{}", layout.output_root, sep);
        if let Some(rest) = out.strip_prefix(from.as_str()) {
            out = format!("{}{}", to, rest);
        }
        out = out.replace(&format!("{sep}{from}"), &format!("{sep}{to}"));
    }
    for sep in SEPARATORS {
        out = out.replace(
            &format!("{sep}{}{sep}", layout.main_dir),
            &format!("{sep}{}{sep}", layout.classes_dir),
        );
    }
    for sep in SEPARATORS {
        out = out.replace(
            &format!("{sep}{}{sep}", layout.test_dir),
            &format!("{sep}{}{sep}", layout.test_classes_dir),
        );
    }

    out = out.replace(&layout.source_extension, &layout.artifact_extension);
    out = out.replace(&layout.language, "");

    collapse_separators(&out)
}

/// Collapse runs of the same separator into one
pub(crate) fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last: Option<char> = None;
    for c in path.chars() {
        if SEPARATORS.contains(&c) && last == Some(c) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }
    out
}
