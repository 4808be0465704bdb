//! Directory layout vocabulary used by the path mapper

use serde::{Deserialize, Serialize};

/// How a source path is rewritten into its artifact path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MappingStrategy {
    /// Ordered textual substitutions over the whole string. Every remaining
    /// occurrence of the language token is removed, so names such as
    /// `javax` or `MyjavaThing` are rewritten too.
    #[default]
    Legacy,
    /// Rewrites whole path segments by position and leaves file and package
    /// names untouched.
    SegmentAware,
}

/// Segment names of the source tree and of the build-output tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingLayout {
    /// Editable source root (`src`)
    pub source_root: String,
    /// Main source subtree (`main`)
    pub main_dir: String,
    /// Test source subtree (`test`)
    pub test_dir: String,
    /// Bare language token (`java`)
    pub language: String,
    /// Source file extension including the dot (`.java`)
    pub source_extension: String,
    /// Build output root (`target`)
    pub output_root: String,
    /// Compiled classes subtree (`classes`)
    pub classes_dir: String,
    /// Compiled test classes subtree (`test-classes`)
    pub test_classes_dir: String,
    /// Compiled artifact extension including the dot (`.class`)
    pub artifact_extension: String,
}

impl Default for MappingLayout {
    fn default() -> Self {
        Self::maven()
    }
}

impl MappingLayout {
    /// Standard Maven layout for Java sources
    pub fn maven() -> Self {
        Self {
            source_root: "src".to_string(),
            main_dir: "main".to_string(),
            test_dir: "test".to_string(),
            language: "java".to_string(),
            source_extension: ".java".to_string(),
            output_root: "target".to_string(),
            classes_dir: "classes".to_string(),
            test_classes_dir: "test-classes".to_string(),
            artifact_extension: ".class".to_string(),
        }
    }

    /// Maven layout for another JVM language, e.g. `groovy` or `scala`
    pub fn for_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            source_extension: format!(".{}", language),
            ..Self::maven()
        }
    }

    /// Validate the layout
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("source root", &self.source_root),
            ("main directory", &self.main_dir),
            ("test directory", &self.test_dir),
            ("language", &self.language),
            ("source extension", &self.source_extension),
            ("output root", &self.output_root),
            ("classes directory", &self.classes_dir),
            ("test classes directory", &self.test_classes_dir),
            ("artifact extension", &self.artifact_extension),
        ];

        for (name, value) in fields {
            if value.is_empty() {
                return Err(format!("Layout {} must not be empty", name));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(format!(
                    "Layout {} '{}' must be a single path segment",
                    name, value
                ));
            }
        }

        for (name, ext) in [
            ("source extension", &self.source_extension),
            ("artifact extension", &self.artifact_extension),
        ] {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(format!("Layout {} '{}' must look like '.ext'", name, ext));
            }
        }

        if self.source_extension == self.artifact_extension {
            return Err("Source and artifact extensions must differ".to_string());
        }

        Ok(())
    }

    /// Return true if the path names a file in this layout's source language
    pub fn is_source_path(&self, path: &str) -> bool {
        path.len() > self.source_extension.len() && path.ends_with(&self.source_extension)
    }
}
