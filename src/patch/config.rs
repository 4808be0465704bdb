//! Configuration options for patch archive generation

use crate::mapping::{MappingLayout, MappingStrategy};
use crate::parser::ChangeFormat;
use chrono::{DateTime, TimeZone};
use std::path::PathBuf;

/// Patch generation configuration
#[derive(Debug, Clone)]
pub struct PatchConfig {
    /// Directory the change set paths are relative to
    pub project_root: PathBuf,
    /// Archive to write
    pub output: PathBuf,
    /// Source and build-output layout
    pub layout: MappingLayout,
    /// How source paths are rewritten
    pub strategy: MappingStrategy,
    /// Change set text format
    pub format: ChangeFormat,
    /// Include inner classes (`Foo$Bar.class`)
    pub include_nested: bool,
    /// Expand listed directories into the sources they contain
    pub expand_directories: bool,
    /// Fail when a source has no compiled artifact
    pub strict: bool,
    /// Write an archive even when nothing matched
    pub allow_empty: bool,
    /// Resolve and report without writing the archive
    pub dry_run: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            output: PathBuf::from("patch.jar"),
            layout: MappingLayout::default(),
            strategy: MappingStrategy::Legacy,
            format: ChangeFormat::Auto,
            include_nested: true,
            expand_directories: true,
            strict: false,
            allow_empty: false,
            dry_run: false,
        }
    }
}

impl PatchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_layout(mut self, layout: MappingLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_strategy(mut self, strategy: MappingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_format(mut self, format: ChangeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_nested(mut self, enabled: bool) -> Self {
        self.include_nested = enabled;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;

        if !self.project_root.is_dir() {
            return Err(format!(
                "Project root is not a directory: {}",
                self.project_root.display()
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err("Output path must not be empty".to_string());
        }

        if !self.dry_run && self.output.is_dir() {
            return Err(format!(
                "Output path is a directory: {}",
                self.output.display()
            ));
        }

        Ok(())
    }
}

/// Default archive file name, e.g. `patch-20240131-154500.jar`
pub fn default_archive_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("patch-{}.jar", now.format("%Y%m%d-%H%M%S"))
}
