//! Patch JAR builder
//!
//! Maps changed source files (`src/main/java/...`) to their compiled classes
//! (`target/classes/...`), including inner classes, and packages them into a
//! JAR that can be dropped over a deployed application.

pub mod archive;
pub mod cli;
pub mod error;
pub mod mapping;
pub mod parser;
pub mod patch;

// Re-export commonly used types
pub use error::{PatchError, PatchErrorKind, PatchResult};
pub use mapping::{
    map_to_artifact, map_to_nested_artifact_pattern, MappingLayout, MappingStrategy, PathMapper,
    SourcePathMapping,
};
pub use parser::{ChangeEntry, ChangeFormat, ChangeSource, ChangeStatus};
pub use patch::{PatchBuilder, PatchConfig, PatchReport};

/// Parse a change set and build a patch with the given configuration
pub fn build_patch(content: &str, config: PatchConfig) -> PatchResult<PatchReport> {
    let entries = parser::parse_changes(content, config.format);
    let builder = PatchBuilder::new(config)?;
    builder.build(entries, None)
}
