//! Locates the compiled artifacts of source files on disk

use crate::error::{PatchError, PatchErrorKind, PatchResult};
use crate::mapping::{PathMapper, SourcePathMapping};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A compiled file found for a source, with its archive entry name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    pub source_path: String,
    pub file: PathBuf,
    pub entry_name: String,
}

/// Outcome of resolving a set of sources
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub mappings: Vec<SourcePathMapping>,
    pub artifacts: Vec<ResolvedArtifact>,
    /// Sources for which no artifact exists
    pub missing: Vec<String>,
}

/// Expands mapped artifact paths and nested patterns under a project root
pub struct ArtifactResolver<'a> {
    root: &'a Path,
    mapper: &'a PathMapper,
    include_nested: bool,
}

impl<'a> ArtifactResolver<'a> {
    pub fn new(root: &'a Path, mapper: &'a PathMapper, include_nested: bool) -> Self {
        Self {
            root,
            mapper,
            include_nested,
        }
    }

    /// Resolve every source, collecting missing ones instead of failing
    pub fn resolve_all<I, S>(&self, sources: I) -> PatchResult<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolution = Resolution::default();
        let mut seen = HashSet::new();

        for source in sources {
            let source = source.as_ref();
            if !seen.insert(source.to_string()) {
                continue;
            }
            let mapping = self.mapper.mapping(source);
            let artifacts = self.resolve_mapping(&mapping)?;

            if artifacts.is_empty() {
                tracing::debug!(
                    "No compiled artifact for {} (expected {})",
                    source,
                    mapping.artifact_path
                );
                resolution.missing.push(source.to_string());
            } else {
                tracing::debug!("{} -> {} artifact(s)", source, artifacts.len());
                resolution.artifacts.extend(artifacts);
            }
            resolution.mappings.push(mapping);
        }

        Ok(resolution)
    }

    /// Find the exact artifact and, if enabled, its nested artifacts
    pub fn resolve_mapping(&self, mapping: &SourcePathMapping) -> PatchResult<Vec<ResolvedArtifact>> {
        let mut files: Vec<PathBuf> = Vec::new();

        let exact = self.root.join(to_forward_slashes(&mapping.artifact_path));
        if exact.is_file() {
            files.push(exact);
        }

        if self.include_nested {
            let pattern = self.glob_pattern(&mapping.nested_pattern);
            let paths = glob::glob(&pattern).map_err(|e| {
                PatchError::patch(PatchErrorKind::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })?;

            for entry in paths {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Unreadable path while matching {}: {}", pattern, e),
                }
            }
        }

        files.sort();
        files.dedup();

        Ok(files
            .into_iter()
            .map(|file| {
                let relative = file.strip_prefix(self.root).unwrap_or(&file);
                let entry_name = self.mapper.entry_name(&relative.to_string_lossy());
                ResolvedArtifact {
                    source_path: mapping.source_path.clone(),
                    file,
                    entry_name,
                }
            })
            .collect())
    }

    // The root is escaped so that `[`, `*` and `?` in directory names match literally
    fn glob_pattern(&self, relative: &str) -> String {
        let relative = to_forward_slashes(relative);
        if Path::new(&relative).is_absolute() {
            return relative;
        }

        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        format!("{}/{}", root.trim_end_matches(['/', '\\']), relative)
    }
}

// Change sets may come from Windows checkouts
fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
