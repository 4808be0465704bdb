//! Patch building: change set in, JAR of compiled classes out
//!
//! The pipeline expands listed directories, keeps packable source entries,
//! maps each source to its compiled artifacts, resolves them on disk and
//! writes them into the archive.

pub mod config;
pub mod resolver;
pub mod stats;

pub use config::{default_archive_name, PatchConfig};
pub use resolver::{ArtifactResolver, Resolution, ResolvedArtifact};
pub use stats::{PatchReport, SkippedEntry, SourceReport};

use crate::archive::JarWriter;
use crate::error::{PatchError, PatchErrorKind, PatchResult};
use crate::mapping::PathMapper;
use crate::parser::filter::{select_sources, SkipReason};
use crate::parser::{directory, ChangeEntry};
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::time::Instant;

/// Builds patch archives from change sets
pub struct PatchBuilder {
    config: PatchConfig,
    mapper: PathMapper,
}

impl PatchBuilder {
    /// Create a builder, validating the configuration
    pub fn new(config: PatchConfig) -> PatchResult<Self> {
        config.validate().map_err(PatchError::configuration)?;
        let mapper = PathMapper::new(config.layout.clone(), config.strategy);
        Ok(Self { config, mapper })
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    pub fn mapper(&self) -> &PathMapper {
        &self.mapper
    }

    /// Split a change set into source entries to package and skipped entries
    pub fn collect(
        &self,
        entries: Vec<ChangeEntry>,
    ) -> PatchResult<(Vec<ChangeEntry>, Vec<(ChangeEntry, SkipReason)>)> {
        let entries = if self.config.expand_directories {
            directory::expand_directories(entries, &self.config.project_root, &self.config.layout)
                .map_err(|e| {
                    PatchError::patch_with_source(
                        PatchErrorKind::io(
                            format!("Failed to scan directory: {}", e),
                            e.path().map(|p| p.to_path_buf()),
                        ),
                        e.into(),
                    )
                })?
        } else {
            entries
        };

        // A path may be listed twice or also come from an expanded directory
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.path.clone()))
            .collect();

        Ok(select_sources(entries, &self.config.layout))
    }

    /// Resolve compiled artifacts for source entries
    pub fn resolve(&self, sources: &[ChangeEntry]) -> PatchResult<Resolution> {
        let resolver = ArtifactResolver::new(
            &self.config.project_root,
            &self.mapper,
            self.config.include_nested,
        );
        resolver.resolve_all(sources.iter().map(|e| e.path.as_str()))
    }

    /// Run the whole pipeline and write the archive unless this is a dry run
    pub fn build(
        &self,
        entries: Vec<ChangeEntry>,
        progress: Option<&ProgressBar>,
    ) -> PatchResult<PatchReport> {
        let start = Instant::now();
        let mut report = PatchReport::new(self.config.dry_run);

        let (sources, skipped) = self.collect(entries)?;
        report.candidates = sources.len() + skipped.len();
        report.skipped = skipped
            .into_iter()
            .map(|(entry, reason)| {
                tracing::debug!("Skipping {} ({:?})", entry.path, reason);
                SkippedEntry {
                    path: entry.path,
                    reason,
                }
            })
            .collect();

        let resolution = self.resolve(&sources)?;
        report.missing = resolution.missing.clone();
        report.sources = resolution
            .mappings
            .iter()
            .filter(|m| !resolution.missing.contains(&m.source_path))
            .map(|m| SourceReport {
                source: m.source_path.clone(),
                artifact_path: m.artifact_path.clone(),
                test_source: self.mapper.is_test_source(&m.source_path),
                entries: resolution
                    .artifacts
                    .iter()
                    .filter(|a| a.source_path == m.source_path)
                    .map(|a| a.entry_name.clone())
                    .collect(),
            })
            .collect();

        if self.config.strict && !resolution.missing.is_empty() {
            return Err(PatchError::patch(PatchErrorKind::MissingArtifacts {
                count: resolution.missing.len(),
                sources: resolution.missing,
            }));
        }

        if resolution.artifacts.is_empty() && !self.config.allow_empty {
            return Err(PatchError::patch(PatchErrorKind::EmptyPatch));
        }

        if !self.config.dry_run {
            let summary = self.write_archive(&resolution.artifacts, progress)?;
            report.archive = Some(self.config.output.display().to_string());
            report.entries_written = summary.entries;
            report.bytes_written = summary.bytes;
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    fn write_archive(
        &self,
        artifacts: &[ResolvedArtifact],
        progress: Option<&ProgressBar>,
    ) -> PatchResult<crate::archive::ArchiveSummary> {
        let mut writer = JarWriter::create(&self.config.output)?;
        if let Some(pb) = progress {
            pb.set_length(artifacts.len() as u64);
        }

        for artifact in artifacts {
            if let Some(pb) = progress {
                pb.set_message(artifact.entry_name.clone());
            }
            writer.add_file(&artifact.file, &artifact.entry_name)?;
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        writer.finish()
    }
}
