//! Summary of a patch run

use crate::parser::filter::SkipReason;
use serde::Serialize;

/// A change entry that was not packaged
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: SkipReason,
}

/// Artifacts packaged for one source file
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub artifact_path: String,
    /// Source lives in the test subtree
    pub test_source: bool,
    pub entries: Vec<String>,
}

/// Report of a patch run, printed or serialized as JSON
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    /// Archive path, absent on dry runs
    pub archive: Option<String>,
    pub dry_run: bool,
    /// Entries read from the change set, after directory expansion
    pub candidates: usize,
    pub sources: Vec<SourceReport>,
    pub skipped: Vec<SkippedEntry>,
    pub missing: Vec<String>,
    /// Class entries in the archive, excluding the manifest and directories
    pub entries_written: usize,
    pub bytes_written: u64,
    pub processing_time_ms: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PatchReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            archive: None,
            dry_run,
            candidates: 0,
            sources: Vec::new(),
            skipped: Vec::new(),
            missing: Vec::new(),
            entries_written: 0,
            bytes_written: 0,
            processing_time_ms: 0,
            created_at: chrono::Utc::now(),
        }
    }

    /// Number of artifact files matched across all sources
    pub fn artifact_count(&self) -> usize {
        self.sources.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// One-line summary for terminal output
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} source(s)", self.sources.len()),
            format!("{} class file(s)", self.artifact_count()),
        ];
        if !self.missing.is_empty() {
            parts.push(format!("{} missing", self.missing.len()));
        }
        if !self.skipped.is_empty() {
            parts.push(format!("{} skipped", self.skipped.len()));
        }
        parts.join(", ")
    }
}
