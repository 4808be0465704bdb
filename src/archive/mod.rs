//! JAR writing for patch archives

pub mod manifest;

use crate::error::{PatchError, PatchErrorKind, PatchResult};
use chrono::{Datelike, Timelike};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub use manifest::{build_manifest, MANIFEST_PATH};

/// What was written to an archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// File entries, excluding the manifest
    pub entries: usize,
    /// Uncompressed bytes of those entries
    pub bytes: u64,
}

/// Streams compiled classes into a JAR
pub struct JarWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    modified: zip::DateTime,
    seen: HashSet<String>,
    summary: ArchiveSummary,
}

impl JarWriter {
    /// Create the archive and write its manifest
    pub fn create(path: &Path) -> PatchResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PatchError::io(e, parent))?;
        }

        let file = File::create(path).map_err(|e| PatchError::io(e, path))?;
        let now = chrono::Local::now();
        let modified = zip::DateTime::from_date_and_time(
            now.year() as u16,
            now.month() as u8,
            now.day() as u8,
            now.hour() as u8,
            now.minute() as u8,
            now.second() as u8,
        )
        .unwrap_or_default();

        let mut writer = Self {
            path: path.to_path_buf(),
            zip: ZipWriter::new(file),
            modified,
            seen: HashSet::new(),
            summary: ArchiveSummary::default(),
        };

        writer.add_directory("META-INF/")?;
        let options = writer.options();
        writer.zip.start_file(MANIFEST_PATH, options)?;
        writer
            .zip
            .write_all(build_manifest(env!("CARGO_PKG_VERSION")).as_bytes())
            .map_err(|e| PatchError::io(e, &writer.path))?;
        writer.seen.insert(MANIFEST_PATH.to_string());

        Ok(writer)
    }

    fn options(&self) -> FileOptions<'static, ()> {
        FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644)
            .last_modified_time(self.modified)
    }

    fn add_directory(&mut self, name: &str) -> PatchResult<()> {
        if self.seen.insert(name.to_string()) {
            let options = self.options();
            self.zip.add_directory(name, options)?;
        }
        Ok(())
    }

    /// Add a file under `entry_name`. Returns false if the name was already
    /// written.
    pub fn add_file(&mut self, file: &Path, entry_name: &str) -> PatchResult<bool> {
        if entry_name.is_empty() || entry_name.ends_with('/') {
            return Err(PatchError::patch(PatchErrorKind::archive(format!(
                "Invalid entry name '{}' for {}",
                entry_name,
                file.display()
            ))));
        }
        if self.seen.contains(entry_name) {
            tracing::debug!("Skipping duplicate entry {}", entry_name);
            return Ok(false);
        }

        // Parent directory entries, outermost first
        if let Some((dirs, _)) = entry_name.rsplit_once('/') {
            let mut prefix = String::new();
            for segment in dirs.split('/') {
                prefix.push_str(segment);
                prefix.push('/');
                self.add_directory(&prefix)?;
            }
        }

        let contents = std::fs::read(file).map_err(|e| PatchError::io(e, file))?;
        let options = self.options();
        self.zip.start_file(entry_name, options)?;
        self.zip
            .write_all(&contents)
            .map_err(|e| PatchError::io(e, &self.path))?;

        self.seen.insert(entry_name.to_string());
        self.summary.entries += 1;
        self.summary.bytes += contents.len() as u64;
        tracing::trace!("Added {} ({} bytes)", entry_name, contents.len());

        Ok(true)
    }

    /// Finalize the archive
    pub fn finish(self) -> PatchResult<ArchiveSummary> {
        self.zip.finish()?;
        tracing::info!(
            "Wrote {} ({} entries, {} bytes)",
            self.path.display(),
            self.summary.entries,
            self.summary.bytes
        );
        Ok(self.summary)
    }
}
