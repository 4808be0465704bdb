use crate::mapping::MappingLayout;
use crate::parser::{ChangeEntry, ChangeStatus};
use std::path::Path;
use walkdir::WalkDir;

/// Find source files under a directory, sorted for stable output
pub fn find_source_files(dir: &Path, layout: &MappingLayout) -> Result<Vec<String>, walkdir::Error> {
    let mut source_files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if crate::parser::filter::is_source_file(path, layout) {
            source_files.push(path.to_string_lossy().into_owned());
        }
    }

    Ok(source_files)
}

/// Replace entries naming a directory under `root` with the source files it
/// contains. Other entries pass through unchanged.
pub fn expand_directories(
    entries: Vec<ChangeEntry>,
    root: &Path,
    layout: &MappingLayout,
) -> Result<Vec<ChangeEntry>, walkdir::Error> {
    let mut expanded = Vec::with_capacity(entries.len());

    for entry in entries {
        let on_disk = root.join(&entry.path);
        if !entry.status.is_packable() || !on_disk.is_dir() {
            expanded.push(entry);
            continue;
        }

        let files = find_source_files(&on_disk, layout)?;
        tracing::debug!("Expanded {} into {} source files", entry.path, files.len());
        for file in files {
            let relative = Path::new(&file)
                .strip_prefix(root)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or(file);
            let status = match entry.status {
                ChangeStatus::Untracked => ChangeStatus::Untracked,
                _ => ChangeStatus::Listed,
            };
            expanded.push(ChangeEntry::new(status, relative));
        }
    }

    Ok(expanded)
}
