use crate::mapping::MappingLayout;
use crate::parser::{ChangeEntry, ChangeStatus};
use std::path::Path;

/// Return true if the file has the layout's source extension and exists
pub fn is_source_file(path: &Path, layout: &MappingLayout) -> bool {
    path.is_file() && path.to_str().is_some_and(|p| layout.is_source_path(p))
}

/// Why a change entry was left out of the patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SkipReason {
    /// Deleted, ignored or unknown status
    Status(ChangeStatus),
    /// Not a source file of the configured language
    NotSource,
}

/// Split entries into mappable sources and skipped entries
pub fn select_sources(
    entries: Vec<ChangeEntry>,
    layout: &MappingLayout,
) -> (Vec<ChangeEntry>, Vec<(ChangeEntry, SkipReason)>) {
    let mut selected = Vec::new();
    let mut skipped = Vec::new();

    for entry in entries {
        if !entry.status.is_packable() {
            let reason = SkipReason::Status(entry.status);
            skipped.push((entry, reason));
        } else if !layout.is_source_path(&entry.path) {
            skipped.push((entry, SkipReason::NotSource));
        } else {
            selected.push(entry);
        }
    }

    (selected, skipped)
}
