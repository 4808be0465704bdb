//! Unified diff header parsing (`svn diff`, `git diff`)

use super::{ChangeEntry, ChangeStatus};
use std::collections::HashMap;

const DEV_NULL: &str = "/dev/null";

/// Return true if the line is a file header of a unified diff
pub fn is_header_line(line: &str) -> bool {
    line.starts_with("Index: ") || line.starts_with("diff --git ") || line.starts_with("+++ ")
}

/// Collect the files touched by a diff, in order of first appearance
pub fn parse_diff(content: &str) -> Vec<ChangeEntry> {
    let mut entries: Vec<ChangeEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    let mut upsert = |path: &str, entries: &mut Vec<ChangeEntry>| -> usize {
        if let Some(&i) = index.get(path) {
            return i;
        }
        entries.push(ChangeEntry::new(ChangeStatus::Modified, path));
        index.insert(path.to_string(), entries.len() - 1);
        entries.len() - 1
    };

    let mut previous = "";

    for line in content.lines() {
        let after_old_header = previous.starts_with("--- ");
        previous = line;

        if let Some(rest) = line.strip_prefix("Index: ") {
            let path = rest.trim();
            if !path.is_empty() {
                current = Some(upsert(path, &mut entries));
            }
        } else if let Some(rest) = line.strip_prefix("diff --git ") {
            if let Some((_, path)) = rest.rsplit_once(" b/") {
                current = Some(upsert(path.trim(), &mut entries));
            }
        } else if line.starts_with("new file mode") {
            if let Some(i) = current {
                entries[i].status = ChangeStatus::Added;
            }
        } else if line.starts_with("deleted file mode") {
            if let Some(i) = current {
                entries[i].status = ChangeStatus::Deleted;
            }
        } else if let Some(rest) = line.strip_prefix("+++ ").filter(|_| after_old_header) {
            let target = header_path(rest);
            if target == DEV_NULL {
                if let Some(i) = current {
                    entries[i].status = ChangeStatus::Deleted;
                }
            } else if !target.is_empty() {
                current = Some(upsert(target, &mut entries));
            }
        }
    }

    entries
}

// `+++ b/path\t(working copy)` -> `path`
fn header_path(rest: &str) -> &str {
    let path = rest.split('\t').next().unwrap_or(rest).trim();
    path.strip_prefix("b/").unwrap_or(path)
}
