//! `svn status` and `git status --porcelain` parsing

use super::{ChangeEntry, ChangeStatus};

const STATUS_CODES: &str = " MADRCU?!XI~";
const SVN_FLAG_COLUMNS: usize = 7;

/// Return true if the line looks like a status entry
pub fn is_status_line(line: &str) -> bool {
    let mut chars = line.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(x), Some(y), Some(' ')) => {
            STATUS_CODES.contains(x)
                && (STATUS_CODES.contains(y) || "+*LSKOTB".contains(y))
                && !(x == ' ' && y == ' ')
                && !line[3..].trim().is_empty()
        }
        _ => false,
    }
}

/// Return true for svn status lines that carry no path
pub fn is_noise_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('>')
        || trimmed.starts_with("--- Changelist")
        || trimmed.starts_with("Performing status on external item")
        || trimmed.starts_with("Status against revision")
}

/// Parse status output. Unrecognized lines are skipped.
pub fn parse_status(content: &str) -> Vec<ChangeEntry> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty() && !is_noise_line(l))
        .filter_map(parse_status_line)
        .collect()
}

fn parse_status_line(line: &str) -> Option<ChangeEntry> {
    if !is_status_line(line) {
        tracing::trace!("Skipping status line: {}", line);
        return None;
    }

    let (status, path) = if is_svn_layout(line) {
        let flags = &line[..SVN_FLAG_COLUMNS];
        let code = flags.chars().find(|c| *c != ' ').unwrap_or(' ');
        (ChangeStatus::from_code(code), svn_path(line))
    } else {
        (ChangeStatus::from_porcelain(&line[..2]), line[3..].trim())
    };

    if path.is_empty() {
        return None;
    }

    let path = match status {
        ChangeStatus::Renamed => path
            .rsplit_once(" -> ")
            .map(|(_, to)| to)
            .unwrap_or(path),
        _ => path,
    };

    Some(ChangeEntry::new(status, unquote(path)))
}

// svn: seven flag columns, then a space (or the `-u` out-of-date marker)
fn is_svn_layout(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > SVN_FLAG_COLUMNS + 1
        && matches!(bytes[SVN_FLAG_COLUMNS], b' ' | b'*')
        && bytes[2..SVN_FLAG_COLUMNS]
            .iter()
            .all(|b| b" MC+LSXKOTB".contains(b))
}

/// Path of an svn status line.
///
/// Plain output has the path right after the flag columns and one space.
/// `svn status -u` adds an out-of-date column (`*` or blank) and the working
/// revision before the path.
fn svn_path(line: &str) -> &str {
    let columns = &line[SVN_FLAG_COLUMNS..];
    if let Some(path) = columns
        .strip_prefix(' ')
        .filter(|p| !p.starts_with([' ', '*']))
    {
        return path.trim();
    }

    let columns = columns.trim_start().trim_start_matches('*').trim_start();
    match columns.split_once(char::is_whitespace) {
        Some((revision, path)) if is_revision(revision) => path.trim(),
        _ => columns.trim(),
    }
}

fn is_revision(field: &str) -> bool {
    field == "-" || (!field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()))
}

// git quotes paths containing unusual characters
fn unquote(path: &str) -> String {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_svn_status() {
        let output = "\
M       src/main/java/com/example/Foo.java
A  +    src/main/java/com/example/Bar.java
?       src/main/java/com/example/New.java
!       src/main/java/com/example/Gone.java
D       src/main/java/com/example/Old.java
X       vendor/lib
";
        let entries = parse_status(output);
        assert_eq!(
            entries,
            vec![
                ChangeEntry::new(ChangeStatus::Modified, "src/main/java/com/example/Foo.java"),
                ChangeEntry::new(ChangeStatus::Added, "src/main/java/com/example/Bar.java"),
                ChangeEntry::new(ChangeStatus::Untracked, "src/main/java/com/example/New.java"),
                ChangeEntry::new(ChangeStatus::Deleted, "src/main/java/com/example/Gone.java"),
                ChangeEntry::new(ChangeStatus::Deleted, "src/main/java/com/example/Old.java"),
                ChangeEntry::new(ChangeStatus::Ignored, "vendor/lib"),
            ]
        );
    }

    #[test]
    fn test_svn_noise_lines_are_skipped() {
        let output = "\
M       src/A.java
        >   moved from src/Old.java

Performing status on external item at 'vendor':
--- Changelist 'fixes':
M       src/B.java
";
        let entries = parse_status(output);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["src/A.java", "src/B.java"]);
    }

    #[test]
    fn test_svn_status_with_updates() {
        let output = "\
Status against revision:    125
M       *      120   src/main/java/com/example/Foo.java
M      *      120   src/main/java/com/example/Bar.java
A                0   src/main/java/com/example/Added.java
?                    src/main/java/com/example/New.java
        *      120   src/main/java/com/example/Stale.java
";
        let entries = parse_status(output);
        assert_eq!(
            entries,
            vec![
                ChangeEntry::new(ChangeStatus::Modified, "src/main/java/com/example/Foo.java"),
                ChangeEntry::new(ChangeStatus::Modified, "src/main/java/com/example/Bar.java"),
                ChangeEntry::new(ChangeStatus::Added, "src/main/java/com/example/Added.java"),
                ChangeEntry::new(ChangeStatus::Untracked, "src/main/java/com/example/New.java"),
            ]
        );
    }

    #[test]
    fn test_git_ignored_is_not_deleted() {
        let entries = parse_status("!! target/\n D src/main/java/A.java\n");
        assert_eq!(
            entries,
            vec![
                ChangeEntry::new(ChangeStatus::Ignored, "target/"),
                ChangeEntry::new(ChangeStatus::Deleted, "src/main/java/A.java"),
            ]
        );
    }

    #[test]
    fn test_git_porcelain() {
        let output = " M src/main/java/A.java\nM  src/main/java/B.java\n?? src/main/java/C.java\nR  src/main/java/Old.java -> src/main/java/New.java\n D src/main/java/D.java\n";
        let entries = parse_status(output);
        assert_eq!(
            entries,
            vec![
                ChangeEntry::new(ChangeStatus::Modified, "src/main/java/A.java"),
                ChangeEntry::new(ChangeStatus::Modified, "src/main/java/B.java"),
                ChangeEntry::new(ChangeStatus::Untracked, "src/main/java/C.java"),
                ChangeEntry::new(ChangeStatus::Renamed, "src/main/java/New.java"),
                ChangeEntry::new(ChangeStatus::Deleted, "src/main/java/D.java"),
            ]
        );
    }

    #[test]
    fn test_git_quoted_path() {
        let entries = parse_status("?? \"src/main/java/With Space.java\"\n");
        assert_eq!(entries[0].path, "src/main/java/With Space.java");
    }

    #[test]
    fn test_is_status_line() {
        assert!(is_status_line("M       a.java"));
        assert!(is_status_line("?? a.java"));
        assert!(!is_status_line("src/a.java"));
        assert!(!is_status_line("   "));
        assert!(!is_status_line("M  "));
    }
}
