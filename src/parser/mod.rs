//! Change set parsing: turns version-control output or a plain list into
//! candidate source paths

pub mod diff;
pub mod directory;
pub mod filter;
pub mod status;

use crate::error::{PatchError, PatchErrorKind, PatchResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

/// Text format of a change set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum ChangeFormat {
    /// Pick the format from the content
    #[default]
    Auto,
    /// `svn status` or `git status --porcelain` output
    Status,
    /// Unified diff (`svn diff`, `git diff`)
    Diff,
    /// One path per line
    List,
}

/// State of a changed path as reported by the version-control tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
    Conflicted,
    Ignored,
    /// Named in a plain list
    Listed,
    Unknown,
}

impl ChangeStatus {
    /// Map a single status letter. For svn, `!` is a missing file.
    pub fn from_code(code: char) -> Self {
        match code {
            'M' => ChangeStatus::Modified,
            'A' => ChangeStatus::Added,
            'D' | '!' => ChangeStatus::Deleted,
            'R' => ChangeStatus::Renamed,
            '?' => ChangeStatus::Untracked,
            'C' | 'U' => ChangeStatus::Conflicted,
            'I' | 'X' => ChangeStatus::Ignored,
            _ => ChangeStatus::Unknown,
        }
    }

    /// Map the two `git status --porcelain` columns, index column first
    pub fn from_porcelain(xy: &str) -> Self {
        match xy {
            "??" => ChangeStatus::Untracked,
            "!!" => ChangeStatus::Ignored,
            _ => Self::from_code(xy.chars().find(|c| *c != ' ').unwrap_or(' ')),
        }
    }

    /// Return true if the compiled form of this entry belongs in a patch
    pub fn is_packable(&self) -> bool {
        matches!(
            self,
            ChangeStatus::Modified
                | ChangeStatus::Added
                | ChangeStatus::Renamed
                | ChangeStatus::Untracked
                | ChangeStatus::Conflicted
                | ChangeStatus::Listed
        )
    }
}

/// A single path from a change set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub status: ChangeStatus,
    pub path: String,
}

impl ChangeEntry {
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}

/// Where the change set text comes from
#[derive(Debug, Clone)]
pub enum ChangeSource {
    String(String),
    File(PathBuf),
    Stdin,
}

impl ChangeSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            ChangeSource::String(_) => "string input".to_string(),
            ChangeSource::File(path) => format!("file: {}", path.display()),
            ChangeSource::Stdin => "standard input".to_string(),
        }
    }

    /// Read content as string
    pub fn read_content(&self) -> PatchResult<String> {
        match self {
            ChangeSource::String(content) => Ok(content.clone()),
            ChangeSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| PatchError::io(e, path))
            }
            ChangeSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| PatchError::io(e, "<stdin>"))?;
                Ok(buffer)
            }
        }
    }

    /// Read and parse the change set
    pub fn parse(&self, format: ChangeFormat) -> PatchResult<Vec<ChangeEntry>> {
        let content = self.read_content()?;
        if content.trim().is_empty() {
            return Err(PatchError::patch(PatchErrorKind::input(format!(
                "Empty change set from {}",
                self.description()
            ))));
        }
        Ok(parse_changes(&content, format))
    }
}

/// Parse change set text in the given format
pub fn parse_changes(content: &str, format: ChangeFormat) -> Vec<ChangeEntry> {
    let format = match format {
        ChangeFormat::Auto => detect_format(content),
        other => other,
    };
    tracing::debug!("Parsing change set as {:?}", format);

    match format {
        ChangeFormat::Status => status::parse_status(content),
        ChangeFormat::Diff => diff::parse_diff(content),
        ChangeFormat::List | ChangeFormat::Auto => parse_list(content),
    }
}

/// Guess the format of a change set
pub fn detect_format(content: &str) -> ChangeFormat {
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

    if lines.iter().any(|l| diff::is_header_line(l)) {
        return ChangeFormat::Diff;
    }

    let has_status = lines.iter().any(|l| status::is_status_line(l));
    let all_status = lines
        .iter()
        .all(|l| status::is_status_line(l) || status::is_noise_line(l));
    if has_status && all_status {
        ChangeFormat::Status
    } else {
        ChangeFormat::List
    }
}

/// Parse a plain path list. Blank lines and `#` comments are skipped.
pub fn parse_list(content: &str) -> Vec<ChangeEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| ChangeEntry::new(ChangeStatus::Listed, l))
        .collect()
}
