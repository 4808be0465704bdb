//! Error types and handling infrastructure for patch archive generation

use std::path::PathBuf;

/// Core error kinds raised while building a patch
#[derive(Debug, thiserror::Error)]
pub enum PatchErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Missing compiled artifacts for {count} source file(s)")]
    MissingArtifacts { count: usize, sources: Vec<String> },

    #[error("No compiled artifacts matched the change set")]
    EmptyPatch,

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Invalid input: {message}")]
    Input { message: String },
}

impl PatchErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn archive(message: String) -> Self {
        Self::Archive { message }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn input(message: String) -> Self {
        Self::Input { message }
    }
}

/// Main error type for patch operations
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("{kind}")]
    Patch {
        kind: PatchErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PatchError {
    pub fn patch(kind: PatchErrorKind) -> Self {
        Self::Patch { kind, source: None }
    }

    pub fn patch_with_source(kind: PatchErrorKind, source: anyhow::Error) -> Self {
        Self::Patch {
            kind,
            source: Some(source),
        }
    }

    /// Wrap an IO failure together with the path it happened on
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::patch_with_source(
            PatchErrorKind::io(format!("{}: {}", path.display(), err), Some(path)),
            err.into(),
        )
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::patch(PatchErrorKind::configuration(message.into()))
    }

    pub fn kind(&self) -> Option<&PatchErrorKind> {
        match self {
            Self::Patch { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Patch { kind, .. } => match kind {
                PatchErrorKind::MissingArtifacts { count, sources } => {
                    let mut message = format!(
                        "No compiled classes found for {} changed source file(s):",
                        count
                    );
                    for source in sources {
                        message.push_str("\n  ");
                        message.push_str(source);
                    }
                    message
                }
                PatchErrorKind::EmptyPatch => {
                    "Nothing to package: no compiled classes matched the changed sources".to_string()
                }
                PatchErrorKind::Io { message, .. } => format!("File error: {}", message),
                _ => kind.to_string(),
            },
            Self::Zip(err) => format!("Failed to write archive: {}", err),
            Self::Other(err) => format!("Unexpected error: {}", err),
        }
    }
}

/// Result type for patch operations
pub type PatchResult<T> = Result<T, PatchError>;
