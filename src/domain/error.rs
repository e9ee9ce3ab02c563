use std::fmt;
use std::io;

use thiserror::Error;

/// Descriptor and settings validation failures.
///
/// Raised before any filesystem mutation; a run that hits one of these
/// writes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No application descriptors were supplied.
    #[error("No applications specified. Add at least one entry to 'apps' or pass --app.")]
    NoApplications,

    /// Two descriptors share a listen port.
    #[error("Duplicate listen port {port}: used by '{first}' and '{second}'")]
    DuplicatePort { port: u16, first: String, second: String },

    /// Two descriptors share a name.
    #[error("Duplicate application name '{0}'")]
    DuplicateName(String),

    /// Application name is outside the identifier charset.
    #[error("Invalid application name '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidName(String),

    /// Listen port outside 1-65535.
    #[error("Invalid listen port {port} for '{app}': must be between 1 and 65535")]
    InvalidPort { app: String, port: u16 },

    /// Source path or document root cannot be used.
    #[error("Invalid path '{path}' for '{app}': {reason}")]
    InvalidPath { app: String, path: String, reason: String },

    /// PHP extension name is outside the identifier charset.
    #[error("Invalid PHP extension '{extension}' for '{app}'")]
    InvalidExtension { app: String, extension: String },

    /// A stack setting has an unusable value.
    #[error("Invalid stack setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder had no corresponding value in the render data.
    #[error("Template '{template}' is missing a value: {detail}")]
    MissingField { template: String, detail: String },

    /// The template is not part of the embedded library.
    #[error("Template '{0}' is not part of the template library")]
    UnknownTemplate(String),

    /// Any other rendering failure.
    #[error("Failed to render template '{template}': {detail}")]
    Render { template: String, detail: String },
}

/// One artifact that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedArtifact {
    pub path: String,
    pub reason: String,
}

/// Per-artifact outcome of a write batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub failed: Vec<FailedArtifact>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for WriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written, {} failed", self.written.len(), self.failed.len())?;
        for path in &self.written {
            write!(f, "\n  ✓ {}", path)?;
        }
        for failure in &self.failed {
            write!(f, "\n  ✗ {}: {}", failure.path, failure.reason)?;
        }
        Ok(())
    }
}

/// Artifact writing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// Targets already exist and overwriting was not allowed. Nothing was written.
    #[error("Refusing to overwrite existing file(s): {}", .0.join(", "))]
    ArtifactExists(Vec<String>),

    /// Some artifacts failed during the write phase; the rest are on disk.
    #[error("Partial write: {0}")]
    Partial(WriteReport),

    /// Artifact path is absolute or escapes the target directory.
    #[error("Invalid artifact path '{0}': must be relative and stay inside the target directory")]
    InvalidArtifactPath(String),
}

/// Library-wide error type for fpmkit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Write(#[from] WriteError),

    /// Descriptor file already exists (init).
    #[error("Descriptor file already exists: {0}")]
    ConfigExists(String),

    /// No descriptor file and no --app flags.
    #[error("No descriptor file found. Run 'fpmkit init' or pass --app NAME:PORT:PATH.")]
    ConfigNotFound,

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Interactive confirmation was declined.
    #[error("Cancelled: existing files were left untouched")]
    Cancelled,
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::Template(_)
            | AppError::ParseError { .. }
            | AppError::Write(WriteError::InvalidArtifactPath(_)) => io::ErrorKind::InvalidInput,
            AppError::ConfigNotFound => io::ErrorKind::NotFound,
            AppError::ConfigExists(_) | AppError::Write(WriteError::ArtifactExists(_)) => {
                io::ErrorKind::AlreadyExists
            }
            AppError::Write(WriteError::Partial(_)) => io::ErrorKind::Other,
            AppError::Cancelled => io::ErrorKind::Interrupted,
        }
    }
}
