/// Error types for image-review
///
/// Every error is `Clone` so it can be carried inside an iced `Message`.
/// I/O failures are therefore flattened to their display text.

use std::path::PathBuf;
use thiserror::Error;

/// A filename that does not follow the asset naming convention
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `bg<N>` token anywhere in the name
    #[error("no bg<N> group token in {0:?}")]
    MissingGroupToken(String),

    /// Annotated name without an `_<CONDITION>.<ext>` suffix
    #[error("no condition code before the extension in {0:?}")]
    MissingCondition(String),

    /// Path with no file name component (e.g. ending in "..")
    #[error("path has no file name component: {}", .0.display())]
    NoFileName(PathBuf),
}

/// Why a directory entry was left out of the load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The name does not follow the asset naming convention
    #[error(transparent)]
    Name(#[from] ParseError),

    /// The entry could not be read (dangling symlink, permissions)
    #[error("unreadable entry: {0}")]
    Unreadable(String),
}

/// A rejected Jump To request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Input was empty or not a bare group number
    #[error("Please enter a valid number (got {0:?}).")]
    InvalidInput(String),

    /// Input was numeric but the group does not exist
    #[error("Group \"{0}\" does not exist.")]
    NotFound(String),
}

/// Failure of the asset directory scan as a whole
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The asset directory itself could not be listed
    #[error("failed to read {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("scan task failed: {0}")]
    Join(String),
}

/// Failure writing the manifest file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Failure reading the settings file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("failed to read settings {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("invalid settings {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
}
