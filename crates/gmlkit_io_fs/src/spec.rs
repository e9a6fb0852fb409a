//! Flatten specification models and top-level error types.

use std::fmt;
use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////
// #region Constants

/// Extension (without dot) of files picked up from the source tree.
pub const C_EXT_SOURCE: &str = "gml";
/// Extension (without dot) written under the output directory.
pub const C_EXT_TARGET: &str = "txt";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `flatten_copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFlattenOptions {
    /// Directory scanned recursively for candidate files.
    pub dir_source: PathBuf,
    /// Flat directory receiving the renamed copies.
    pub dir_output: PathBuf,
}

impl SpecFlattenOptions {
    pub fn new<P, Q>(dir_source: P, dir_output: Q) -> Self
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self {
            dir_source: dir_source.as_ref().to_path_buf(),
            dir_output: dir_output.as_ref().to_path_buf(),
        }
    }
}

/// One per-file copy failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFlattenError {
    /// Candidate file that failed.
    pub path_source: PathBuf,
    /// Destination that was reserved for it, if any.
    pub path_destination: Option<PathBuf>,
    /// User-facing error text.
    pub exception: String,
}

impl fmt::Display for SpecFlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path_destination {
            Some(path_dst) => write!(
                f,
                "Error copying '{}' to '{}': {}",
                self.path_source.display(),
                path_dst.display(),
                self.exception
            ),
            None => write!(
                f,
                "Error copying '{}': {}",
                self.path_source.display(),
                self.exception
            ),
        }
    }
}

/// "Run aborted before traversal" errors (input validation / setup stage).
#[derive(Debug)]
pub enum FlattenError {
    /// Source path is missing or not a directory.
    InvalidSource(PathBuf),
    /// Output path exists but is not a directory.
    InvalidOutput(PathBuf),
    /// Output directory could not be created.
    OutputCreation {
        /// Output path that failed creation.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Source and output resolve to the same directory.
    SameDirectory {
        /// Normalized source directory.
        source: PathBuf,
        /// Normalized output directory.
        output: PathBuf,
    },
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSource(path) => {
                write!(f, "Source directory '{}' not found.", path.display())
            }
            Self::InvalidOutput(path) => write!(
                f,
                "Output path '{}' exists but is not a directory.",
                path.display()
            ),
            Self::OutputCreation { path, message } => write!(
                f,
                "Could not create output directory '{}': {message}",
                path.display()
            ),
            Self::SameDirectory { source, output } => write!(
                f,
                "Source and output directories cannot be the same when flattening: {} <-> {}",
                source.display(),
                output.display()
            ),
        }
    }
}

impl std::error::Error for FlattenError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
