//! Error types for point cloud operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for point cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Errors that can occur while building or exporting a point cloud.
#[derive(Debug, Error)]
pub enum CloudError {
    /// Color sequence does not match the point sequence.
    #[error("got {colors} colors for {points} points")]
    ColorCountMismatch {
        /// Number of points supplied.
        points: usize,
        /// Number of colors supplied.
        colors: usize,
    },

    /// Normal sequence does not match the point sequence.
    #[error("got {normals} normals for {points} points")]
    NormalCountMismatch {
        /// Number of points supplied.
        points: usize,
        /// Number of normals supplied.
        normals: usize,
    },

    /// Ingestion would leave normals misaligned with positions.
    #[error(
        "cloud {} normals, ingestion must {}",
        if *cloud_has_normals { "carries" } else { "has no" },
        if *cloud_has_normals { "supply normals" } else { "not supply normals" }
    )]
    InconsistentNormals {
        /// Whether the cloud already stores normals.
        cloud_has_normals: bool,
    },

    /// Integer color component outside [0, 255].
    #[error("color component {value} outside [0, 255]")]
    ColorOutOfRange {
        /// The offending component.
        value: i32,
    },

    /// Export to a file failed.
    #[error("failed to export point cloud to {path}: {source}")]
    Export {
        /// Target path of the export.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error on a caller-supplied writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloudError {
    /// Create an `Export` error for the given path.
    #[must_use]
    pub fn export(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Export {
            path: path.into(),
            source,
        }
    }
}
