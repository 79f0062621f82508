use std::path::PathBuf;

use thiserror::Error;

/// The error type for `milkit` operations.
///
/// Failures are never recovered internally: a malformed key, an unreadable
/// container, or a record of the wrong shape aborts the whole load.
#[derive(Error, Debug)]
pub enum MilkitError {
    /// Error when listing a dataset directory fails.
    #[error("Failed to read directory: {path}")]
    DirectoryRead {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Error when an HDF5 container cannot be opened or one of its records read.
    #[error("Failed to read HDF5 container: {path}")]
    Hdf5 {
        /// The container file.
        path: PathBuf,
        /// The underlying HDF5 error.
        #[source]
        source: hdf5::Error,
    },

    /// Error when a record key has no integer token at the requested position.
    #[error("Malformed record key {key:?} in {path} (split index {split}): {reason}")]
    MalformedKey {
        /// The container file holding the key.
        path: PathBuf,
        /// The offending key.
        key: String,
        /// The token position that was requested.
        split: usize,
        /// Why the token could not be used.
        reason: String,
    },

    /// Error when a record does not have the configured record shape.
    #[error("Record {key:?} loaded from {path} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        /// The directory the record was loaded from.
        path: PathBuf,
        /// The record key.
        key: String,
        /// The configured record shape.
        expected: Vec<usize>,
        /// The shape found on disk.
        actual: Vec<usize>,
    },

    /// Error when data and label files of a directory do not line up.
    ///
    /// Only raised when strict alignment is enabled; otherwise the finding is logged.
    #[error("Data and label files are misaligned in {path}: {reason}")]
    Misaligned {
        /// The dataset directory.
        path: PathBuf,
        /// Description of the first misalignment found.
        reason: String,
    },

    /// Error for logically inconsistent configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },

    /// Error for training histories that cannot be plotted.
    #[error("Invalid training history: {reason}")]
    InvalidHistory {
        /// The reason why the history is invalid.
        reason: String,
    },

    /// Error when reading or writing a training history file fails.
    #[error("Failed to access training history file: {path}")]
    HistoryIo {
        /// The history file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Error when a training history file is not valid JSON.
    #[error("Failed to parse training history: {0}")]
    HistoryFormat(#[from] serde_json::Error),

    /// Error when stacking records into contiguous arrays fails.
    #[error("Array shape error: {0}")]
    Array(#[from] ndarray::ShapeError),

    /// Error when formatting a run timestamp fails.
    #[error("Failed to format run timestamp: {0}")]
    TimeFormat(#[from] time::error::Format),

    /// Error when the legend font file cannot be read.
    #[error("Failed to read font file: {path}")]
    FontRead {
        /// The font file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Error when the legend font file is not a TrueType or OpenType font.
    #[error("Invalid font file: {path}")]
    FontFormat {
        /// The font file.
        path: PathBuf,
        /// The underlying font parsing error.
        #[source]
        source: ab_glyph::InvalidFont,
    },

    /// Error when writing a rendered plot fails.
    #[error("Failed to write image: {path}")]
    Image {
        /// The image path.
        path: PathBuf,
        /// The underlying image error.
        #[source]
        source: image::ImageError,
    },
}

/// A specialized `Result` type for `milkit` operations.
pub type MilkitResult<T> = Result<T, MilkitError>;
