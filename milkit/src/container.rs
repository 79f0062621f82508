//! HDF5 container discovery and reading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use hdf5::File;
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    config::FileNaming,
    error::{MilkitError, MilkitResult},
    keys::sort_keys,
};

/// The role a container file plays in a dataset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileRole {
    /// Input records (X).
    Data,
    /// Ground-truth records (y).
    Label,
}

/// A classified container file found in a dataset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Whether the file holds data or labels.
    pub role: FileRole,
    /// File name without its role suffix; shared by a data file and its label file.
    pub stem: String,
}

/// One array record read from a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Key of the record inside its container.
    pub key: String,
    /// Ordering token parsed from the key.
    pub token: i64,
    /// Record values in their stored shape.
    ///
    /// Values are read as `f64` whatever the stored numeric type, so `f32`,
    /// `f64` and integer datasets up to 2^53 keep their exact values.
    pub array: ArrayD<f64>,
}

/// List the container files of `dir` in ascending file-name order.
///
/// Entries matching neither suffix, and entries that are not regular files,
/// are skipped. Paths are joined onto `dir`; the working directory is untouched.
pub fn scan_directory(dir: &Path, naming: &FileNaming) -> MilkitResult<Vec<ContainerFile>> {
    let read_error = |source| MilkitError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        let Some((role, stem)) = naming.classify(&file_name) else {
            trace!("Skipping {}: no data or label suffix", path.display());
            continue;
        };
        if !path.is_file() {
            trace!("Skipping {}: not a regular file", path.display());
            continue;
        }

        files.push(ContainerFile {
            role,
            stem: stem.to_owned(),
            path,
        });
    }

    Ok(files)
}

/// Read every record of the container at `path`, ordered by the key token at `split`.
///
/// The file handle is released before returning.
pub fn read_records(path: &Path, split: usize) -> MilkitResult<Vec<Record>> {
    let hdf5_error = |source| MilkitError::Hdf5 {
        path: path.to_path_buf(),
        source,
    };

    debug!("Opening {}", path.display());
    let file = File::open(path).map_err(hdf5_error)?;
    let keys = sort_keys(path, file.member_names().map_err(hdf5_error)?, split)?;

    let mut records = Vec::with_capacity(keys.len());
    for record_key in keys {
        trace!("Loading record {}", record_key.key);
        let dataset = file.dataset(&record_key.key).map_err(hdf5_error)?;
        let shape = dataset.shape();
        let values = dataset.read_raw::<f64>().map_err(hdf5_error)?;
        let array = ArrayD::from_shape_vec(IxDyn(&shape), values)?;

        records.push(Record {
            key: record_key.key,
            token: record_key.token,
            array,
        });
    }

    drop(file);
    debug!("Closed {} ({} records)", path.display(), records.len());
    Ok(records)
}
