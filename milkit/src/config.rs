//! Configuration for dataset loading.
//!
//! All structs derive burn's `Config`, so they serialize to and from JSON and
//! expose `with_*` builders for every defaulted field.

use std::{fmt, path::PathBuf, str::FromStr};

use burn::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    container::FileRole,
    error::{MilkitError, MilkitResult},
};

/// Filename conventions distinguishing data containers from label containers.
///
/// A label file carries the same base name as its data file, e.g. `bag_07.h5`
/// and `bag_07_label.h5`.
#[derive(Config, Debug, PartialEq, Eq)]
pub struct FileNaming {
    /// Suffix of data files.
    #[config(default = "String::from(\".h5\")")]
    pub data_suffix: String,
    /// Suffix of label files.
    #[config(default = "String::from(\"_label.h5\")")]
    pub label_suffix: String,
}

impl FileNaming {
    /// Classify a file name, returning its role and base name.
    ///
    /// The label suffix is checked first: it often ends with the data suffix,
    /// and a label file must never be taken for a data file.
    pub fn classify<'a>(&self, file_name: &'a str) -> Option<(FileRole, &'a str)> {
        if let Some(stem) = file_name.strip_suffix(self.label_suffix.as_str()) {
            return Some((FileRole::Label, stem));
        }
        file_name
            .strip_suffix(self.data_suffix.as_str())
            .map(|stem| (FileRole::Data, stem))
    }

    /// Validate the naming convention.
    pub fn validate(&self) -> MilkitResult<()> {
        if self.data_suffix.is_empty() || self.label_suffix.is_empty() {
            return Err(MilkitError::InvalidConfiguration {
                reason: "File suffixes must not be empty".to_owned(),
            });
        }
        if self.data_suffix == self.label_suffix {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!(
                    "Data and label suffixes must differ, both are {:?}",
                    self.data_suffix
                ),
            });
        }
        if self.data_suffix.ends_with(self.label_suffix.as_str()) {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!(
                    "Data suffix {:?} ends with the label suffix {:?}, every data file would be read as labels",
                    self.data_suffix, self.label_suffix
                ),
            });
        }
        Ok(())
    }
}

/// Configuration for [`MilLoader`](crate::MilLoader).
#[derive(Config, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How data and label files are recognized.
    #[config(default = "FileNaming::new()")]
    pub naming: FileNaming,
    /// Shape of one data record, `[channels, height, width]`.
    #[config(default = "[3, 64, 64]")]
    pub data_shape: [usize; 3],
    /// Shape of one label record.
    #[config(default = "[1]")]
    pub label_shape: [usize; 1],
    /// Fail instead of warning when data and label files do not line up.
    #[config(default = false)]
    pub strict_alignment: bool,
}

impl LoaderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> MilkitResult<()> {
        self.naming.validate()?;

        if self.data_shape.contains(&0) {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!("Data record shape {:?} has an empty axis", self.data_shape),
            });
        }
        if self.label_shape.contains(&0) {
            return Err(MilkitError::InvalidConfiguration {
                reason: format!("Label record shape {:?} has an empty axis", self.label_shape),
            });
        }
        Ok(())
    }
}

/// One dataset directory together with the key token used for ordering its records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetSource {
    /// Directory holding data and label containers.
    pub path: PathBuf,
    /// Zero-based position of the ordering token in each record key.
    pub split: usize,
}

impl DatasetSource {
    /// Create a new source.
    pub fn new(path: impl Into<PathBuf>, split: usize) -> Self {
        Self {
            path: path.into(),
            split,
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.split)
    }
}

/// Error returned when a `PATH:SPLIT` source string cannot be parsed.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid dataset source {input:?}: {reason}")]
pub struct ParseSourceError {
    input: String,
    reason: String,
}

impl FromStr for DatasetSource {
    type Err = ParseSourceError;

    /// Parse `PATH:SPLIT`. The split is taken after the last colon, so paths may
    /// contain colons themselves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| ParseSourceError {
            input: s.to_owned(),
            reason,
        };

        let (path, split) = s
            .rsplit_once(':')
            .ok_or_else(|| error("expected PATH:SPLIT".to_owned()))?;
        if path.is_empty() {
            return Err(error("path is empty".to_owned()));
        }
        let split = split
            .parse::<usize>()
            .map_err(|e| error(format!("split index {split:?} is not a number: {e}")))?;

        Ok(Self::new(path, split))
    }
}
