//! Loading labeled MIL datasets stored across many HDF5 containers.
//!
//! A dataset directory holds pairs of containers, `<name>.h5` with the input
//! records and `<name>_label.h5` with the matching labels. Each container maps
//! underscore-delimited keys to array records; one key token is an integer
//! that fixes the record order.
//!
//! [`MilLoader::load_directory`] reads one directory into two ordered record
//! sequences, [`MilLoader::load_sources`] repeats this over several directories
//! and concatenates the results into two contiguous arrays.

use std::path::Path;

use burn::tensor::{backend::Backend, Tensor, TensorData};
use ndarray::{concatenate, Array2, Array4, ArrayD, Axis};
use tracing::{info, warn};

use crate::{
    alignment::{check_alignment, LoadedFile},
    config::{DatasetSource, LoaderConfig},
    container::{read_records, scan_directory, FileRole, Record},
    error::{MilkitError, MilkitResult},
};

/// Records loaded from one directory, not yet coerced to fixed-shape arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSplit {
    /// Data records (X) in load order.
    pub data: Vec<Record>,
    /// Label records (y) in load order.
    pub labels: Vec<Record>,
    /// Every container that contributed, in directory order.
    pub files: Vec<LoadedFile>,
}

impl LoadedSplit {
    /// Drop the provenance and return the plain `(X, y)` array sequences.
    pub fn into_arrays(self) -> (Vec<ArrayD<f64>>, Vec<ArrayD<f64>>) {
        let arrays = |records: Vec<Record>| -> Vec<ArrayD<f64>> {
            records.into_iter().map(|record| record.array).collect()
        };
        (arrays(self.data), arrays(self.labels))
    }
}

/// Data and labels of one or more directories as contiguous arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDataset {
    /// Data records, `[n, channels, height, width]`.
    pub data: Array4<f64>,
    /// Label records, `[n, label_len]`.
    pub labels: Array2<f64>,
}

impl MergedDataset {
    /// Empty accumulators for the given record shapes.
    pub fn empty(data_shape: [usize; 3], label_shape: [usize; 1]) -> Self {
        let [channels, height, width] = data_shape;
        Self {
            data: Array4::zeros((0, channels, height, width)),
            labels: Array2::zeros((0, label_shape[0])),
        }
    }

    /// Number of data records.
    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Whether no data records were loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of label records.
    pub fn label_len(&self) -> usize {
        self.labels.len_of(Axis(0))
    }

    /// Shape of one data record.
    pub fn data_shape(&self) -> [usize; 3] {
        let (_, channels, height, width) = self.data.dim();
        [channels, height, width]
    }

    /// Shape of one label record.
    pub fn label_shape(&self) -> [usize; 1] {
        [self.labels.len_of(Axis(1))]
    }

    /// Convert both arrays into tensors on `device`.
    pub fn into_tensors<B: Backend>(self, device: &B::Device) -> (Tensor<B, 4>, Tensor<B, 2>) {
        let data_shape = self.data.shape().to_vec();
        let label_shape = self.labels.shape().to_vec();

        let data = TensorData::new(self.data.iter().copied().collect::<Vec<f64>>(), data_shape);
        let labels = TensorData::new(
            self.labels.iter().copied().collect::<Vec<f64>>(),
            label_shape,
        );

        (
            Tensor::from_data(data, device),
            Tensor::from_data(labels, device),
        )
    }

    /// Append one loaded directory along the leading axis.
    fn append(&mut self, dir: &Path, split: LoadedSplit) -> MilkitResult<()> {
        let data_shape = self.data_shape();
        let label_shape = self.label_shape();

        let data: Array4<f64> =
            stack_records(dir, split.data, &data_shape)?.into_dimensionality()?;
        let labels: Array2<f64> =
            stack_records(dir, split.labels, &label_shape)?.into_dimensionality()?;

        let data = concatenate(Axis(0), &[self.data.view(), data.view()])?;
        let labels = concatenate(Axis(0), &[self.labels.view(), labels.view()])?;
        self.data = data;
        self.labels = labels;
        Ok(())
    }
}

/// Stack records of identical shape along a new leading axis.
///
/// A scalar record is accepted when the expected shape holds exactly one element.
fn stack_records(
    dir: &Path,
    records: Vec<Record>,
    shape: &[usize],
) -> MilkitResult<ArrayD<f64>> {
    let record_len: usize = shape.iter().product();
    let mut values = Vec::with_capacity(records.len() * record_len);
    let count = records.len();

    for record in records {
        let actual = record.array.shape();
        let scalar_record = actual.is_empty() && record_len == 1;
        if actual != shape && !scalar_record {
            return Err(MilkitError::ShapeMismatch {
                path: dir.to_path_buf(),
                key: record.key,
                expected: shape.to_vec(),
                actual: actual.to_vec(),
            });
        }
        values.extend(record.array.iter().copied());
    }

    let stacked_shape: Vec<usize> = std::iter::once(count).chain(shape.iter().copied()).collect();
    Ok(ArrayD::from_shape_vec(stacked_shape, values)?)
}

/// Loader for MIL datasets stored in HDF5 containers.
#[derive(Debug, Clone)]
pub struct MilLoader {
    config: LoaderConfig,
}

impl MilLoader {
    /// Create a loader after validating `config`.
    pub fn new(config: LoaderConfig) -> MilkitResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The loader configuration.
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every data and label record found directly in `path`.
    ///
    /// Containers are visited in file-name order. The records of each container
    /// are ordered by the integer key token at position `split` and appended to
    /// the data or label sequence according to the file's role. Each container
    /// is closed before the next one is opened.
    ///
    /// A directory without matching files yields two empty sequences.
    pub fn load_directory(
        &self,
        path: impl AsRef<Path>,
        split: usize,
    ) -> MilkitResult<LoadedSplit> {
        let dir = path.as_ref();
        info!("Loading dataset directory {} (split {split})", dir.display());

        let mut loaded = LoadedSplit::default();
        for file in scan_directory(dir, &self.config.naming)? {
            let records = read_records(&file.path, split)?;
            let tokens = records.iter().map(|record| record.token).collect();

            match file.role {
                FileRole::Data => loaded.data.extend(records),
                FileRole::Label => loaded.labels.extend(records),
            }
            loaded.files.push(LoadedFile {
                path: file.path,
                role: file.role,
                stem: file.stem,
                tokens,
            });
        }

        let issues = check_alignment(&loaded.files);
        for issue in &issues {
            warn!("Misaligned dataset in {}: {issue}", dir.display());
        }
        if self.config.strict_alignment {
            if let Some(issue) = issues.into_iter().next() {
                return Err(MilkitError::Misaligned {
                    path: dir.to_path_buf(),
                    reason: issue.to_string(),
                });
            }
        }

        info!(
            "Loaded {} data and {} label records from {}",
            loaded.data.len(),
            loaded.labels.len(),
            dir.display()
        );
        Ok(loaded)
    }

    /// Load each source in order and concatenate the results.
    ///
    /// Every record must match the configured record shapes. An empty source
    /// list yields empty arrays of the configured shapes.
    pub fn load_sources(&self, sources: &[DatasetSource]) -> MilkitResult<MergedDataset> {
        let mut merged = MergedDataset::empty(self.config.data_shape, self.config.label_shape);

        for source in sources {
            info!("Iterating over dataset at {}", source.path.display());
            let split = self.load_directory(&source.path, source.split)?;
            merged.append(&source.path, split)?;
            info!(
                "Finished dataset at {} ({} records so far)",
                source.path.display(),
                merged.len()
            );
        }

        Ok(merged)
    }
}

/// Load one directory with `config`.
pub fn load_directory(
    path: impl AsRef<Path>,
    split: usize,
    config: &LoaderConfig,
) -> MilkitResult<LoadedSplit> {
    MilLoader::new(config.clone())?.load_directory(path, split)
}

/// Load and concatenate several directories with `config`.
pub fn load_directories(
    sources: &[DatasetSource],
    config: &LoaderConfig,
) -> MilkitResult<MergedDataset> {
    MilLoader::new(config.clone())?.load_sources(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn record(key: &str, shape: &[usize], fill: f64) -> Record {
        Record {
            key: key.to_owned(),
            token: 0,
            array: ArrayD::from_elem(IxDyn(shape), fill),
        }
    }

    #[test]
    fn test_empty_merged_dataset_shapes() {
        let merged = MergedDataset::empty([3, 64, 64], [1]);

        assert!(merged.is_empty());
        assert_eq!(merged.data.shape(), &[0, 3, 64, 64]);
        assert_eq!(merged.labels.shape(), &[0, 1]);
    }

    #[test]
    fn test_stack_records() {
        let records = vec![record("a_0", &[2, 2], 1.0), record("a_1", &[2, 2], 2.0)];

        let stacked = stack_records(Path::new("dir"), records, &[2, 2]).unwrap();

        assert_eq!(stacked.shape(), &[2, 2, 2]);
        assert_eq!(stacked[&[1, 0, 1][..]], 2.0);
    }

    #[test]
    fn test_stack_accepts_scalar_labels() {
        let records = vec![record("a_0", &[], 1.0), record("a_1", &[1], 0.0)];

        let stacked = stack_records(Path::new("dir"), records, &[1]).unwrap();

        assert_eq!(stacked.shape(), &[2, 1]);
        assert_eq!(stacked.iter().copied().collect::<Vec<_>>(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_stack_rejects_wrong_shape() {
        let records = vec![record("a_0", &[3, 64, 64], 0.0), record("a_1", &[3, 32, 32], 0.0)];

        match stack_records(Path::new("dir"), records, &[3, 64, 64]) {
            Err(MilkitError::ShapeMismatch {
                key,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(key, "a_1");
                assert_eq!(expected, vec![3, 64, 64]);
                assert_eq!(actual, vec![3, 32, 32]);
            }
            other => panic!("Expected ShapeMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn test_append_concatenates() {
        let mut merged = MergedDataset::empty([1, 2, 2], [1]);
        let split = LoadedSplit {
            data: vec![record("x_0", &[1, 2, 2], 0.5)],
            labels: vec![record("y_0", &[1], 1.0)],
            files: Vec::new(),
        };

        merged.append(Path::new("dir"), split.clone()).unwrap();
        merged.append(Path::new("dir"), split).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.label_len(), 2);
        assert_eq!(merged.data.shape(), &[2, 1, 2, 2]);
    }

    #[test]
    fn test_loader_rejects_invalid_config() {
        let config = LoaderConfig::new().with_data_shape([3, 0, 64]);

        assert!(matches!(
            MilLoader::new(config),
            Err(MilkitError::InvalidConfiguration { .. })
        ));
    }
}
