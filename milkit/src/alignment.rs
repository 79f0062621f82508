//! Pairing checks between the data files and label files of one directory.
//!
//! Records are appended per role in directory order and sorted per file, so a
//! data record and a label record only describe the same example when both
//! files list the same stems in the same order with the same key tokens.

use std::path::PathBuf;

use thiserror::Error;

use crate::container::FileRole;

/// Summary of one container after it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// Full path of the container.
    pub path: PathBuf,
    /// Whether the container held data or labels.
    pub role: FileRole,
    /// File name without its role suffix.
    pub stem: String,
    /// Key tokens of the loaded records, in load order.
    pub tokens: Vec<i64>,
}

/// A way in which data records and label records fail to line up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentIssue {
    #[error("data file {stem:?} has no matching label file")]
    MissingLabels { stem: String },

    #[error("label file {stem:?} has no matching data file")]
    MissingData { stem: String },

    #[error("data files are loaded in order {data_order:?} but label files in order {label_order:?}")]
    OrderMismatch {
        data_order: Vec<String>,
        label_order: Vec<String>,
    },

    #[error("{stem:?} holds {data_records} data records but {label_records} label records")]
    RecordCountMismatch {
        stem: String,
        data_records: usize,
        label_records: usize,
    },

    #[error("{stem:?} data and label keys carry different tokens from record {position} on")]
    TokenMismatch { stem: String, position: usize },
}

/// Compare every data file with the label file of the same stem.
pub fn check_alignment(files: &[LoadedFile]) -> Vec<AlignmentIssue> {
    let data: Vec<&LoadedFile> = files.iter().filter(|f| f.role == FileRole::Data).collect();
    let labels: Vec<&LoadedFile> = files.iter().filter(|f| f.role == FileRole::Label).collect();
    let partner = |stem: &str, candidates: &[&LoadedFile]| {
        candidates.iter().any(|candidate| candidate.stem == stem)
    };

    let mut issues = Vec::new();
    for file in &data {
        if !partner(&file.stem, &labels) {
            issues.push(AlignmentIssue::MissingLabels {
                stem: file.stem.clone(),
            });
        }
    }
    for file in &labels {
        if !partner(&file.stem, &data) {
            issues.push(AlignmentIssue::MissingData {
                stem: file.stem.clone(),
            });
        }
    }

    let paired_order = |files: &[&LoadedFile], others: &[&LoadedFile]| -> Vec<String> {
        files
            .iter()
            .filter(|file| partner(&file.stem, others))
            .map(|file| file.stem.clone())
            .collect()
    };
    let data_order = paired_order(&data, &labels);
    let label_order = paired_order(&labels, &data);
    if data_order != label_order {
        issues.push(AlignmentIssue::OrderMismatch {
            data_order,
            label_order,
        });
    }

    for data_file in &data {
        let Some(label_file) = labels.iter().find(|label| label.stem == data_file.stem) else {
            continue;
        };

        if data_file.tokens.len() != label_file.tokens.len() {
            issues.push(AlignmentIssue::RecordCountMismatch {
                stem: data_file.stem.clone(),
                data_records: data_file.tokens.len(),
                label_records: label_file.tokens.len(),
            });
        } else if let Some(position) = data_file
            .tokens
            .iter()
            .zip(&label_file.tokens)
            .position(|(data_token, label_token)| data_token != label_token)
        {
            issues.push(AlignmentIssue::TokenMismatch {
                stem: data_file.stem.clone(),
                position,
            });
        }
    }

    issues
}
