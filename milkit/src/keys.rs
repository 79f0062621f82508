//! Record key ordering.
//!
//! Record keys are underscore-delimited, e.g. `bag_3_instance_12`. One token
//! position holds an integer that orders the records numerically instead of
//! lexically (`2` before `10`).

use std::path::Path;

use crate::error::{MilkitError, MilkitResult};

/// A record key together with its parsed ordering token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    /// The full key as stored in the container.
    pub key: String,
    /// The integer at the split position.
    pub token: i64,
}

/// Parse the integer token at position `split` of `key`.
///
/// `path` only serves error reporting.
pub fn key_token(path: &Path, key: &str, split: usize) -> MilkitResult<i64> {
    let malformed = |reason: String| MilkitError::MalformedKey {
        path: path.to_path_buf(),
        key: key.to_owned(),
        split,
        reason,
    };

    let token = key.split('_').nth(split).ok_or_else(|| {
        malformed(format!(
            "key has only {} underscore-delimited tokens",
            key.split('_').count()
        ))
    })?;

    token
        .trim()
        .parse::<i64>()
        .map_err(|e| malformed(format!("token {token:?} is not an integer: {e}")))
}

/// Sort keys by their integer token at position `split`.
///
/// Every key is parsed before sorting, so a single malformed key fails the
/// whole call. Keys with equal tokens keep their input order.
pub fn sort_keys(path: &Path, keys: Vec<String>, split: usize) -> MilkitResult<Vec<RecordKey>> {
    let mut sorted = keys
        .into_iter()
        .map(|key| {
            let token = key_token(path, &key, split)?;
            Ok(RecordKey { key, token })
        })
        .collect::<MilkitResult<Vec<_>>>()?;

    sorted.sort_by_key(|record| record.token);
    Ok(sorted)
}
