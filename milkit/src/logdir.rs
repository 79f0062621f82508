//! Timestamped run directories for training logs.
//!
//! Each training run gets its own directory below a common root, named after
//! the moment it started, e.g. `logs/run-2024-03-01_14:05:09`.

use std::path::{Path, PathBuf};

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};
use tracing::debug;

use crate::error::MilkitResult;

const RUN_NAME_FORMAT: &[FormatItem<'static>] =
    format_description!("run-[year]-[month]-[day]_[hour]:[minute]:[second]");

/// Build the log directory of a run starting now.
///
/// Local time is used when the local offset can be determined, UTC otherwise.
/// The directory is not created.
pub fn run_logdir(root: impl AsRef<Path>) -> MilkitResult<PathBuf> {
    run_logdir_at(root, now_local_or_utc())
}

/// Build the log directory of a run starting at `started`.
pub fn run_logdir_at(root: impl AsRef<Path>, started: OffsetDateTime) -> MilkitResult<PathBuf> {
    let run_id = started.format(RUN_NAME_FORMAT)?;
    let logdir = root.as_ref().join(run_id);
    debug!("Run log directory: {}", logdir.display());
    Ok(logdir)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
