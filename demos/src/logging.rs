//! Tracing subscriber shared by the demo binaries.

use anyhow::{Context, Result};
use time::{
    format_description::{BorrowedFormatItem, FormatItem},
    macros::format_description,
    UtcOffset,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Install a stdout subscriber filtered by `RUST_LOG`, `info` by default.
pub fn init() -> Result<()> {
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_timer(build_timer()).with_target(false));

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install global tracing subscriber")
}

fn build_timer() -> fmt::time::OffsetTime<BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
