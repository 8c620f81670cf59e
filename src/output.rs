//! Rendering of derived views.
//!
//! Supports pretty-printing, JSON serialization, and CSV tables.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use csv::WriterBuilder;

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty(view: &impl Debug) {
    debug!("{:#?}", view);
}

/// Logs a view as pretty-printed JSON.
pub fn print_json(view: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes a view to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: impl AsRef<Path>, view: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, view)?;
    info!(path = %path.display(), "Wrote JSON view");
    Ok(())
}

/// Writes flat rows to `path` as a headered CSV, replacing any existing file.
pub fn write_table<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file =
        File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
