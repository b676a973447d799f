//! JSON report output
//!
//! A report is the serialized [`Analysis`]: source, inventory (with derived
//! totals), structure statistics and technologies.

use crate::Result;
use crate::models::Analysis;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a report to a JSON file, creating parent directories.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_report(path: &Path, analysis: &Analysis) -> Result<()> {
    write_json(path, analysis)
}

/// Write several reports as one JSON array; a single report is written as a
/// plain object.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_reports(path: &Path, analyses: &[Analysis]) -> Result<()> {
    match analyses {
        [single] => write_json(path, single),
        many => write_json(path, many),
    }
}

fn write_json(path: &Path, value: &(impl Serialize + ?Sized)) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
