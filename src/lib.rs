//! Repository Inventory Library
//!
//! This library walks a source tree under a path guard, classifies every file by
//! language, extracts classes, functions and imports for Python and JavaScript
//! sources, and aggregates the result into a [`ProjectInventory`] ready to be
//! handed to a documentation summarizer.

pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod services;

pub use config::{CancelToken, GuardConfig, ProgressNotifier, ScanOptions};
pub use models::{
    Analysis, ClassDescriptor, CodeStructureStats, FileRecord, FileStructure, Language,
    ProjectInventory,
};
pub use services::guard::{GuardError, PathGuard};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::result;

/// Custom error type for the library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Source error: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Walk a directory and return its inventory
///
/// # Arguments
/// * `root` - The root directory to scan
/// * `opts` - Scan options
///
/// # Errors
/// Fails with [`Error::InvalidRoot`] when the root is missing or not a
/// directory, [`Error::Guard`] when the root itself is rejected, and
/// [`Error::InvalidConfig`] for inconsistent options. Problems with individual
/// entries never fail the walk.
pub fn scan_inventory<P: AsRef<Path>>(root: P, opts: &ScanOptions) -> Result<ProjectInventory> {
    opts.validate()?;
    let guard = PathGuard::from_config(&opts.guard);
    let walker = services::walker::TreeWalker::new(&guard, opts);
    walker.walk(root.as_ref())
}

/// Walk a directory and derive everything the summarizer consumes.
///
/// # Errors
/// Same as [`scan_inventory`].
pub fn analyze<P: AsRef<Path>>(root: P, opts: &ScanOptions) -> Result<Analysis> {
    let root = root.as_ref();
    let inventory = scan_inventory(root, opts)?;
    Ok(services::stats::build_analysis(
        root.to_string_lossy().to_string(),
        inventory,
    ))
}

/// Analyze several independent roots on the rayon pool.
///
/// Each walk owns its own state; results come back in input order.
pub fn scan_many<P: AsRef<Path> + Sync>(roots: &[P], opts: &ScanOptions) -> Vec<Result<Analysis>> {
    roots.par_iter().map(|root| analyze(root, opts)).collect()
}
