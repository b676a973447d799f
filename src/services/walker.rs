//! Directory walk with exclusion rules, path guarding, and a file ceiling

use crate::models::{FileRecord, ProjectInventory};
use crate::services::guard::PathGuard;
use crate::services::progress::{ProgressThrottler, WalkCounters};
use crate::services::scanner::FileScanner;
use crate::{CancelToken, Error, Result, ScanOptions};
use std::fs::{self, DirEntry};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Name used when the scanned root has no usable basename.
pub const FALLBACK_ROOT_NAME: &str = "Analyzed Project";

/// Build a `/`-separated path of `path` relative to `root`.
///
/// Backslash is a valid filename character on Unix, so separators are joined
/// per component rather than by string replacement.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Basename of the root as given, or [`FALLBACK_ROOT_NAME`].
#[must_use]
pub fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty() && n != ".")
        .unwrap_or_else(|| FALLBACK_ROOT_NAME.to_string())
}

/// Walk state to track results during a directory walk
pub struct TraversalContext {
    pub root: PathBuf,
    pub files: Vec<FileRecord>,
    pub directories: Vec<String>,
    pub counters: WalkCounters,
    throttler: ProgressThrottler,
}

impl TraversalContext {
    #[must_use]
    pub fn new(root: PathBuf, throttler: ProgressThrottler) -> Self {
        Self {
            root,
            files: Vec::new(),
            directories: Vec::new(),
            counters: WalkCounters::default(),
            throttler,
        }
    }

    fn record_file(&mut self, record: FileRecord) {
        self.counters.files_scanned += 1;
        self.counters.lines_scanned += record.line_count;
        self.files.push(record);
    }

    fn record_directory(&mut self, relative: String) {
        self.counters.directories_visited += 1;
        self.directories.push(relative);
    }
}

/// Recursive walker producing a [`ProjectInventory`].
pub struct TreeWalker<'a> {
    guard: &'a PathGuard,
    options: &'a ScanOptions,
    scanner: FileScanner<'a>,
}

impl<'a> TreeWalker<'a> {
    #[must_use]
    pub fn new(guard: &'a PathGuard, options: &'a ScanOptions) -> Self {
        Self {
            guard,
            options,
            scanner: FileScanner::new(guard, options),
        }
    }

    /// Walk `root` and assemble its inventory.
    ///
    /// # Errors
    /// [`Error::InvalidRoot`] when `root` is missing or not a directory,
    /// [`Error::Guard`] when the guard rejects the root itself, and
    /// [`Error::Cancelled`] when the cancel token fires mid-walk.
    pub fn walk(&self, root: &Path) -> Result<ProjectInventory> {
        let metadata = fs::metadata(root).map_err(|e| Error::InvalidRoot {
            path: root.to_path_buf(),
            reason: if e.kind() == std::io::ErrorKind::NotFound {
                "path does not exist".to_string()
            } else {
                e.to_string()
            },
        })?;

        if !metadata.is_dir() {
            return Err(Error::InvalidRoot {
                path: root.to_path_buf(),
                reason: "path is not a directory".to_string(),
            });
        }

        let canonical_root = self.guard.validate(root)?;
        log::info!("Walking {}", canonical_root.display());

        let started = Instant::now();
        let mut context = TraversalContext::new(
            canonical_root.clone(),
            ProgressThrottler::starting_at(self.options.progress_interval, started),
        );

        self.walk_directory(&canonical_root, &mut context)?;

        if let Some(notify) = &self.options.progress_notifier {
            let snapshot = context
                .throttler
                .force_emit(Instant::now(), context.counters);
            notify(&snapshot);
        }

        log::info!(
            "Walked {}: {} files, {} lines, {} directories in {:?}",
            canonical_root.display(),
            context.counters.files_scanned,
            context.counters.lines_scanned,
            context.counters.directories_visited,
            started.elapsed()
        );

        Ok(ProjectInventory::new(
            root_name(root),
            context.files,
            context.directories,
        ))
    }

    fn check_cancelled(&self) -> Result<()> {
        if self
            .options
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
        {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    fn limit_reached(&self, context: &TraversalContext) -> bool {
        context.files.len() >= self.options.max_files
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.options.excluded_dirs.iter().any(|d| d == name)
    }

    fn is_ignored_file(name: &str) -> bool {
        name.starts_with('.') || name.ends_with(".log")
    }

    fn walk_directory(&self, current: &Path, context: &mut TraversalContext) -> Result<()> {
        self.check_cancelled()?;

        let entries = match fs::read_dir(current) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Cannot read directory {}: {e}", current.display());
                return Ok(());
            }
        };

        let mut entries: Vec<DirEntry> = entries
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    log::warn!("Cannot read entry in {}: {e}", current.display());
                    None
                }
            })
            .collect();
        entries.sort_by_key(DirEntry::file_name);

        for entry in entries {
            if self.limit_reached(context) {
                log::debug!("File limit {} reached", self.options.max_files);
                break;
            }
            self.check_cancelled()?;

            let entry_path = entry.path();
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            // DirEntry::file_type does not follow symlinks
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("Cannot stat {}: {e}", entry_path.display());
                    continue;
                }
            };

            if file_type.is_symlink() {
                log::debug!("Skipping symlink {}", entry_path.display());
                continue;
            }

            if file_type.is_dir() {
                if self.is_excluded_dir(&name) {
                    log::trace!("Excluded directory {}", entry_path.display());
                    continue;
                }
                if let Err(e) = self.guard.validate(&entry_path) {
                    log::warn!("Skipping directory {}: {e}", entry_path.display());
                    continue;
                }
                context.record_directory(relative_path(&context.root, &entry_path));
                self.walk_directory(&entry_path, context)?;
            } else if file_type.is_file() {
                if Self::is_ignored_file(&name) {
                    log::trace!("Ignored file {}", entry_path.display());
                    continue;
                }
                let relative = relative_path(&context.root, &entry_path);
                match self
                    .scanner
                    .scan(&entry_path, &relative, self.options.include_structure)
                {
                    Ok(record) => {
                        context.record_file(record);
                        self.report_progress(context);
                    }
                    Err(reason) if reason.is_expected() => {
                        log::debug!("Skipping {relative}: {reason}");
                    }
                    Err(reason) => log::warn!("Skipping {relative}: {reason}"),
                }
            }
        }

        Ok(())
    }

    fn report_progress(&self, context: &mut TraversalContext) {
        let Some(notify) = &self.options.progress_notifier else {
            return;
        };
        if let Some(snapshot) = context.throttler.consider(Instant::now(), context.counters) {
            notify(&snapshot);
        }
    }
}
