//! Scan configuration: limits, exclusion sets, and path guard roots

use crate::models::ProgressSnapshot;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Files larger than this are never recorded.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

pub const DEFAULT_MAX_FILES: usize = 1000;

/// Environment variable naming the declared workspace root.
pub const WORKSPACE_ENV: &str = "REPOSCOPE_WORKSPACE";

/// Directory names never descended into (hidden names are excluded separately).
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "venv",
    "env",
    "build",
    "dist",
    "target",
    ".git",
    ".svn",
    ".hg",
    ".idea",
    ".vscode",
];

pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    ".exe", ".dll", ".so", ".dylib", ".a", ".lib", ".jpg", ".jpeg", ".png", ".gif", ".bmp",
    ".ico", ".svg", ".mp3", ".mp4", ".avi", ".mov", ".wav", ".pdf", ".zip", ".tar", ".gz",
    ".rar", ".7z", ".pyc", ".pyo", ".class", ".o", ".obj",
];

#[cfg(unix)]
pub const DEFAULT_DENY_ROOTS: &[&str] = &[
    "/etc",
    "/proc",
    "/sys",
    "/dev",
    "/root",
    "/bin",
    "/sbin",
    "/usr/bin",
    "/usr/sbin",
    "/usr/local/bin",
    "/var/log",
    "/boot",
];

#[cfg(windows)]
pub const DEFAULT_DENY_ROOTS: &[&str] = &[
    r"C:\Windows",
    r"C:\Program Files",
    r"C:\Program Files (x86)",
];

#[cfg(not(any(unix, windows)))]
pub const DEFAULT_DENY_ROOTS: &[&str] = &[];

/// Callback receiving throttled progress snapshots.
pub type ProgressNotifier = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Cooperative cancellation flag shared between a walk and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Allow and deny roots for the path guard
#[derive(Debug, Clone)]
pub struct GuardConfig {
    pub workspace_root: Option<PathBuf>,
    pub allow_roots: Vec<PathBuf>,
    pub deny_roots: Vec<PathBuf>,
    pub allow_home: bool,
    pub allow_temp: bool,
    pub allow_cwd: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            workspace_root: std::env::var_os(WORKSPACE_ENV).map(PathBuf::from),
            allow_roots: Vec::new(),
            deny_roots: DEFAULT_DENY_ROOTS.iter().map(PathBuf::from).collect(),
            allow_home: true,
            allow_temp: true,
            allow_cwd: true,
        }
    }
}

impl GuardConfig {
    /// A guard that only admits the given roots and denies nothing.
    #[must_use]
    pub fn only(allow_roots: Vec<PathBuf>) -> Self {
        Self {
            workspace_root: None,
            allow_roots,
            deny_roots: Vec::new(),
            allow_home: false,
            allow_temp: false,
            allow_cwd: false,
        }
    }
}

/// Options for scanning a directory
#[derive(Clone)]
pub struct ScanOptions {
    pub max_files: usize,
    pub include_structure: bool,
    pub max_file_size: u64,
    pub excluded_dirs: Vec<String>,
    pub binary_extensions: Vec<String>,
    pub guard: GuardConfig,
    pub progress_interval: Duration,
    pub progress_notifier: Option<ProgressNotifier>,
    pub cancel: Option<CancelToken>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            include_structure: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(ToString::to_string).collect(),
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            guard: GuardConfig::default(),
            progress_interval: Duration::from_secs(2),
            progress_notifier: None,
            cancel: None,
        }
    }
}

impl std::fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOptions")
            .field("max_files", &self.max_files)
            .field("include_structure", &self.include_structure)
            .field("max_file_size", &self.max_file_size)
            .field("excluded_dirs", &self.excluded_dirs)
            .field("binary_extensions", &self.binary_extensions)
            .field("guard", &self.guard)
            .field("progress_interval", &self.progress_interval)
            .field("progress_notifier", &self.progress_notifier.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

/// On-disk overrides; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub max_files: Option<usize>,
    pub include_structure: Option<bool>,
    pub max_file_size: Option<u64>,
    pub excluded_dirs: Option<Vec<String>>,
    pub extra_excluded_dirs: Vec<String>,
    pub binary_extensions: Option<Vec<String>>,
    pub workspace_root: Option<PathBuf>,
    pub allow_roots: Vec<PathBuf>,
    pub deny_roots: Option<Vec<PathBuf>>,
    pub allow_home: Option<bool>,
    pub allow_temp: Option<bool>,
    pub allow_cwd: Option<bool>,
}

impl ScanOptions {
    /// Merge overrides from a JSON config file.
    ///
    /// # Errors
    /// Fails when the file cannot be read or is not a valid config document.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&text)?;
        self.apply(file);
        Ok(())
    }

    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(v) = file.max_files {
            self.max_files = v;
        }
        if let Some(v) = file.include_structure {
            self.include_structure = v;
        }
        if let Some(v) = file.max_file_size {
            self.max_file_size = v;
        }
        if let Some(v) = file.excluded_dirs {
            self.excluded_dirs = v;
        }
        self.excluded_dirs.extend(file.extra_excluded_dirs);
        if let Some(v) = file.binary_extensions {
            self.binary_extensions = v;
        }
        if file.workspace_root.is_some() {
            self.guard.workspace_root = file.workspace_root;
        }
        self.guard.allow_roots.extend(file.allow_roots);
        if let Some(v) = file.deny_roots {
            self.guard.deny_roots = v;
        }
        if let Some(v) = file.allow_home {
            self.guard.allow_home = v;
        }
        if let Some(v) = file.allow_temp {
            self.guard.allow_temp = v;
        }
        if let Some(v) = file.allow_cwd {
            self.guard.allow_cwd = v;
        }
    }

    /// Check the options for values no walk could honour.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            return Err(Error::InvalidConfig(
                "max_file_size must be greater than zero".to_string(),
            ));
        }
        if let Some(name) = self
            .excluded_dirs
            .iter()
            .find(|d| d.is_empty() || d.contains(['/', '\\']))
        {
            return Err(Error::InvalidConfig(format!(
                "excluded directory '{name}' must be a plain directory name"
            )));
        }
        if self
            .binary_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(Error::InvalidConfig(
                "binary extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Binary extensions lower-cased with a leading dot.
    #[must_use]
    pub fn normalized_binary_extensions(&self) -> Vec<String> {
        self.binary_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect()
    }
}

/// Lower-case an extension and make sure it starts with a dot.
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_ascii_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
