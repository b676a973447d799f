//! Path guard: canonical containment checks against allow and deny roots
//!
//! Every path handed to the guard is canonicalized first, so a symlink that
//! points out of an allowed root is judged by its target. Containment is a
//! component-wise comparison (`Path::starts_with`), which keeps `/home2` out of
//! an allow root of `/home`.

use crate::config::GuardConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static START_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Record the working directory the process started in.
///
/// Binaries call this before anything can change the working directory;
/// library users that never call it get the directory at first guard build.
pub fn capture_start_dir() {
    let _ = START_DIR.get_or_init(|| std::env::current_dir().ok());
}

fn start_dir() -> Option<&'static Path> {
    START_DIR
        .get_or_init(|| std::env::current_dir().ok())
        .as_deref()
}

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("Access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("Cannot resolve {}: {source}", path.display())]
    Resolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Validates that candidate paths are safe to read.
#[derive(Debug, Clone)]
pub struct PathGuard {
    allow_roots: Vec<PathBuf>,
    deny_roots: Vec<PathBuf>,
}

impl PathGuard {
    /// Build a guard from configuration, canonicalizing every root.
    ///
    /// Allow roots that do not exist are dropped (nothing can live under
    /// them); deny roots that cannot be canonicalized are kept verbatim.
    #[must_use]
    pub fn from_config(config: &GuardConfig) -> Self {
        let mut allow: Vec<PathBuf> = Vec::new();
        if let Some(workspace) = &config.workspace_root {
            allow.push(workspace.clone());
        }
        allow.extend(config.allow_roots.iter().cloned());
        if config.allow_home
            && let Some(home) = home_dir()
        {
            allow.push(home);
        }
        if config.allow_temp {
            allow.push(std::env::temp_dir());
        }
        if config.allow_cwd
            && let Some(cwd) = start_dir()
        {
            allow.push(cwd.to_path_buf());
        }

        let allow_roots = allow
            .into_iter()
            .filter_map(|root| match root.canonicalize() {
                Ok(canonical) => Some(canonical),
                Err(e) => {
                    log::debug!("Dropping allow root {}: {e}", root.display());
                    None
                }
            })
            .collect();

        let deny_roots = config
            .deny_roots
            .iter()
            .map(|root| root.canonicalize().unwrap_or_else(|_| root.clone()))
            .collect();

        Self::new(allow_roots, deny_roots)
    }

    /// Build a guard from already canonical roots.
    #[must_use]
    pub fn new(allow_roots: Vec<PathBuf>, deny_roots: Vec<PathBuf>) -> Self {
        let mut guard = Self {
            allow_roots,
            deny_roots,
        };
        guard.allow_roots.sort();
        guard.allow_roots.dedup();
        guard
    }

    #[must_use]
    pub fn allow_roots(&self) -> &[PathBuf] {
        &self.allow_roots
    }

    #[must_use]
    pub fn deny_roots(&self) -> &[PathBuf] {
        &self.deny_roots
    }

    /// Resolve `candidate` and check it against the allow and deny roots.
    ///
    /// # Errors
    /// [`GuardError::Resolution`] when the path cannot be canonicalized,
    /// [`GuardError::AccessDenied`] when it falls outside every allow root or
    /// inside any deny root. Deny wins over allow.
    pub fn validate(&self, candidate: &Path) -> Result<PathBuf, GuardError> {
        let canonical = candidate
            .canonicalize()
            .map_err(|source| GuardError::Resolution {
                path: candidate.to_path_buf(),
                source,
            })?;

        if !self.allow_roots.iter().any(|root| is_contained(&canonical, root)) {
            log::trace!("{} is outside every allow root", canonical.display());
            return Err(GuardError::AccessDenied { path: canonical });
        }

        if self.deny_roots.iter().any(|root| is_contained(&canonical, root)) {
            log::trace!("{} is inside a deny root", canonical.display());
            return Err(GuardError::AccessDenied { path: canonical });
        }

        Ok(canonical)
    }
}

/// True when `path` equals `root` or lies below it, compared by component.
#[must_use]
pub fn is_contained(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    let var = "USERPROFILE";
    #[cfg(not(windows))]
    let var = "HOME";

    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
