//! Source materialization: local directories and temporary git checkouts
//!
//! A remote source is cloned into a [`TempDir`] owned by the returned
//! [`Materialized`] value, so the checkout disappears on every exit path once
//! that value is dropped.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const GITHUB_PREFIXES: &[&str] = &["https://github.com/", "https://www.github.com/"];

/// Where a repository comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    Local(PathBuf),
    Remote(String),
}

impl SourceLocator {
    /// Classify a user-supplied locator.
    ///
    /// # Errors
    /// Fails for an empty locator or a GitHub URL without an owner and name.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Source("source cannot be empty".to_string()));
        }

        if GITHUB_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            if repository_name(trimmed).is_none() {
                return Err(Error::Source(format!(
                    "cannot determine repository name from '{trimmed}'"
                )));
            }
            return Ok(SourceLocator::Remote(trimmed.to_string()));
        }

        Ok(SourceLocator::Local(PathBuf::from(trimmed)))
    }
}

impl std::fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocator::Local(path) => write!(f, "{}", path.display()),
            SourceLocator::Remote(url) => f.write_str(url),
        }
    }
}

/// Last path segment of a repository URL, without a `.git` suffix.
#[must_use]
pub fn repository_name(url: &str) -> Option<&str> {
    let rest = GITHUB_PREFIXES
        .iter()
        .find_map(|p| url.strip_prefix(p))
        .unwrap_or(url);
    let mut segments = rest.trim_end_matches('/').split('/');
    let _owner = segments.next().filter(|s| !s.is_empty())?;
    let name = segments.next()?.trim_end_matches(".git");
    (!name.is_empty()).then_some(name)
}

/// A local directory ready to be walked.
#[derive(Debug)]
pub struct Materialized {
    locator: String,
    root: PathBuf,
    checkout: Option<TempDir>,
}

impl Materialized {
    #[must_use]
    pub fn local(locator: String, root: PathBuf) -> Self {
        Self {
            locator,
            root,
            checkout: None,
        }
    }

    /// A source living somewhere below `checkout`, removed with it.
    #[must_use]
    pub fn checkout(locator: String, checkout: TempDir, root: PathBuf) -> Self {
        Self {
            locator,
            root,
            checkout: Some(checkout),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.checkout.is_some()
    }
}

/// Yields a local directory for a locator.
pub trait SourceProvider {
    /// Materialize `locator` as a local directory.
    ///
    /// # Errors
    /// Fails when the source cannot be made available locally.
    fn materialize(&self, locator: &SourceLocator) -> Result<Materialized>;
}

/// Serves local paths as they are.
#[derive(Debug, Default)]
pub struct LocalSourceProvider;

impl SourceProvider for LocalSourceProvider {
    fn materialize(&self, locator: &SourceLocator) -> Result<Materialized> {
        let SourceLocator::Local(path) = locator else {
            return Err(Error::Source(format!("'{locator}' is not a local path")));
        };

        if !path.exists() {
            return Err(Error::InvalidRoot {
                path: path.clone(),
                reason: "path does not exist".to_string(),
            });
        }
        if !path.is_dir() {
            return Err(Error::InvalidRoot {
                path: path.clone(),
                reason: "path is not a directory".to_string(),
            });
        }

        Ok(Materialized::local(locator.to_string(), path.clone()))
    }
}

/// Shallow-clones remote repositories with the `git` binary.
#[derive(Debug)]
pub struct GitSourceProvider {
    git: PathBuf,
    depth: Option<u32>,
}

impl Default for GitSourceProvider {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            depth: Some(1),
        }
    }
}

impl GitSourceProvider {
    #[must_use]
    pub fn with_git(git: PathBuf, depth: Option<u32>) -> Self {
        Self { git, depth }
    }
}

impl SourceProvider for GitSourceProvider {
    fn materialize(&self, locator: &SourceLocator) -> Result<Materialized> {
        let SourceLocator::Remote(url) = locator else {
            return Err(Error::Source(format!("'{locator}' is not a remote URL")));
        };
        let name = repository_name(url)
            .ok_or_else(|| Error::Source(format!("cannot determine repository name from '{url}'")))?;

        let checkout = tempfile::Builder::new().prefix("reposcope-").tempdir()?;
        let target = checkout.path().join(name);

        let mut cmd = Command::new(&self.git);
        cmd.arg("clone").arg("--quiet");
        if let Some(depth) = self.depth {
            cmd.arg("--depth").arg(depth.to_string());
        }
        cmd.arg(url).arg(&target).env("GIT_TERMINAL_PROMPT", "0");

        log::info!("Cloning {url} into {}", target.display());
        let output = cmd
            .output()
            .map_err(|e| Error::Source(format!("failed to execute git clone: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Source(format!(
                "failed to clone {url}: {}",
                stderr.trim()
            )));
        }

        Ok(Materialized::checkout(url.clone(), checkout, target))
    }
}

/// Materialize any locator with the default providers.
///
/// # Errors
/// Propagates the provider error for the locator's kind.
pub fn materialize(locator: &SourceLocator) -> Result<Materialized> {
    match locator {
        SourceLocator::Local(_) => LocalSourceProvider.materialize(locator),
        SourceLocator::Remote(_) => GitSourceProvider::default().materialize(locator),
    }
}
