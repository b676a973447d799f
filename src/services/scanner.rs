//! Single-file scanning: filters, text decoding, and structural extraction

use crate::ScanOptions;
use crate::models::FileRecord;
use crate::services::extract::{self, render_summary};
use crate::services::guard::{GuardError, PathGuard};
use crate::services::language::{classify, extension_of};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Why a file produced no record
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("binary extension {0}")]
    BinaryExtension(String),

    #[error("{size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("not a regular file")]
    NotAFile,

    #[error(transparent)]
    Denied(#[from] GuardError),

    #[error("unreadable: {0}")]
    Unreadable(#[from] io::Error),
}

impl SkipReason {
    /// Drops that are plain filtering rather than a problem worth a warning.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, SkipReason::BinaryExtension(_) | SkipReason::NotAFile)
    }
}

/// Number of lines in `text`, treating `\n`, `\r\n` and a lone `\r` as line
/// breaks. A final line without a terminator still counts.
#[must_use]
pub fn count_lines(text: &str) -> u64 {
    let bytes = text.as_bytes();
    let mut lines = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => lines += 1,
            b'\r' => {
                lines += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    if !matches!(bytes.last(), None | Some(b'\n' | b'\r')) {
        lines += 1;
    }
    lines
}

/// Turns one file into a [`FileRecord`].
#[derive(Debug)]
pub struct FileScanner<'a> {
    guard: &'a PathGuard,
    max_file_size: u64,
    binary_extensions: Vec<String>,
}

impl<'a> FileScanner<'a> {
    #[must_use]
    pub fn new(guard: &'a PathGuard, opts: &ScanOptions) -> Self {
        Self {
            guard,
            max_file_size: opts.max_file_size,
            binary_extensions: opts.normalized_binary_extensions(),
        }
    }

    fn is_binary(&self, extension: &str) -> bool {
        self.binary_extensions.iter().any(|b| b == extension)
    }

    /// Scan one file.
    ///
    /// # Errors
    /// Returns the [`SkipReason`] when the file must not appear in the
    /// inventory. Extraction failures are not skips: the record is produced
    /// without a structural summary.
    pub fn scan(
        &self,
        absolute: &Path,
        relative: &str,
        include_structure: bool,
    ) -> Result<FileRecord, SkipReason> {
        let extension = extension_of(absolute);
        if self.is_binary(&extension) {
            return Err(SkipReason::BinaryExtension(extension));
        }

        let canonical = self.guard.validate(absolute)?;

        let metadata = std::fs::metadata(&canonical)?;
        if !metadata.is_file() {
            return Err(SkipReason::NotAFile);
        }
        if metadata.len() > self.max_file_size {
            return Err(SkipReason::TooLarge {
                size: metadata.len(),
                limit: self.max_file_size,
            });
        }

        let language = classify(&extension);

        // Bounded read: the file may have grown since it was stat'ed.
        let mut bytes = Vec::new();
        File::open(&canonical)?
            .take(self.max_file_size.saturating_add(1))
            .read_to_end(&mut bytes)?;
        let size_bytes = bytes.len() as u64;
        if size_bytes > self.max_file_size {
            return Err(SkipReason::TooLarge {
                size: size_bytes,
                limit: self.max_file_size,
            });
        }

        let text = String::from_utf8_lossy(&bytes);
        let line_count = count_lines(&text);

        let mut structure = None;
        let mut structural_summary = None;
        if include_structure {
            match extract::extract(&text, language) {
                Ok(Some(found)) => {
                    structural_summary = Some(render_summary(language, &found));
                    structure = Some(found);
                }
                Ok(None) => {}
                Err(e) => log::warn!("No structural summary for {relative}: {e}"),
            }
        }

        log::trace!("Scanned {relative} ({language}, {size_bytes} bytes, {line_count} lines)");

        Ok(FileRecord {
            path: relative.to_string(),
            extension,
            size_bytes,
            line_count,
            language,
            structural_summary,
            structure,
        })
    }
}
