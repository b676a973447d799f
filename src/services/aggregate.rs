//! Ordering and grouping helpers over scanned file records

use crate::models::{FileRecord, Language};

/// Sort records by a specified field
#[derive(Debug, Clone, Copy)]
pub enum SortBy {
    Lines,
    Size,
    Path,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" => Ok(SortBy::Lines),
            "size" => Ok(SortBy::Size),
            "path" => Ok(SortBy::Path),
            _ => Err(format!("unknown sort field '{s}'")),
        }
    }
}

/// Sort and limit records to top K
#[must_use]
pub fn sort_and_limit(
    mut files: Vec<FileRecord>,
    sort_by: SortBy,
    top_k: Option<usize>,
) -> Vec<FileRecord> {
    match sort_by {
        SortBy::Lines => {
            files.sort_by(|a, b| b.line_count.cmp(&a.line_count).then(a.path.cmp(&b.path)));
        }
        SortBy::Size => {
            files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then(a.path.cmp(&b.path)));
        }
        SortBy::Path => {
            files.sort_by(|a, b| a.path.cmp(&b.path));
        }
    }

    if let Some(k) = top_k {
        files.truncate(k);
    }

    files
}

/// Group records by language, keeping first-seen language order and
/// traversal order within each group.
#[must_use]
pub fn group_by_language(files: &[FileRecord]) -> Vec<(Language, Vec<&FileRecord>)> {
    let mut groups: Vec<(Language, Vec<&FileRecord>)> = Vec::new();
    for file in files {
        match groups.iter_mut().find(|(lang, _)| *lang == file.language) {
            Some((_, members)) => members.push(file),
            None => groups.push((file.language, vec![file])),
        }
    }
    groups
}
