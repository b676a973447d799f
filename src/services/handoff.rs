//! Hand-off shapes for the documentation summarizer.
//!
//! The summarizer itself (prompting, model calls, output parsing) lives
//! outside this crate. This module fixes what it receives, what it must
//! return, and the batching and digest helpers it builds prompts from.

use crate::models::{Analysis, FileRecord, Language, ProjectInventory};
use crate::services::aggregate::group_by_language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Files per documentation request.
pub const DEFAULT_BATCH_SIZE: usize = 10;

const TREE_MAX_DIRECTORIES: usize = 20;
const TREE_MAX_FILES_PER_LANGUAGE: usize = 10;

const FALLBACK_SEQUENCE_DIAGRAM: &str = "sequenceDiagram\n    participant User\n    participant System\n    User->>System: Request\n    System-->>User: Response";
const FALLBACK_CLASS_DIAGRAM: &str = "classDiagram\n    class MainClass {\n        +method()\n    }";

/// Documentation produced for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationBundle {
    pub overview: String,
    pub file_docs: BTreeMap<String, String>,
    pub sequence_diagram: Option<String>,
    pub class_diagram: Option<String>,
}

impl DocumentationBundle {
    /// Placeholder used when the sequence diagram cannot be generated.
    #[must_use]
    pub fn fallback_sequence_diagram() -> String {
        FALLBACK_SEQUENCE_DIAGRAM.to_string()
    }

    /// Placeholder used when the class diagram cannot be generated.
    #[must_use]
    pub fn fallback_class_diagram() -> String {
        FALLBACK_CLASS_DIAGRAM.to_string()
    }

    /// Fill missing diagrams with their placeholders.
    #[must_use]
    pub fn with_fallback_diagrams(mut self) -> Self {
        self.sequence_diagram
            .get_or_insert_with(Self::fallback_sequence_diagram);
        self.class_diagram
            .get_or_insert_with(Self::fallback_class_diagram);
        self
    }
}

/// Generates documentation from an [`Analysis`].
pub trait Summarizer {
    type Error: std::error::Error;

    /// Produce overview, per-file docs and diagrams.
    ///
    /// # Errors
    /// Implementation defined.
    fn summarize(&self, analysis: &Analysis) -> Result<DocumentationBundle, Self::Error>;
}

/// A group of same-language files documented in one request.
#[derive(Debug, Clone)]
pub struct LanguageBatch<'a> {
    pub language: Language,
    pub files: Vec<&'a FileRecord>,
}

/// Split the inventory into per-language batches of at most `batch_size`
/// files. Files of unknown language are never documented.
#[must_use]
pub fn language_batches(inventory: &ProjectInventory, batch_size: usize) -> Vec<LanguageBatch<'_>> {
    let batch_size = batch_size.max(1);
    group_by_language(inventory.files())
        .into_iter()
        .filter(|(language, _)| *language != Language::Unknown)
        .flat_map(|(language, files)| {
            files
                .chunks(batch_size)
                .map(|chunk| LanguageBatch {
                    language,
                    files: chunk.to_vec(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// First `limit` files written in object-oriented languages.
#[must_use]
pub fn object_oriented_files(inventory: &ProjectInventory, limit: usize) -> Vec<&FileRecord> {
    inventory
        .files()
        .iter()
        .filter(|f| f.language.is_object_oriented())
        .take(limit)
        .collect()
}

/// Structure digest: the first directories, then files grouped by language.
#[must_use]
pub fn render_file_tree(inventory: &ProjectInventory) -> String {
    let mut out = String::new();

    for directory in inventory.directories().iter().take(TREE_MAX_DIRECTORIES) {
        let _ = writeln!(out, "{directory}/");
    }

    for (language, files) in group_by_language(inventory.files()) {
        let _ = writeln!(out, "\n{} files:", language.as_str().to_uppercase());
        for file in files.iter().take(TREE_MAX_FILES_PER_LANGUAGE) {
            let _ = writeln!(out, "  {} ({} lines)", file.path, file.line_count);
        }
    }

    out
}
