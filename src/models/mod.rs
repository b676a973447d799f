//! Data models for scanned files, project inventories, and structure statistics

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Language tag assigned to a file from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
    C,
    CSharp,
    Go,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Rust,
    Scala,
    R,
    #[serde(rename = "objective-c")]
    ObjectiveC,
    Perl,
    Bash,
    Yaml,
    Json,
    Xml,
    Html,
    Css,
    Scss,
    Sass,
    Sql,
    Markdown,
    Text,
    Unknown,
}

impl Language {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Rust => "rust",
            Language::Scala => "scala",
            Language::R => "r",
            Language::ObjectiveC => "objective-c",
            Language::Perl => "perl",
            Language::Bash => "bash",
            Language::Yaml => "yaml",
            Language::Json => "json",
            Language::Xml => "xml",
            Language::Html => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Sass => "sass",
            Language::Sql => "sql",
            Language::Markdown => "markdown",
            Language::Text => "text",
            Language::Unknown => "unknown",
        }
    }

    /// Languages with a parse grammar for structural extraction.
    #[must_use]
    pub fn supports_structure(&self) -> bool {
        matches!(self, Language::Python | Language::JavaScript)
    }

    /// Languages whose files feed the class diagram.
    #[must_use]
    pub fn is_object_oriented(&self) -> bool {
        matches!(
            self,
            Language::Python
                | Language::Java
                | Language::JavaScript
                | Language::TypeScript
                | Language::Cpp
                | Language::CSharp
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class found by structural extraction, with its direct methods in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub methods: Vec<String>,
}

/// Syntax-derived inventory of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    pub classes: Vec<ClassDescriptor>,
    pub functions: Vec<String>,
    pub imports: Vec<String>,
}

impl FileStructure {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.imports.is_empty()
    }

    #[must_use]
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

/// One scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, `/`-separated
    pub path: String,
    /// Lower-cased suffix including the dot, or empty
    pub extension: String,
    pub size_bytes: u64,
    pub line_count: u64,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<FileStructure>,
}

/// Result of one directory walk.
///
/// The totals are derived from `files` on every call, so they cannot drift
/// from the record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInventory {
    root_name: String,
    files: Vec<FileRecord>,
    directories: Vec<String>,
}

impl ProjectInventory {
    #[must_use]
    pub fn new(root_name: String, files: Vec<FileRecord>, directories: Vec<String>) -> Self {
        Self {
            root_name,
            files,
            directories,
        }
    }

    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    #[must_use]
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    #[must_use]
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn total_lines(&self) -> u64 {
        self.files.iter().map(|f| f.line_count).sum()
    }
}

impl Serialize for ProjectInventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProjectInventory", 5)?;
        state.serialize_field("root_name", &self.root_name)?;
        state.serialize_field("files", &self.files)?;
        state.serialize_field("directories", &self.directories)?;
        state.serialize_field("total_files", &self.total_files())?;
        state.serialize_field("total_lines", &self.total_lines())?;
        state.end()
    }
}

/// Aggregate structure counts across every file with an extraction result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStructureStats {
    pub files_with_structure: usize,
    pub class_count: usize,
    pub method_count: usize,
    pub function_count: usize,
    pub import_count: usize,
}

/// Everything handed to the documentation summarizer for one source.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub source: String,
    pub inventory: ProjectInventory,
    pub stats: CodeStructureStats,
    pub technologies: Vec<Language>,
}

/// Progress snapshot emitted while a walk is running
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub timestamp_ms: u64,
    pub files_scanned: u64,
    pub lines_scanned: u64,
    pub directories_visited: u64,
    pub completion_ratio: Option<f32>,
}
