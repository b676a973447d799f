//! Extension-to-language classification

use crate::models::Language;
use std::path::Path;

const LANGUAGE_TABLE: &[(&str, Language)] = &[
    (".py", Language::Python),
    (".js", Language::JavaScript),
    (".jsx", Language::JavaScript),
    (".mjs", Language::JavaScript),
    (".cjs", Language::JavaScript),
    (".ts", Language::TypeScript),
    (".tsx", Language::TypeScript),
    (".java", Language::Java),
    (".cpp", Language::Cpp),
    (".hpp", Language::Cpp),
    (".c", Language::C),
    (".h", Language::C),
    (".cs", Language::CSharp),
    (".go", Language::Go),
    (".rb", Language::Ruby),
    (".php", Language::Php),
    (".swift", Language::Swift),
    (".kt", Language::Kotlin),
    (".rs", Language::Rust),
    (".scala", Language::Scala),
    (".r", Language::R),
    (".m", Language::ObjectiveC),
    (".pl", Language::Perl),
    (".sh", Language::Bash),
    (".yaml", Language::Yaml),
    (".yml", Language::Yaml),
    (".json", Language::Json),
    (".xml", Language::Xml),
    (".html", Language::Html),
    (".css", Language::Css),
    (".scss", Language::Scss),
    (".sass", Language::Sass),
    (".sql", Language::Sql),
    (".md", Language::Markdown),
    (".txt", Language::Text),
];

/// Map a dotted, lower-cased extension to its language tag.
///
/// Unmapped and empty extensions yield [`Language::Unknown`].
#[must_use]
pub fn classify(extension: &str) -> Language {
    LANGUAGE_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(Language::Unknown, |(_, lang)| *lang)
}

/// Lower-cased suffix of the final path component, including the dot.
///
/// Returns an empty string when the name has no extension (including
/// dot-files such as `.bashrc`).
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_ascii_lowercase()))
        .unwrap_or_default()
}

