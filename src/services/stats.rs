//! Aggregate structure statistics over an inventory

use crate::models::{Analysis, CodeStructureStats, Language, ProjectInventory};
use std::collections::BTreeSet;

/// Count classes, methods, top-level functions and imports across every file
/// that carries an extraction result.
#[must_use]
pub fn structure_stats(inventory: &ProjectInventory) -> CodeStructureStats {
    inventory
        .files()
        .iter()
        .filter_map(|f| f.structure.as_ref())
        .fold(CodeStructureStats::default(), |mut stats, s| {
            stats.files_with_structure += 1;
            stats.class_count += s.classes.len();
            stats.method_count += s.method_count();
            stats.function_count += s.functions.len();
            stats.import_count += s.imports.len();
            stats
        })
}

/// Distinct languages observed, sorted by tag, without `unknown`.
#[must_use]
pub fn technologies(inventory: &ProjectInventory) -> Vec<Language> {
    let mut languages: Vec<Language> = inventory
        .files()
        .iter()
        .map(|f| f.language)
        .filter(|l| *l != Language::Unknown)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    languages.sort_by_key(Language::as_str);
    languages
}

#[must_use]
pub fn build_analysis(source: String, inventory: ProjectInventory) -> Analysis {
    let stats = structure_stats(&inventory);
    let technologies = technologies(&inventory);
    Analysis {
        source,
        inventory,
        stats,
        technologies,
    }
}
