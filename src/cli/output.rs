//! Output formatting for CLI

use crate::models::{Analysis, FileRecord};
use crate::services::aggregate::{SortBy, sort_and_limit};
use crate::services::format::{format_count, format_size};
use crate::services::handoff::{DEFAULT_BATCH_SIZE, language_batches};

/// Get ANSI color code based on share of total lines
fn get_color_for_percentage(pct: f64) -> &'static str {
    if pct >= 30.0 {
        "\x1b[31m" // Red for >= 30%
    } else if pct >= 15.0 {
        "\x1b[33m" // Yellow for >= 15%
    } else if pct >= 5.0 {
        "\x1b[36m" // Cyan for >= 5%
    } else {
        "\x1b[90m" // Gray for < 5%
    }
}

/// Reset ANSI color
const COLOR_RESET: &str = "\x1b[0m";

/// Print an analysis as human-readable text
#[allow(clippy::cast_precision_loss)]
pub fn format_text(analysis: &Analysis, sort_by: SortBy, top: usize) {
    let inventory = &analysis.inventory;
    let total_lines = inventory.total_lines();

    println!("{} ({})", inventory.root_name(), analysis.source);
    println!(
        "  {} files, {} lines, {} directories",
        format_count(inventory.total_files() as u64),
        format_count(total_lines),
        format_count(inventory.directories().len() as u64)
    );

    if !analysis.technologies.is_empty() {
        let names: Vec<&str> = analysis.technologies.iter().map(|l| l.as_str()).collect();
        println!("  Technologies: {}", names.join(", "));
    }

    let stats = &analysis.stats;
    if stats.files_with_structure > 0 {
        println!(
            "  Structure: {} classes, {} methods, {} functions, {} imports across {} files",
            stats.class_count,
            stats.method_count,
            stats.function_count,
            stats.import_count,
            stats.files_with_structure
        );
    }

    let batches = language_batches(inventory, DEFAULT_BATCH_SIZE);
    println!("  Documentation batches: {}", batches.len());

    if inventory.files().is_empty() {
        println!();
        println!("No files found.");
        return;
    }

    let top_files = sort_and_limit(inventory.files().to_vec(), sort_by, Some(top));

    println!();
    println!("{:<60} {:>12} {:>8} {:>10} {:>6}", "Path", "Language", "Lines", "Size", "%");
    println!("{}", "─".repeat(100));

    for file in &top_files {
        let pct = if total_lines > 0 {
            (file.line_count as f64 / total_lines as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "{}{:<60}{} {:>12} {:>8} {:>10} {:>5.1}%",
            get_color_for_percentage(pct),
            file.path,
            COLOR_RESET,
            file.language.as_str(),
            file.line_count,
            format_size(file.size_bytes),
            pct
        );
    }
}

/// Format one or more analyses as JSON
#[must_use]
pub fn format_json(analyses: &[Analysis]) -> String {
    let result = match analyses {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    };
    result.unwrap_or_else(|_| "{}".to_string())
}

/// Print the scan result of a single file
pub fn format_inspection(record: &FileRecord) {
    println!("{}", record.path);
    println!(
        "  {} | {} lines | {}",
        record.language,
        record.line_count,
        format_size(record.size_bytes)
    );
    match &record.structural_summary {
        Some(summary) => {
            println!();
            for line in summary.lines() {
                println!("  {line}");
            }
        }
        None if record.language.supports_structure() => {
            println!("  (no structural summary: source did not parse cleanly)");
        }
        None => {}
    }
}
