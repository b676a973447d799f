//! Unit tests for record ordering and language grouping

#[cfg(test)]
mod tests {
    use reposcope::services::aggregate::{SortBy, group_by_language, sort_and_limit};
    use reposcope::{FileRecord, Language};

    fn record(path: &str, language: Language, size_bytes: u64, line_count: u64) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            extension: String::new(),
            size_bytes,
            line_count,
            language,
            structural_summary: None,
            structure: None,
        }
    }

    fn sample() -> Vec<FileRecord> {
        vec![
            record("a.py", Language::Python, 100, 40),
            record("b.js", Language::JavaScript, 500, 10),
            record("c.py", Language::Python, 200, 40),
            record("d.md", Language::Markdown, 50, 5),
        ]
    }

    #[test]
    fn test_sort_by_lines_breaks_ties_by_path() {
        let sorted = sort_and_limit(sample(), SortBy::Lines, None);
        let paths: Vec<&str> = sorted.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.py", "c.py", "b.js", "d.md"]);
    }

    #[test]
    fn test_sort_by_size() {
        let sorted = sort_and_limit(sample(), SortBy::Size, None);
        assert_eq!(sorted[0].path, "b.js");
        assert_eq!(sorted[1].path, "c.py");
        assert_eq!(sorted[2].path, "a.py");
        assert_eq!(sorted[3].path, "d.md");
    }

    #[test]
    fn test_sort_by_path() {
        let mut files = sample();
        files.reverse();
        let sorted = sort_and_limit(files, SortBy::Path, None);
        assert_eq!(sorted[0].path, "a.py");
        assert_eq!(sorted[3].path, "d.md");
    }

    #[test]
    fn test_top_k_limiting() {
        let sorted = sort_and_limit(sample(), SortBy::Size, Some(2));
        assert_eq!(sorted.len(), 2);

        let all = sort_and_limit(sample(), SortBy::Size, Some(10));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_sort_field_parsing() {
        assert!(matches!("lines".parse::<SortBy>(), Ok(SortBy::Lines)));
        assert!(matches!("SIZE".parse::<SortBy>(), Ok(SortBy::Size)));
        assert!(matches!("path".parse::<SortBy>(), Ok(SortBy::Path)));
        assert!("depth".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_group_by_language_keeps_first_seen_order() {
        let files = sample();
        let groups = group_by_language(&files);

        let languages: Vec<Language> = groups.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            languages,
            vec![Language::Python, Language::JavaScript, Language::Markdown]
        );

        let python: Vec<&str> = groups[0].1.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(python, vec!["a.py", "c.py"]);
    }

    #[test]
    fn test_group_by_language_empty() {
        assert!(group_by_language(&[]).is_empty());
    }
}
