//! Summarizer hand-off: batching, digests and diagram fallbacks

#[cfg(test)]
mod tests {
    use crate::fixtures::{create_project_fixture, options_for, write_file_sync};
    use reposcope::services::handoff::{
        DEFAULT_BATCH_SIZE, DocumentationBundle, Summarizer, language_batches,
        object_oriented_files, render_file_tree,
    };
    use reposcope::{Analysis, FileRecord, Language, ProjectInventory};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::process::Command;
    use tempfile::TempDir;

    fn record(path: &str, language: Language) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            extension: String::new(),
            size_bytes: 1,
            line_count: 1,
            language,
            structural_summary: None,
            structure: None,
        }
    }

    fn mixed_inventory() -> ProjectInventory {
        let mut files = Vec::new();
        for i in 0..23 {
            files.push(record(&format!("py/{i:02}.py"), Language::Python));
        }
        for i in 0..3 {
            files.push(record(&format!("js/{i}.js"), Language::JavaScript));
        }
        files.push(record("LICENSE", Language::Unknown));
        files.push(record("Makefile", Language::Unknown));
        ProjectInventory::new("mixed".to_string(), files, vec!["js".into(), "py".into()])
    }

    #[test]
    fn test_language_batches_chunk_and_skip_unknown() {
        let inventory = mixed_inventory();
        let batches = language_batches(&inventory, DEFAULT_BATCH_SIZE);

        let shape: Vec<(Language, usize)> =
            batches.iter().map(|b| (b.language, b.files.len())).collect();
        assert_eq!(
            shape,
            vec![
                (Language::Python, 10),
                (Language::Python, 10),
                (Language::Python, 3),
                (Language::JavaScript, 3),
            ]
        );
        assert_eq!(batches[1].files[0].path, "py/10.py");
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let inventory = mixed_inventory();
        let batches = language_batches(&inventory, 0);
        assert_eq!(batches.len(), 26);
    }

    #[test]
    fn test_object_oriented_files() {
        let inventory = mixed_inventory();
        let files = object_oriented_files(&inventory, 5);
        assert_eq!(files.len(), 5);
        assert!(files.iter().all(|f| f.language == Language::Python));
    }

    #[test]
    fn test_render_file_tree() {
        let temp = TempDir::new().unwrap();
        let root = create_project_fixture(temp.path()).unwrap();
        let inventory = reposcope::scan_inventory(&root, &options_for(&root)).unwrap();

        let tree = render_file_tree(&inventory);
        assert!(tree.starts_with("app/\nweb/\n"));
        assert!(tree.contains("\nPYTHON files:\n  app/main.py (8 lines)\n  app/util.py (2 lines)\n"));
        assert!(tree.contains("\nJAVASCRIPT files:\n  web/index.js (10 lines)\n"));
        assert!(tree.contains("\nMARKDOWN files:\n  README.md (3 lines)\n"));
    }

    #[test]
    fn test_fallback_diagrams_fill_only_gaps() {
        let bundle = DocumentationBundle {
            overview: "Overview".to_string(),
            class_diagram: Some("classDiagram\n    class Store".to_string()),
            ..DocumentationBundle::default()
        }
        .with_fallback_diagrams();

        assert_eq!(
            bundle.sequence_diagram.as_deref(),
            Some(DocumentationBundle::fallback_sequence_diagram().as_str())
        );
        assert_eq!(
            bundle.class_diagram.as_deref(),
            Some("classDiagram\n    class Store")
        );
        assert!(DocumentationBundle::fallback_sequence_diagram().starts_with("sequenceDiagram"));
        assert!(DocumentationBundle::fallback_class_diagram().starts_with("classDiagram"));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("summarizer offline")]
    struct Offline;

    struct EchoSummarizer {
        online: bool,
    }

    impl Summarizer for EchoSummarizer {
        type Error = Offline;

        fn summarize(&self, analysis: &Analysis) -> Result<DocumentationBundle, Offline> {
            if !self.online {
                return Err(Offline);
            }
            let file_docs: BTreeMap<String, String> = analysis
                .inventory
                .files()
                .iter()
                .filter_map(|f| {
                    f.structural_summary
                        .as_ref()
                        .map(|s| (f.path.clone(), s.clone()))
                })
                .collect();
            Ok(DocumentationBundle {
                overview: format!("{} files", analysis.inventory.total_files()),
                file_docs,
                sequence_diagram: None,
                class_diagram: None,
            }
            .with_fallback_diagrams())
        }
    }

    #[test]
    fn test_summarizer_consumes_analysis() {
        let temp = TempDir::new().unwrap();
        let root = create_project_fixture(temp.path()).unwrap();
        let analysis = reposcope::analyze(&root, &options_for(&root)).unwrap();

        let bundle = EchoSummarizer { online: true }.summarize(&analysis).unwrap();
        assert_eq!(bundle.overview, "4 files");
        assert_eq!(
            bundle.file_docs.keys().collect::<Vec<_>>(),
            vec!["app/main.py", "app/util.py", "web/index.js"]
        );
        assert!(bundle.class_diagram.is_some());

        let err = EchoSummarizer { online: false }
            .summarize(&analysis)
            .unwrap_err();
        assert_eq!(err.to_string(), "summarizer offline");
    }

    /// Config admitting only `--allow-root` paths, wherever the temp directory lives.
    fn isolated_config(temp: &TempDir) -> PathBuf {
        let config = temp.path().join("reposcope.json");
        write_file_sync(
            &config,
            r#"{"deny_roots": [], "allow_home": false, "allow_temp": false, "allow_cwd": false}"#,
        )
        .unwrap();
        config
    }

    #[test]
    fn test_cli_help() {
        let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
            .arg("--help")
            .output()
            .expect("run reposcope --help");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Repository inventory CLI"));
        assert!(stdout.contains("reposcope scan <SOURCE>..."));
    }

    #[test]
    fn test_cli_scan_json() {
        let temp = TempDir::new().unwrap();
        let root = create_project_fixture(temp.path()).unwrap();
        let config = isolated_config(&temp);

        let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
            .arg("scan")
            .arg(&root)
            .arg("--json")
            .arg("--config")
            .arg(&config)
            .arg("--allow-root")
            .arg(&root)
            .env_remove("REPOSCOPE_WORKSPACE")
            .output()
            .expect("run reposcope scan");

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["inventory"]["total_files"], 4);
    }

    #[test]
    fn test_cli_missing_source_exits_with_usage_error() {
        let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
            .arg("scan")
            .output()
            .expect("run reposcope scan");
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_cli_unopenable_source_among_several_exits_partial() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good");
        write_file_sync(good.join("main.py"), "def run():\n    pass\n").unwrap();
        let missing = temp.path().join("missing");
        let config = isolated_config(&temp);

        let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
            .arg("scan")
            .arg(&good)
            .arg(&missing)
            .arg("--json")
            .arg("--config")
            .arg(&config)
            .arg("--allow-root")
            .arg(temp.path())
            .env_remove("REPOSCOPE_WORKSPACE")
            .output()
            .expect("run reposcope scan");

        assert_eq!(
            output.status.code(),
            Some(3),
            "{}",
            String::from_utf8_lossy(&output.stderr)
        );
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["inventory"]["root_name"], "good");
        assert_eq!(value["stats"]["function_count"], 1);
        assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
    }

    #[test]
    fn test_cli_every_source_unopenable_exits_with_usage_error() {
        let temp = TempDir::new().unwrap();
        let config = isolated_config(&temp);

        let output = Command::new(env!("CARGO_BIN_EXE_reposcope"))
            .arg("scan")
            .arg(temp.path().join("one"))
            .arg(temp.path().join("two"))
            .arg("--json")
            .arg("--config")
            .arg(&config)
            .env_remove("REPOSCOPE_WORKSPACE")
            .output()
            .expect("run reposcope scan");

        assert_eq!(output.status.code(), Some(2));
        assert!(output.stdout.is_empty());
    }
}
