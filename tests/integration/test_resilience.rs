//! Resilience test with unreadable entries, links and odd content

#[cfg(test)]
mod tests {
    use crate::fixtures::{options_for, write_file_sync};
    use reposcope::GuardConfig;
    use std::fs;
    use tempfile::TempDir;

    fn paths(inventory: &reposcope::ProjectInventory) -> Vec<String> {
        inventory.files().iter().map(|f| f.path.clone()).collect()
    }

    #[test]
    fn test_syntax_error_keeps_record_without_summary() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file_sync(root.join("broken.py"), "def broken(:\n    pass\n").unwrap();
        write_file_sync(root.join("fine.py"), "def ok():\n    pass\n").unwrap();

        let inventory = reposcope::scan_inventory(root, &options_for(root)).unwrap();

        let broken = &inventory.files()[0];
        assert_eq!(broken.path, "broken.py");
        assert_eq!(broken.line_count, 2);
        assert!(broken.structural_summary.is_none());
        assert!(broken.structure.is_none());

        assert!(inventory.files()[1].structural_summary.is_some());
    }

    #[test]
    fn test_invalid_utf8_is_decoded_leniently() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file_sync(root.join("latin1.txt"), [b'c', b'a', b'f', 0xe9, b'\n', b'x', b'\n'])
            .unwrap();

        let inventory = reposcope::scan_inventory(root, &options_for(root)).unwrap();

        assert_eq!(inventory.total_files(), 1);
        assert_eq!(inventory.files()[0].line_count, 2);
        assert_eq!(inventory.files()[0].size_bytes, 7);
    }

    #[test]
    fn test_empty_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file_sync(root.join("empty.py"), "").unwrap();
        fs::create_dir_all(root.join("nothing/here")).unwrap();

        let inventory = reposcope::scan_inventory(root, &options_for(root)).unwrap();

        assert_eq!(paths(&inventory), vec!["empty.py"]);
        assert_eq!(inventory.files()[0].line_count, 0);
        assert!(inventory.files()[0].structure.as_ref().unwrap().is_empty());
        assert_eq!(
            inventory.directories(),
            &["nothing".to_string(), "nothing/here".to_string()]
        );
    }

    #[test]
    fn test_denied_subdirectory_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file_sync(root.join("public/a.txt"), "a\n").unwrap();
        write_file_sync(root.join("secret/key.txt"), "k\n").unwrap();

        let mut guard = GuardConfig::only(vec![root.to_path_buf()]);
        guard.deny_roots = vec![root.join("secret")];
        let opts = reposcope::ScanOptions {
            guard,
            ..reposcope::ScanOptions::default()
        };

        let inventory = reposcope::scan_inventory(root, &opts).unwrap();

        assert_eq!(paths(&inventory), vec!["public/a.txt"]);
        assert_eq!(inventory.directories(), &["public".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_never_followed() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file_sync(root.join("real/data.py"), "x = 1\n").unwrap();
        symlink(root.join("real/data.py"), root.join("alias.py")).unwrap();
        symlink(root.join("real"), root.join("linked_dir")).unwrap();
        symlink(root, root.join("real/loop")).unwrap();
        symlink(root.join("missing.txt"), root.join("dangling.txt")).unwrap();

        let inventory = reposcope::scan_inventory(root, &options_for(root)).unwrap();

        assert_eq!(paths(&inventory), vec!["real/data.py"]);
        assert_eq!(inventory.directories(), &["real".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_continues_after_permission_errors() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file_sync(root.join("accessible1/file1.txt"), "content1\n").unwrap();
        write_file_sync(root.join("accessible2/file2.txt"), "content2\n").unwrap();
        write_file_sync(root.join("locked/hidden.txt"), "secret\n").unwrap();
        write_file_sync(root.join("unreadable.txt"), "nope\n").unwrap();

        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();
        fs::set_permissions(root.join("unreadable.txt"), fs::Permissions::from_mode(0o000))
            .unwrap();

        let result = reposcope::scan_inventory(root, &options_for(root));

        // Restore so TempDir can clean up
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
        fs::set_permissions(root.join("unreadable.txt"), fs::Permissions::from_mode(0o644))
            .unwrap();

        let inventory = result.expect("walk survives unreadable entries");
        let found = paths(&inventory);
        assert!(found.contains(&"accessible1/file1.txt".to_string()));
        assert!(found.contains(&"accessible2/file2.txt".to_string()));
        // Privileged runs can still read these; either way the totals agree
        assert_eq!(
            inventory.total_lines(),
            inventory.files().iter().map(|f| f.line_count).sum::<u64>()
        );
    }
}
