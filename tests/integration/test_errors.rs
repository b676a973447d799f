//! Integration test for error handling

#[cfg(test)]
mod tests {
    use crate::fixtures::{options_for, write_file_sync};
    use reposcope::{CancelToken, Error, GuardConfig, ScanOptions};
    use tempfile::TempDir;

    #[test]
    fn test_invalid_path_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does/not/exist/xyz123");
        let result = reposcope::scan_inventory(&missing, &options_for(temp.path()));

        match result {
            Err(Error::InvalidRoot { path, reason }) => {
                assert_eq!(path, missing);
                assert!(reason.contains("does not exist"));
            }
            other => panic!("expected invalid root, got {other:?}"),
        }
    }

    #[test]
    fn test_file_instead_of_directory() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let opts = ScanOptions::default();
        let result = reposcope::scan_inventory(temp_file.path(), &opts);

        assert!(result.is_err());

        if let Err(e) = result {
            assert!(matches!(e, Error::InvalidRoot { .. }));
            assert!(e.to_string().contains("not a directory"));
        }
    }

    #[test]
    fn test_root_outside_guard_is_rejected() {
        let allowed = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        write_file_sync(elsewhere.path().join("a.py"), "x = 1\n").unwrap();

        let opts = options_for(allowed.path());
        let result = reposcope::scan_inventory(elsewhere.path(), &opts);

        assert!(matches!(result, Err(Error::Guard(_))));
    }

    #[test]
    fn test_root_inside_deny_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("repo");
        write_file_sync(root.join("a.py"), "x = 1\n").unwrap();

        let mut guard = GuardConfig::only(vec![temp.path().to_path_buf()]);
        guard.deny_roots = vec![temp.path().to_path_buf()];
        let opts = ScanOptions {
            guard,
            ..ScanOptions::default()
        };

        let err = reposcope::scan_inventory(&root, &opts).unwrap_err();
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn test_invalid_options_fail_before_walking() {
        let temp = TempDir::new().unwrap();
        let opts = ScanOptions {
            max_file_size: 0,
            ..options_for(temp.path())
        };

        let result = reposcope::scan_inventory(temp.path(), &opts);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_cancelled_walk() {
        let temp = TempDir::new().unwrap();
        write_file_sync(temp.path().join("a.txt"), "a\n").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let opts = ScanOptions {
            cancel: Some(cancel.clone()),
            ..options_for(temp.path())
        };

        let result = reposcope::scan_inventory(temp.path(), &opts);
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_cancel_from_progress_callback() {
        use reposcope::models::ProgressSnapshot;
        use std::sync::Arc;

        let temp = TempDir::new().unwrap();
        for i in 0..1200 {
            write_file_sync(temp.path().join(format!("d{}/f{i:04}.txt", i / 100)), "x\n").unwrap();
        }

        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let opts = ScanOptions {
            max_files: 5000,
            cancel: Some(cancel),
            progress_notifier: Some(Arc::new(move |snapshot: &ProgressSnapshot| {
                if snapshot.completion_ratio.is_none() {
                    trigger.cancel();
                }
            })),
            ..options_for(temp.path())
        };

        // The file-count trigger fires after 500 files, well before the end
        let result = reposcope::scan_inventory(temp.path(), &opts);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
