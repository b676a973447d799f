//! Tests for relative path rendering and root naming

#[cfg(test)]
mod tests {
    use reposcope::services::walker::{FALLBACK_ROOT_NAME, relative_path, root_name};
    use std::path::{Path, PathBuf};

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = PathBuf::from("project");
        let path = root.join("src").join("pkg").join("mod.py");
        assert_eq!(relative_path(&root, &path), "src/pkg/mod.py");
    }

    #[test]
    fn test_relative_path_of_direct_child() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, Path::new("/repo/README.md")), "README.md");
    }

    #[test]
    fn test_relative_path_of_root_is_empty() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, root), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_is_kept_inside_a_component() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_path(root, Path::new("/repo/odd\\name.txt")),
            "odd\\name.txt"
        );
    }

    #[test]
    fn test_root_name_is_basename() {
        assert_eq!(root_name(Path::new("/work/my-app")), "my-app");
        assert_eq!(root_name(Path::new("relative/tool")), "tool");
    }

    #[test]
    fn test_root_name_fallback() {
        assert_eq!(root_name(Path::new("/")), FALLBACK_ROOT_NAME);
        assert_eq!(root_name(Path::new(".")), FALLBACK_ROOT_NAME);
        assert_eq!(root_name(Path::new("")), FALLBACK_ROOT_NAME);
    }
}
