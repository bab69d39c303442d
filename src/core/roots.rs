use std::path::{Path, PathBuf};

use crate::config::Config;

/// Pick the effective music root for a request.
///
/// Override mounts win in listed order; the configured `base_dir` is the
/// fallback. Every step requires an existing directory, so a configured but
/// unmounted path never becomes the root.
pub fn effective_root(config: &Config) -> Option<PathBuf> {
    for candidate in &config.root_overrides {
        if candidate.is_dir() {
            return Some(candidate.clone());
        }
    }
    if !config.base_dir.is_empty() {
        let base = Path::new(&config.base_dir);
        if base.is_dir() {
            return Some(base.to_path_buf());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageCandidates;

    fn config_with(base_dir: &str, overrides: Vec<PathBuf>) -> Config {
        Config {
            base_dir: base_dir.to_string(),
            root_overrides: overrides,
            images: ImageCandidates::default(),
        }
    }

    #[test]
    fn test_first_existing_override_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        std::fs::create_dir(&first).unwrap();
        std::fs::create_dir(&second).unwrap();
        let config = config_with("", vec![first.clone(), second]);
        assert_eq!(effective_root(&config), Some(first));
    }

    #[test]
    fn test_missing_override_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let present = tmp.path().join("present");
        std::fs::create_dir(&present).unwrap();
        let config = config_with("", vec![tmp.path().join("missing"), present.clone()]);
        assert_eq!(effective_root(&config), Some(present));
    }

    #[test]
    fn test_base_dir_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with(
            tmp.path().to_str().unwrap(),
            vec![tmp.path().join("missing")],
        );
        assert_eq!(effective_root(&config), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_no_root_available() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with(
            tmp.path().join("gone").to_str().unwrap(),
            vec![tmp.path().join("missing")],
        );
        assert_eq!(effective_root(&config), None);
    }

    #[test]
    fn test_empty_base_dir_is_not_a_root() {
        let config = config_with("", vec![]);
        assert_eq!(effective_root(&config), None);
    }
}
