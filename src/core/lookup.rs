use std::fs;
use std::path::{Path, PathBuf};

/// Find the first image in `dir` matching `candidates`, in candidate order.
///
/// Candidate-list order takes precedence over directory-listing order: the
/// configured best name wins even when a lower-priority name also exists.
pub fn find_image(dir: &Path, candidates: &[String]) -> Option<PathBuf> {
    for name in candidates {
        let path = dir.join(name);
        if path.is_file() {
            return Some(path);
        }
    }
    None
}

/// Collect album covers from the immediate subdirectories of `artist_dir`,
/// capped at `cap`. Subdirectories are visited in sorted-name order so the
/// composite layout is stable across runs; every candidate match within a
/// subdirectory counts, and extras beyond the cap are ignored.
pub fn collect_album_covers(artist_dir: &Path, candidates: &[String], cap: usize) -> Vec<PathBuf> {
    let mut subdirs: Vec<PathBuf> = match fs::read_dir(artist_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(_) => return Vec::new(),
    };
    subdirs.sort();

    let mut covers = Vec::new();
    'outer: for subdir in subdirs {
        for name in candidates {
            let path = subdir.join(name);
            if path.is_file() {
                covers.push(path);
                if covers.len() >= cap {
                    break 'outer;
                }
            }
        }
    }
    covers
}
