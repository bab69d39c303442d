use std::path::{Path, PathBuf};

const BOOKLET_DIR: &str = "booklet";
const PAGE_PREFIX: &str = "booklet";

/// Path of booklet page `no` under `album_dir`, e.g. no=2 → `booklet/booklet02.jpg`.
///
/// Page numbers are 1-based; 0 is a caller error that simply names a file
/// which never exists.
pub fn page_path(album_dir: &Path, no: u32) -> PathBuf {
    album_dir
        .join(BOOKLET_DIR)
        .join(format!("{}{:02}.jpg", PAGE_PREFIX, no))
}

/// Count booklet pages under `album_dir` by probing sequentially from page 1
/// until a probe misses.
///
/// The page set is assumed contiguous; a gap silently truncates the count.
/// A missing album directory counts as zero pages.
pub fn count_pages(album_dir: &Path) -> u32 {
    if !album_dir.is_dir() {
        return 0;
    }
    let mut no = 0;
    while page_path(album_dir, no + 1).is_file() {
        no += 1;
    }
    no
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_pages(album_dir: &Path, numbers: &[u32]) {
        fs::create_dir_all(album_dir.join(BOOKLET_DIR)).unwrap();
        for &no in numbers {
            fs::write(page_path(album_dir, no), b"jpeg").unwrap();
        }
    }

    #[test]
    fn test_page_path_zero_padding() {
        let dir = Path::new("/music/artist/album");
        assert_eq!(
            page_path(dir, 2),
            Path::new("/music/artist/album/booklet/booklet02.jpg")
        );
        assert_eq!(
            page_path(dir, 12),
            Path::new("/music/artist/album/booklet/booklet12.jpg")
        );
    }

    #[test]
    fn test_count_contiguous_pages() {
        let tmp = tempfile::tempdir().unwrap();
        make_pages(tmp.path(), &[1, 2, 3]);
        assert_eq!(count_pages(tmp.path()), 3);
    }

    #[test]
    fn test_count_truncates_at_gap() {
        let tmp = tempfile::tempdir().unwrap();
        make_pages(tmp.path(), &[1, 3]);
        assert_eq!(count_pages(tmp.path()), 1);
    }

    #[test]
    fn test_count_missing_album_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(count_pages(&tmp.path().join("gone")), 0);
    }

    #[test]
    fn test_count_album_without_booklet_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(count_pages(tmp.path()), 0);
    }
}
