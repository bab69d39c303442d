use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;
use tracing::info;

const CANVAS_SIZE: u32 = 800;
const CELL_SIZE: u32 = 400;
const MAX_SOURCES: usize = 4;

/// Build a 2x2 artist thumbnail from up to four album covers and persist it
/// as JPEG at `out`.
///
/// Each source is hard-resized to 400x400 (aspect ratio not preserved) and
/// pasted in cell order top-left, top-right, bottom-left, bottom-right.
/// Sources beyond the fourth are ignored. Zero sources still produce a blank
/// canvas; a missing artist image is represented by the empty grid rather
/// than an error.
///
/// The write goes through a temp file in the destination directory followed
/// by a rename, so a concurrent reader of `out` never observes a truncated
/// JPEG.
pub fn build_artist_thumb(sources: &[impl AsRef<Path>], out: &Path) -> Result<()> {
    let mut canvas = RgbImage::new(CANVAS_SIZE, CANVAS_SIZE);

    for (i, source) in sources.iter().take(MAX_SOURCES).enumerate() {
        let source = source.as_ref();
        let cover = image::open(source)
            .with_context(|| format!("opening {}", source.display()))?
            .to_rgb8();
        let resized = imageops::resize(&cover, CELL_SIZE, CELL_SIZE, FilterType::Triangle);
        let x = (i as u32 % 2) * CELL_SIZE;
        let y = (i as u32 / 2) * CELL_SIZE;
        imageops::replace(&mut canvas, &resized, x as i64, y as i64);
    }

    let dir = out
        .parent()
        .with_context(|| format!("no parent directory for {}", out.display()))?;
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    canvas
        .write_to(&mut tmp, ImageFormat::Jpeg)
        .context("encoding composite thumbnail")?;
    // NamedTempFile starts out 0600; the persisted thumb must stay readable
    // by sibling processes serving the library directly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .context("setting thumbnail permissions")?;
    }
    tmp.persist(out)
        .with_context(|| format!("writing {}", out.display()))?;

    info!(
        "composite built out={} sources={}",
        out.display(),
        sources.len().min(MAX_SOURCES)
    );
    Ok(())
}
