use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Server configuration, loaded once at startup and immutable thereafter.
///
/// `base_dir` should match the `music_directory` setting of mpd.conf.
/// `root_overrides` are mount points checked before `base_dir`; the defaults
/// cover stock Volumio and RuneAudio installations.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_dir: String,
    #[serde(default = "default_root_overrides")]
    pub root_overrides: Vec<PathBuf>,
    #[serde(default)]
    pub images: ImageCandidates,
}

/// Ordered candidate filenames for each image role, checked in priority order.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageCandidates {
    #[serde(default = "default_artist_candidates")]
    pub artist: Vec<String>,
    #[serde(default = "default_album_candidates")]
    pub album: Vec<String>,
}

fn default_root_overrides() -> Vec<PathBuf> {
    vec![PathBuf::from("/mnt/MPD"), PathBuf::from("/mnt")]
}

fn default_artist_candidates() -> Vec<String> {
    vec!["thumb.jpg".to_string()]
}

fn default_album_candidates() -> Vec<String> {
    vec![
        "cover.jpg".to_string(),
        "folder.jpg".to_string(),
        "front.jpg".to_string(),
    ]
}

impl Default for ImageCandidates {
    fn default() -> Self {
        Self {
            artist: default_artist_candidates(),
            album: default_album_candidates(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
base_dir: /srv/music
root_overrides:
  - /media/usb
images:
  artist:
    - artist.jpg
    - thumb.jpg
  album:
    - cover.jpg
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.base_dir, "/srv/music");
        assert_eq!(config.root_overrides, vec![PathBuf::from("/media/usb")]);
        assert_eq!(config.images.artist, vec!["artist.jpg", "thumb.jpg"]);
        assert_eq!(config.images.album, vec!["cover.jpg"]);
    }

    #[test]
    fn test_defaults_apply_when_keys_omitted() {
        let config: Config = serde_yaml::from_str("base_dir: /srv/music\n").unwrap();
        assert_eq!(
            config.root_overrides,
            vec![PathBuf::from("/mnt/MPD"), PathBuf::from("/mnt")]
        );
        assert_eq!(config.images.artist, vec!["thumb.jpg"]);
        assert_eq!(config.images.album.first().unwrap(), "cover.jpg");
    }

    #[test]
    fn test_empty_base_dir_allowed() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.base_dir, "");
    }
}
