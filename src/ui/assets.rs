//! Filesystem-based asset source for the host window and the piece sprite sheet.

use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::error::BoardError;
use crate::ui::sprites::SpriteSheet;

/// Filesystem-based asset source that looks for assets in multiple locations
pub struct FileAssets {
    base_path: PathBuf,
}

impl FileAssets {
    pub fn new() -> Self {
        let base_path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        Self { base_path }
    }

    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let mut paths = vec![self.base_path.join(path), PathBuf::from(path)];
        if let Ok(dir) = std::env::current_dir() {
            paths.push(dir.join(path));
        }
        paths
    }

    fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.candidates(path).iter().find_map(|p| fs::read(p).ok())
    }

    /// Load and decode a piece sprite sheet (2 rows x 6 columns of 55 px cells).
    pub fn sprite_sheet(&self, path: &str) -> Result<SpriteSheet, BoardError> {
        let bytes = self
            .read(path)
            .ok_or_else(|| BoardError::AssetNotFound(path.to_string()))?;
        SpriteSheet::decode(&bytes)
    }
}

impl Default for FileAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        Ok(self.read(path).map(Cow::Owned))
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let dir_path = self.base_path.join(path);
        let mut results = Vec::new();

        if let Ok(entries) = fs::read_dir(&dir_path) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    results.push(SharedString::from(name.to_string()));
                }
            }
        }
        Ok(results)
    }
}
