//! Model import and export.
//!
//! | Format        | Extension | Load | Save | Notes |
//! |---------------|-----------|:----:|:----:|-------|
//! | Sproxel CSV   | `.csv`    | Yes  | Yes  | Colors only. `#00000000` marks an empty cell. |
//! | Zoxel native  | `.zox`    | Yes  | Yes  | JSON. Also stores the palette. |
//!
//! Codecs turn bytes into a [`LoadedModel`] and back. The provided
//! [`FileCodec::load`] and [`FileCodec::save`] wrap that with file I/O.
//! Which codec handles a given file is decided by the caller.

pub mod sproxel;
pub mod zoxel;

pub use sproxel::SproxelCodec;
pub use zoxel::ZoxelCodec;

use std::path::{Path, PathBuf};

use crate::core::Error;
use crate::core::types::Result;
use crate::voxel::grid::{Extent, VoxelGrid};
use crate::voxel::palette::Palette;

/// Result of decoding a model file
#[derive(Debug)]
pub struct LoadedModel {
    /// Grid sized to the file's declared extent, marked as saved
    pub grid: VoxelGrid,
    /// Palette stored in the file, for formats that carry one
    pub palette: Option<Palette>,
}

/// A format-specific serializer/deserializer for the grid
pub trait FileCodec {
    /// Stable identifier, e.g. "sproxel"
    fn id(&self) -> &str;

    /// Human readable format name
    fn description(&self) -> &str;

    /// Canonical file extension, without the dot
    fn extension(&self) -> &str;

    fn can_load(&self) -> bool {
        true
    }

    fn can_save(&self) -> bool {
        true
    }

    /// Parse a complete file image
    fn decode(&self, bytes: &[u8]) -> Result<LoadedModel>;

    /// Produce a complete file image
    fn encode(&self, grid: &VoxelGrid, palette: &Palette) -> Result<Vec<u8>>;

    /// Read and decode `path`
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        if !self.can_load() {
            return Err(Error::Unsupported(format!("{} cannot be loaded", self.description())));
        }
        let bytes = std::fs::read(path)?;
        let mut model = self.decode(&bytes)?;
        model.grid.saved();
        log::info!(
            "Loaded {} model {} from {}",
            self.description(),
            model.grid.extent(),
            path.display()
        );
        Ok(model)
    }

    /// Encode and write to `path`.
    ///
    /// Data goes to a temporary sibling first and is renamed into place, so a
    /// failed write leaves any existing file untouched.
    fn save(&self, grid: &VoxelGrid, palette: &Palette, path: &Path) -> Result<()> {
        if !self.can_save() {
            return Err(Error::Unsupported(format!("{} cannot be saved", self.description())));
        }
        let bytes = self.encode(grid, palette)?;

        let temp_path = temp_path_for(path)?;
        std::fs::write(&temp_path, bytes)?;
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        log::info!("Saved {} voxels as {} to {}", grid.len(), self.description(), path.display());
        Ok(())
    }

    /// File dialog filter, e.g. "Sproxel CSV (*.csv)"
    fn filter(&self) -> String {
        format!("{} (*.{})", self.description(), self.extension())
    }

    /// Check if `path` carries this codec's extension (case-insensitive)
    fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

/// The built-in codecs, rejecting imports larger than `max_extent`
pub fn builtin_codecs(max_extent: Extent) -> Vec<Box<dyn FileCodec>> {
    vec![
        Box::new(SproxelCodec::new(max_extent)),
        Box::new(ZoxelCodec::new(max_extent)),
    ]
}

/// Sibling used while saving: the full file name plus ".tmp", so
/// "model.zox" is staged as "model.zox.tmp" and never collides with "model.tmp"
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' does not name a file", path.display()),
        )));
    };
    let mut temp_name = name.to_os_string();
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Reject extents larger than `max`
pub(crate) fn check_extent(extent: Extent, max: Extent) -> Result<()> {
    if extent.fits_within(&max) {
        Ok(())
    } else {
        Err(Error::format(format!("model too large: {} exceeds {}", extent, max)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;
    use crate::voxel::color::Color;
    use tempfile::TempDir;

    fn sample_grid() -> VoxelGrid {
        let mut grid = VoxelGrid::new(Extent::new(3, 4, 5).unwrap());
        grid.set(IVec3::new(0, 0, 0), Color::RED).unwrap();
        grid.set(IVec3::new(2, 3, 4), Color::rgba(1, 2, 3, 4)).unwrap();
        grid.set(IVec3::new(1, 2, 0), Color::rgba(255, 0, 0, 0)).unwrap();
        grid
    }

    #[test]
    fn test_file_roundtrip_all_codecs() {
        let dir = TempDir::new().unwrap();
        let grid = sample_grid();
        let palette = Palette::default();

        for codec in builtin_codecs(Extent::cube(127).unwrap()) {
            let path = dir.path().join(format!("model.{}", codec.extension()));
            codec.save(&grid, &palette, &path).unwrap();
            assert!(!dir.path().join(format!("model.{}.tmp", codec.extension())).exists());

            let loaded = codec.load(&path).unwrap();
            assert_eq!(loaded.grid, grid, "{} roundtrip", codec.id());
            assert!(!loaded.grid.is_changed());
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        for codec in builtin_codecs(Extent::cube(127).unwrap()) {
            let result = codec.load(&dir.path().join("missing"));
            assert!(matches!(result, Err(Error::Io(_))));
        }
    }

    #[test]
    fn test_save_to_missing_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("model.zox");
        let result = ZoxelCodec::default().save(&sample_grid(), &Palette::default(), &path);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_save_keeps_unrelated_tmp_file() {
        let dir = TempDir::new().unwrap();
        let user_file = dir.path().join("model.tmp");
        std::fs::write(&user_file, "USER DATA").unwrap();

        let path = dir.path().join("model.zox");
        ZoxelCodec::default().save(&sample_grid(), &Palette::default(), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&user_file).unwrap(), "USER DATA");
        assert!(path.exists());
        assert!(!dir.path().join("model.zox.tmp").exists());
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(temp_path_for(Path::new("a/model.zox")).unwrap(), Path::new("a/model.zox.tmp"));
        assert_eq!(temp_path_for(Path::new("model")).unwrap(), Path::new("model.tmp"));
        assert!(matches!(temp_path_for(Path::new("a/..")), Err(Error::Io(_))));
    }

    #[test]
    fn test_filter_and_extension_match() {
        let codec = SproxelCodec::default();
        assert_eq!(codec.filter(), "Sproxel CSV (*.csv)");
        assert!(codec.matches_path(Path::new("a/b/model.CSV")));
        assert!(!codec.matches_path(Path::new("model.zox")));
        assert!(!codec.matches_path(Path::new("model")));
    }
}
