//! Zoxel native format: JSON with explicit extents, a sparse voxel list and the palette.
//!
//! ```json
//! {
//!   "creator": "Zoxel",
//!   "version": 2,
//!   "width": 32, "height": 32, "depth": 32,
//!   "palette": { "current": 4294967295, "swatches": [4294967295, 255] },
//!   "frames": 1,
//!   "frame1": [[x, y, z, 0xRRGGBBAA], ...]
//! }
//! ```
//!
//! Version 1 files carry no extents or palette; their extent is derived from
//! the highest coordinate present.

use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::{IVec3, Result};
use crate::voxel::color::Color;
use crate::voxel::grid::{Extent, VoxelGrid};
use crate::voxel::palette::Palette;
use super::{check_extent, FileCodec, LoadedModel};

/// Version written by this codec
pub const ZOXEL_VERSION: u32 = 2;

const CREATOR: &str = "Zoxel";

#[derive(Debug, Serialize, Deserialize)]
struct ZoxelDocument {
    creator: String,
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    palette: Option<PaletteRecord>,
    frames: u32,
    frame1: Vec<[i64; 4]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PaletteRecord {
    current: u32,
    swatches: Vec<u32>,
}

/// Native JSON codec
#[derive(Debug, Clone)]
pub struct ZoxelCodec {
    max_extent: Extent,
}

impl Default for ZoxelCodec {
    fn default() -> Self {
        Self::new(Extent::MAX_IMPORT)
    }
}

impl ZoxelCodec {
    pub fn new(max_extent: Extent) -> Self {
        Self { max_extent }
    }
}

impl FileCodec for ZoxelCodec {
    fn id(&self) -> &str {
        "zoxel"
    }

    fn description(&self) -> &str {
        "Zoxel"
    }

    fn extension(&self) -> &str {
        "zox"
    }

    fn decode(&self, bytes: &[u8]) -> Result<LoadedModel> {
        let doc: ZoxelDocument = serde_json::from_slice(bytes)
            .map_err(|e| Error::format(format!("invalid Zoxel file: {}", e)))?;

        if doc.version == 0 || doc.version > ZOXEL_VERSION {
            return Err(Error::format(format!("unsupported Zoxel version {}", doc.version)));
        }
        if doc.frames == 0 {
            return Err(Error::format("file has no frames"));
        }
        if doc.frames > 1 {
            log::warn!("Zoxel file has {} frames, only the first is loaded", doc.frames);
        }
        if doc.creator != CREATOR {
            log::debug!("Zoxel file written by '{}'", doc.creator);
        }

        let voxels = doc
            .frame1
            .iter()
            .map(parse_voxel)
            .collect::<Result<Vec<_>>>()?;

        let extent = match (doc.width, doc.height, doc.depth) {
            (Some(width), Some(height), Some(depth)) => Extent::new(width, height, depth)
                .map_err(|_| Error::format(format!("invalid dimensions {}x{}x{}", width, height, depth)))?,
            (None, None, None) => derive_extent(&voxels)?,
            _ => return Err(Error::format("incomplete dimensions")),
        };
        check_extent(extent, self.max_extent)?;

        let mut grid = VoxelGrid::new(extent);
        for (pos, color) in voxels {
            grid.set(pos, color).map_err(|_| {
                Error::format(format!("voxel ({}, {}, {}) outside {}", pos.x, pos.y, pos.z, extent))
            })?;
        }

        let palette = doc.palette.map(|record| Palette {
            current: Color::from_rgba_u32(record.current),
            swatches: record.swatches.into_iter().map(Color::from_rgba_u32).collect(),
        });

        log::debug!("Decoded Zoxel v{} model {} with {} voxels", doc.version, extent, grid.len());
        Ok(LoadedModel { grid, palette })
    }

    fn encode(&self, grid: &VoxelGrid, palette: &Palette) -> Result<Vec<u8>> {
        let extent = grid.extent();
        let doc = ZoxelDocument {
            creator: CREATOR.to_string(),
            version: ZOXEL_VERSION,
            width: Some(extent.width()),
            height: Some(extent.height()),
            depth: Some(extent.depth()),
            palette: Some(PaletteRecord {
                current: palette.current.to_rgba_u32(),
                swatches: palette.swatches.iter().map(|c| c.to_rgba_u32()).collect(),
            }),
            frames: 1,
            frame1: grid
                .sorted_voxels()
                .into_iter()
                .map(|(pos, color)| {
                    [pos.x.into(), pos.y.into(), pos.z.into(), color.to_rgba_u32().into()]
                })
                .collect(),
        };

        serde_json::to_vec(&doc).map_err(|e| Error::format(e.to_string()))
    }
}

fn parse_voxel(entry: &[i64; 4]) -> Result<(IVec3, Color)> {
    let [x, y, z, packed] = *entry;
    let coord = |v: i64| {
        i32::try_from(v)
            .ok()
            .filter(|v| *v >= 0)
            .ok_or_else(|| Error::format(format!("invalid coordinate {}", v)))
    };
    let color = u32::try_from(packed)
        .map_err(|_| Error::format(format!("invalid color {}", packed)))?;
    Ok((IVec3::new(coord(x)?, coord(y)?, coord(z)?), Color::from_rgba_u32(color)))
}

/// Smallest extent holding every voxel, at least 1 on each axis.
///
/// Coordinates are non-negative `i32`, so `coord + 1` always fits in `u32`.
fn derive_extent(voxels: &[(IVec3, Color)]) -> Result<Extent> {
    let mut size = [1u32; 3];
    for (pos, _) in voxels {
        for (axis, end) in size.iter_mut().enumerate() {
            *end = (*end).max(pos[axis] as u32 + 1);
        }
    }
    let [width, height, depth] = size;
    Extent::new(width, height, depth)
        .map_err(|_| Error::format(format!("voxel coordinates exceed {}x{}x{}", width, height, depth)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<LoadedModel> {
        ZoxelCodec::default().decode(text.as_bytes())
    }

    #[test]
    fn test_roundtrip_with_palette() {
        let mut grid = VoxelGrid::new(Extent::new(5, 6, 7).unwrap());
        grid.set(IVec3::new(4, 5, 6), Color::rgba(9, 8, 7, 6)).unwrap();
        grid.set(IVec3::new(0, 0, 0), Color::WHITE).unwrap();
        let mut palette = Palette::new(vec![Color::RED, Color::BLUE]);
        palette.set_current(Color::rgba(1, 2, 3, 4));

        let codec = ZoxelCodec::default();
        let bytes = codec.encode(&grid, &palette).unwrap();
        let model = codec.decode(&bytes).unwrap();

        assert_eq!(model.grid, grid);
        assert_eq!(model.palette, Some(palette));
    }

    #[test]
    fn test_empty_grid_keeps_extent() {
        let grid = VoxelGrid::new(Extent::new(3, 1, 2).unwrap());
        let codec = ZoxelCodec::default();
        let bytes = codec.encode(&grid, &Palette::default()).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap().grid, grid);
    }

    #[test]
    fn test_document_shape() {
        let mut grid = VoxelGrid::new(Extent::cube(2).unwrap());
        grid.set(IVec3::new(1, 0, 1), Color::RED).unwrap();
        let bytes = ZoxelCodec::default().encode(&grid, &Palette::default()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["creator"], "Zoxel");
        assert_eq!(value["version"], 2);
        assert_eq!(value["frames"], 1);
        assert_eq!(value["frame1"][0], serde_json::json!([1, 0, 1, 0xFF0000FFu32]));
    }

    #[test]
    fn test_legacy_version_derives_extent() {
        let model = decode(r#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[[2,0,1,4278190335]]}"#).unwrap();
        assert_eq!(model.grid.extent(), Extent::new(3, 1, 2).unwrap());
        assert_eq!(model.grid.get(IVec3::new(2, 0, 1)), Some(Color::RED));
        assert!(model.palette.is_none());
    }

    #[test]
    fn test_legacy_empty() {
        let model = decode(r#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[]}"#).unwrap();
        assert_eq!(model.grid.extent(), Extent::cube(1).unwrap());
    }

    #[test]
    fn test_rejects_malformed() {
        let cases = [
            "not json",
            r#"{"creator":"Zoxel","version":3,"frames":1,"frame1":[]}"#,
            r#"{"creator":"Zoxel","version":2,"frames":0,"frame1":[]}"#,
            r#"{"creator":"Zoxel","version":2,"width":2,"frames":1,"frame1":[]}"#,
            r#"{"creator":"Zoxel","version":2,"width":2,"height":2,"depth":2,"frames":1,"frame1":[[2,0,0,255]]}"#,
            r#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[[-1,0,0,255]]}"#,
            r#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[[0,0,0,-5]]}"#,
            r#"{"creator":"Zoxel","version":2,"width":0,"height":2,"depth":2,"frames":1,"frame1":[]}"#,
            r#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[[2147483647,0,0,255]]}"#,
            r#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[[0,0,2147483648,255]]}"#,
        ];
        for text in cases {
            assert!(matches!(decode(text), Err(Error::Format(_))), "{}", text);
        }
    }

    #[test]
    fn test_too_large() {
        let codec = ZoxelCodec::new(Extent::cube(4).unwrap());
        let result = codec.decode(br#"{"creator":"Zoxel","version":1,"frames":1,"frame1":[[4,0,0,255]]}"#);
        assert!(matches!(result, Err(Error::Format(msg)) if msg.contains("too large")));
    }
}
