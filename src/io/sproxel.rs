//! Sproxel CSV format.
//!
//! ```text
//! W,H,D
//! <row z=0 of layer y=H-1>
//! ...
//! <row z=D-1 of layer y=H-1>
//!
//! <row z=0 of layer y=H-2>
//! ...
//! ```
//!
//! Layers run from the top (`y = H - 1`) down to `y = 0` and are separated by a
//! blank line. Each row holds `W` comma-separated cells for `x = 0..W`, written
//! as `#RRGGBBAA`. `#00000000` marks an empty cell. `#RRGGBB` is accepted on
//! load as an opaque color.

use std::fmt::Write as _;

use crate::core::Error;
use crate::core::types::{IVec3, Result};
use crate::voxel::color::Color;
use crate::voxel::grid::{Extent, VoxelGrid};
use crate::voxel::palette::Palette;
use super::{check_extent, FileCodec, LoadedModel};

const EMPTY_CELL: &str = "#00000000";

/// Sproxel-compatible CSV codec
#[derive(Debug, Clone)]
pub struct SproxelCodec {
    max_extent: Extent,
}

impl Default for SproxelCodec {
    fn default() -> Self {
        Self::new(Extent::MAX_IMPORT)
    }
}

impl SproxelCodec {
    pub fn new(max_extent: Extent) -> Self {
        Self { max_extent }
    }
}

impl FileCodec for SproxelCodec {
    fn id(&self) -> &str {
        "sproxel"
    }

    fn description(&self) -> &str {
        "Sproxel CSV"
    }

    fn extension(&self) -> &str {
        "csv"
    }

    fn decode(&self, bytes: &[u8]) -> Result<LoadedModel> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::format(format!("not a text file: {}", e)))?;
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().ok_or_else(|| Error::format("empty file"))?;
        let extent = parse_header(header)?;
        check_extent(extent, self.max_extent)?;

        let mut grid = VoxelGrid::new(extent);
        let IVec3 { x: width, y: height, z: depth } = extent.size();

        for layer in 0..height {
            let y = height - 1 - layer;
            for z in 0..depth {
                let row = lines.next().ok_or_else(|| {
                    Error::format(format!("truncated data: missing row z={} of layer y={}", z, y))
                })?;
                let cells: Vec<&str> = row.split(',').map(str::trim).collect();
                if cells.len() != width as usize {
                    return Err(Error::format(format!(
                        "row z={} of layer y={} has {} cells, expected {}",
                        z, y, cells.len(), width
                    )));
                }
                for (x, cell) in cells.into_iter().enumerate() {
                    let color = Color::from_hex(cell)?;
                    if !color.is_clear() {
                        grid.set(IVec3::new(x as i32, y, z), color)?;
                    }
                }
            }
        }

        if lines.next().is_some() {
            return Err(Error::format("unexpected data after last layer"));
        }

        log::debug!("Decoded Sproxel model {} with {} voxels", extent, grid.len());
        Ok(LoadedModel { grid, palette: None })
    }

    fn encode(&self, grid: &VoxelGrid, _palette: &Palette) -> Result<Vec<u8>> {
        let extent = grid.extent();
        let IVec3 { x: width, y: height, z: depth } = extent.size();

        let mut out = String::with_capacity(capacity_hint(extent));
        let _ = writeln!(out, "{},{},{}", extent.width(), extent.height(), extent.depth());

        for y in (0..height).rev() {
            for z in 0..depth {
                for x in 0..width {
                    if x > 0 {
                        out.push(',');
                    }
                    match grid.get(IVec3::new(x, y, z)) {
                        Some(color) => {
                            let _ = write!(out, "{}", color);
                        }
                        None => out.push_str(EMPTY_CELL),
                    }
                }
                out.push('\n');
            }
            out.push('\n');
        }

        Ok(out.into_bytes())
    }
}

/// Upper bound on the up-front allocation for an encoded file
const MAX_CAPACITY_HINT: u64 = 64 * 1024 * 1024;

/// Expected output size: 10 bytes per cell ("#RRGGBBAA" plus separator) and a
/// newline per row and layer, capped so huge extents don't reserve it all at once
fn capacity_hint(extent: Extent) -> usize {
    let rows = u64::from(extent.height()).saturating_mul(u64::from(extent.depth()) + 1);
    let bytes = extent.volume().saturating_mul(10).saturating_add(rows).saturating_add(16);
    usize::try_from(bytes.min(MAX_CAPACITY_HINT)).unwrap_or(usize::MAX)
}

fn parse_header(line: &str) -> Result<Extent> {
    let dims: Vec<u32> = line
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::format(format!("invalid header '{}'", line)))?;
    match dims[..] {
        [width, height, depth] => Extent::new(width, height, depth)
            .map_err(|_| Error::format(format!("invalid dimensions '{}'", line))),
        _ => Err(Error::format(format!("header must have three dimensions, got '{}'", line))),
    }
}
