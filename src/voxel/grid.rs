//! Sparse color voxel grid with change tracking.
//!
//! The grid stores only occupied coordinates. Every mutation marks the grid
//! as changed, bumps a generation counter and synchronously invokes the
//! registered observers in registration order. Observers get no access to
//! the grid, so they cannot mutate it while a notification is in flight.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::{IVec3, Result};
use super::color::Color;

/// Bounding dimensions of a grid. All axes are at least 1 and at most `i32::MAX`.
///
/// Fields are private so every extent goes through [`Extent::new`], including
/// deserialized ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ExtentRecord", into = "ExtentRecord")]
pub struct Extent {
    width: u32,
    height: u32,
    depth: u32,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct ExtentRecord {
    width: u32,
    height: u32,
    depth: u32,
}

impl TryFrom<ExtentRecord> for Extent {
    type Error = Error;

    fn try_from(record: ExtentRecord) -> Result<Self> {
        Extent::new(record.width, record.height, record.depth)
    }
}

impl From<Extent> for ExtentRecord {
    fn from(extent: Extent) -> Self {
        Self { width: extent.width, height: extent.height, depth: extent.depth }
    }
}

impl Extent {
    /// 32 on every axis
    pub const DEFAULT: Extent = Extent { width: 32, height: 32, depth: 32 };

    /// Largest model accepted from files unless configured otherwise
    pub const MAX_IMPORT: Extent = Extent { width: 127, height: 127, depth: 127 };

    /// Create an extent, rejecting zero-sized or unaddressable axes
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        let limit = i32::MAX as u32;
        let valid = |n: u32| n > 0 && n <= limit;
        if valid(width) && valid(height) && valid(depth) {
            Ok(Self { width, height, depth })
        } else {
            Err(Error::InvalidExtent { width, height, depth })
        }
    }

    /// Cube extent with the same size on every axis
    pub fn cube(size: u32) -> Result<Self> {
        Self::new(size, size, size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Dimensions as a vector; every axis fits in `i32`
    pub fn size(&self) -> IVec3 {
        IVec3::new(self.width as i32, self.height as i32, self.depth as i32)
    }

    /// Check if a coordinate lies within `[0, w) x [0, h) x [0, d)`
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height
            && (pos.z as u32) < self.depth
    }

    /// Total number of cells, saturating at `u64::MAX`
    pub fn volume(&self) -> u64 {
        u64::from(self.width)
            .saturating_mul(u64::from(self.height))
            .saturating_mul(u64::from(self.depth))
    }

    /// Check if every axis fits within `max`
    pub fn fits_within(&self, max: &Extent) -> bool {
        self.width <= max.width && self.height <= max.height && self.depth <= max.depth
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Handle returned by [`VoxelGrid::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut()>;

/// Sparse mapping from in-extent coordinates to colors
pub struct VoxelGrid {
    extent: Extent,
    voxels: HashMap<IVec3, Color>,
    /// Mutated since the last `saved()`
    changed: bool,
    /// Incremented on every mutation
    generation: u64,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl VoxelGrid {
    /// Create an empty, unchanged grid
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            voxels: HashMap::new(),
            changed: false,
            generation: 0,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Color at `pos`, or `None` if empty or out of range
    pub fn get(&self, pos: IVec3) -> Option<Color> {
        self.voxels.get(&pos).copied()
    }

    /// Check if a voxel exists at `pos`
    pub fn is_occupied(&self, pos: IVec3) -> bool {
        self.voxels.contains_key(&pos)
    }

    /// Store `color` at `pos`.
    ///
    /// Storing [`Color::CLEAR`] behaves like [`VoxelGrid::clear`].
    pub fn set(&mut self, pos: IVec3, color: Color) -> Result<()> {
        if !self.extent.contains(pos) {
            return Err(Error::OutOfBounds { x: pos.x, y: pos.y, z: pos.z });
        }
        if color.is_clear() {
            self.clear(pos);
            return Ok(());
        }
        self.voxels.insert(pos, color);
        self.mark_changed();
        Ok(())
    }

    /// Remove the voxel at `pos`. Returns whether one was removed.
    ///
    /// Clearing an empty coordinate leaves the changed flag alone.
    pub fn clear(&mut self, pos: IVec3) -> bool {
        let removed = self.voxels.remove(&pos).is_some();
        if removed {
            self.mark_changed();
        }
        removed
    }

    /// Remove every voxel
    pub fn clear_all(&mut self) {
        if !self.voxels.is_empty() {
            self.voxels.clear();
            self.mark_changed();
        }
    }

    /// Change the extent, dropping voxels that fall outside it
    pub fn resize(&mut self, extent: Extent) {
        let before = self.voxels.len();
        self.voxels.retain(|pos, _| extent.contains(*pos));
        let dropped = before - self.voxels.len();
        if dropped > 0 {
            log::debug!("Resize to {} dropped {} voxels", extent, dropped);
        }
        self.extent = extent;
        self.mark_changed();
    }

    /// Take the extent and voxels of `other`, keeping this grid's observers
    pub fn replace_with(&mut self, other: VoxelGrid) {
        self.extent = other.extent;
        self.voxels = other.voxels;
        self.mark_changed();
    }

    /// Reset the changed flag after a load or save
    pub fn saved(&mut self) {
        self.changed = false;
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Number of mutations since creation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of occupied voxels
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Occupied voxels in no particular order
    pub fn voxels(&self) -> impl Iterator<Item = (IVec3, Color)> + '_ {
        self.voxels.iter().map(|(pos, color)| (*pos, *color))
    }

    /// Occupied voxels ordered by z, then y, then x
    pub fn sorted_voxels(&self) -> Vec<(IVec3, Color)> {
        let mut voxels: Vec<_> = self.voxels().collect();
        voxels.sort_by_key(|(pos, _)| (pos.z, pos.y, pos.x));
        voxels
    }

    /// Copy of the extent and voxels, without observers
    pub fn snapshot(&self) -> VoxelGrid {
        Self {
            extent: self.extent,
            voxels: self.voxels.clone(),
            changed: self.changed,
            generation: self.generation,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Register a callback invoked after every mutation
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn mark_changed(&mut self) {
        self.changed = true;
        self.generation += 1;
        for (_, observer) in &mut self.observers {
            observer();
        }
    }
}

impl PartialEq for VoxelGrid {
    /// Grids are equal when extent and contents match; change state is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.extent == other.extent && self.voxels == other.voxels
    }
}

impl fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("extent", &self.extent)
            .field("voxels", &self.voxels.len())
            .field("changed", &self.changed)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish()
    }
}
