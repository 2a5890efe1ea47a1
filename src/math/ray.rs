//! Ray type and voxel picking

use crate::core::types::{IVec3, Vec3};
use crate::tool::Target;
use crate::voxel::face::Face;
use crate::voxel::grid::VoxelGrid;

/// A ray defined by origin and direction, in grid units
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction need not be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against the box `[min, max]`.
    /// Returns the entry parameter (clamped to 0) and the axis of the entry plane,
    /// or no axis when the origin already lies inside.
    pub fn enter_box(&self, min: Vec3, max: Vec3) -> Option<(f32, Option<usize>)> {
        let mut t_near = 0.0f32;
        let mut t_far = f32::INFINITY;
        let mut axis = None;

        for i in 0..3 {
            let o = self.origin[i];
            let d = self.direction[i];
            if d == 0.0 {
                if o < min[i] || o > max[i] {
                    return None;
                }
                continue;
            }
            let mut t0 = (min[i] - o) / d;
            let mut t1 = (max[i] - o) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_near {
                t_near = t0;
                axis = Some(i);
            }
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some((t_near, axis))
    }

    /// Walk the grid cell by cell (Amanatides & Woo) and return the first
    /// occupied voxel with the face the ray entered it through.
    pub fn pick(&self, grid: &VoxelGrid) -> Option<Target> {
        if self.direction == Vec3::ZERO {
            return None;
        }

        let extent = grid.extent();
        let size = extent.size();
        let (t_enter, enter_axis) = self.enter_box(Vec3::ZERO, size.as_vec3())?;

        let mut pos = self.at(t_enter).floor().as_ivec3().clamp(IVec3::ZERO, size - IVec3::ONE);
        let mut face = enter_axis.map(|axis| entry_face(axis, self.direction));

        let mut step = IVec3::ZERO;
        let mut t_max = Vec3::splat(f32::INFINITY);
        let mut t_delta = Vec3::splat(f32::INFINITY);
        for i in 0..3 {
            let d = self.direction[i];
            if d == 0.0 {
                continue;
            }
            step[i] = if d > 0.0 { 1 } else { -1 };
            let boundary = (if d > 0.0 { pos[i] + 1 } else { pos[i] }) as f32;
            t_max[i] = (boundary - self.origin[i]) / d;
            t_delta[i] = 1.0 / d.abs();
        }

        while extent.contains(pos) {
            if grid.is_occupied(pos) {
                return Some(Target { pos, face });
            }
            let axis = min_axis(t_max);
            pos[axis] += step[axis];
            t_max[axis] += t_delta[axis];
            face = Some(entry_face(axis, self.direction));
        }

        None
    }
}

/// Face of the voxel being entered when crossing a plane perpendicular to `axis`
fn entry_face(axis: usize, direction: Vec3) -> Face {
    let forward = direction[axis] > 0.0;
    match (axis, forward) {
        (0, true) => Face::NegX,
        (0, false) => Face::PosX,
        (1, true) => Face::NegY,
        (1, false) => Face::PosY,
        (_, true) => Face::NegZ,
        (_, false) => Face::PosZ,
    }
}

fn min_axis(v: Vec3) -> usize {
    if v.x <= v.y && v.x <= v.z {
        0
    } else if v.y <= v.z {
        1
    } else {
        2
    }
}
