//! Voxel faces

use crate::core::types::IVec3;

/// One of the six axis-aligned faces of a voxel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Unit vector pointing out of the voxel through this face
    pub fn normal(self) -> IVec3 {
        match self {
            Face::PosX => IVec3::X,
            Face::NegX => IVec3::NEG_X,
            Face::PosY => IVec3::Y,
            Face::NegY => IVec3::NEG_Y,
            Face::PosZ => IVec3::Z,
            Face::NegZ => IVec3::NEG_Z,
        }
    }

    /// Face whose normal is `normal`, if it is a unit axis vector
    pub fn from_normal(normal: IVec3) -> Option<Face> {
        Self::ALL.into_iter().find(|face| face.normal() == normal)
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Neighbouring coordinate across this face, `None` if it is not representable
    pub fn adjacent(self, pos: IVec3) -> Option<IVec3> {
        let normal = self.normal();
        Some(IVec3::new(
            pos.x.checked_add(normal.x)?,
            pos.y.checked_add(normal.y)?,
            pos.z.checked_add(normal.z)?,
        ))
    }
}
