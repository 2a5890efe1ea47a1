//! Paint tool: recolors existing voxels

use super::{EventData, Tool};

#[derive(Debug, Default)]
pub struct PaintTool;

impl PaintTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for PaintTool {
    fn id(&self) -> &str {
        "paint"
    }

    fn description(&self) -> &str {
        "Paint voxels"
    }

    fn on_mouse_click(&mut self, event: &mut EventData<'_>) -> bool {
        let pos = event.target.pos;
        if !event.grid.is_occupied(pos) {
            return false;
        }
        let color = event.color();
        event.set_voxel(pos, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyModifiers, MouseButton};
    use crate::core::types::IVec3;
    use crate::tool::Target;
    use crate::voxel::color::Color;
    use crate::voxel::face::Face;
    use crate::voxel::grid::{Extent, VoxelGrid};
    use crate::voxel::palette::Palette;

    fn click(grid: &mut VoxelGrid, palette: &mut Palette, target: Target) -> bool {
        let mut event = EventData {
            target,
            button: MouseButton::Primary,
            modifiers: KeyModifiers::NONE,
            grid,
            palette,
        };
        PaintTool::new().on_mouse_click(&mut event)
    }

    #[test]
    fn test_paint_occupied() {
        let mut grid = VoxelGrid::new(Extent::cube(4).unwrap());
        let mut palette = Palette::new(vec![Color::BLUE]);
        grid.set(IVec3::new(2, 2, 2), Color::RED).unwrap();

        for face in [Some(Face::NegZ), None] {
            grid.set(IVec3::new(2, 2, 2), Color::RED).unwrap();
            assert!(click(&mut grid, &mut palette, Target::new(IVec3::new(2, 2, 2), face)));
            assert_eq!(grid.get(IVec3::new(2, 2, 2)), Some(Color::BLUE));
        }
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_paint_empty_is_noop() {
        let mut grid = VoxelGrid::new(Extent::cube(4).unwrap());
        let mut palette = Palette::new(vec![Color::BLUE]);
        assert!(!click(&mut grid, &mut palette, Target::new(IVec3::new(2, 2, 2), None)));
        assert!(grid.is_empty());
        assert!(!grid.is_changed());
    }
}
