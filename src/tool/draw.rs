//! Draw tool: places voxels against the picked face

use super::{EventData, Tool};

/// Adds a voxel next to the picked face, never overwriting an existing one
#[derive(Debug, Default)]
pub struct DrawTool;

impl DrawTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for DrawTool {
    fn id(&self) -> &str {
        "draw"
    }

    fn description(&self) -> &str {
        "Draw voxels"
    }

    fn on_mouse_click(&mut self, event: &mut EventData<'_>) -> bool {
        let Some(pos) = event.target.adjacent() else {
            return false;
        };
        // Sweeping across a surface must not recolor voxels already placed
        if event.grid.is_occupied(pos) {
            return false;
        }
        let color = event.color();
        event.set_voxel(pos, color)
    }
}
