//! Erase tool

use super::{EventData, Tool};

/// Removes the picked voxel
#[derive(Debug, Default)]
pub struct EraseTool;

impl EraseTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for EraseTool {
    fn id(&self) -> &str {
        "erase"
    }

    fn description(&self) -> &str {
        "Erase voxels"
    }

    fn on_mouse_click(&mut self, event: &mut EventData<'_>) -> bool {
        event.grid.clear(event.target.pos)
    }
}
