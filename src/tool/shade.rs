//! Shade tool: primary button darkens, secondary lightens

use crate::core::input::MouseButton;
use super::{EventData, Tool};

/// Darkens or lightens the picked voxel by 10% per event.
///
/// The voxel's color before shading becomes the palette color, so a
/// following paint stroke picks up the shade being adjusted.
#[derive(Debug, Default)]
pub struct ShadeTool;

impl ShadeTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for ShadeTool {
    fn id(&self) -> &str {
        "shade"
    }

    fn description(&self) -> &str {
        "Adjust voxel darkness a little"
    }

    fn on_mouse_click(&mut self, event: &mut EventData<'_>) -> bool {
        let pos = event.target.pos;
        let Some(color) = event.grid.get(pos) else {
            return false;
        };
        event.palette.set_current(color);

        let shaded = match event.button {
            MouseButton::Primary => color.darker(),
            MouseButton::Secondary => color.lighter(),
            MouseButton::Middle => return false,
        };
        // Darkening a transparent voxel can reach the clear sentinel, which would delete it
        if shaded.is_clear() {
            return false;
        }
        event.set_voxel(pos, shaded)
    }
}
