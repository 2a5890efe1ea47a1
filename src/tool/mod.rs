//! Editing tools driven by pointer events.
//!
//! A tool turns a picked voxel (and the face under the pointer) into grid
//! mutations. Tools are registered with a [`ToolRegistry`]; exactly one is
//! active at a time. Interaction misses are silent no-ops: handlers report
//! whether they changed the grid instead of returning errors.

pub mod registry;
pub mod draw;
pub mod paint;
pub mod erase;
pub mod shade;

pub use registry::ToolRegistry;
pub use draw::DrawTool;
pub use paint::PaintTool;
pub use erase::EraseTool;
pub use shade::ShadeTool;

use crate::core::input::{KeyModifiers, MouseButton};
use crate::core::types::IVec3;
use crate::voxel::color::Color;
use crate::voxel::face::Face;
use crate::voxel::grid::VoxelGrid;
use crate::voxel::palette::Palette;

/// Voxel under the pointer, as reported by a ray pick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    /// Picked voxel coordinate
    pub pos: IVec3,
    /// Face struck, or `None` when the pick landed in empty space
    pub face: Option<Face>,
}

impl Target {
    pub fn new(pos: IVec3, face: Option<Face>) -> Self {
        Self { pos, face }
    }

    /// Coordinate one step out of the picked face.
    ///
    /// `None` without a face, or when the step leaves the `i32` range.
    pub fn adjacent(&self) -> Option<IVec3> {
        self.face.and_then(|face| face.adjacent(self.pos))
    }
}

/// Pointer interaction forwarded by the UI layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pick result, `None` when the pointer is off the grid entirely
    pub target: Option<Target>,
    pub button: MouseButton,
    pub modifiers: KeyModifiers,
}

impl PointerEvent {
    pub fn new(target: Option<Target>, button: MouseButton) -> Self {
        Self {
            target,
            button,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(self, modifiers: KeyModifiers) -> Self {
        Self { modifiers, ..self }
    }
}

/// Per-event view handed to a tool. Borrows are released when the handler returns.
pub struct EventData<'a> {
    pub target: Target,
    pub button: MouseButton,
    pub modifiers: KeyModifiers,
    pub grid: &'a mut VoxelGrid,
    pub palette: &'a mut Palette,
}

impl EventData<'_> {
    /// Current palette color
    pub fn color(&self) -> Color {
        self.palette.current()
    }

    /// Store `color` at `pos`. Returns whether a voxel of that color is now there.
    pub fn set_voxel(&mut self, pos: IVec3, color: Color) -> bool {
        self.grid.set(pos, color).is_ok() && self.grid.get(pos) == Some(color)
    }
}

/// An editing tool
pub trait Tool {
    /// Stable identifier used for activation
    fn id(&self) -> &str;

    /// Short human readable description
    fn description(&self) -> &str {
        ""
    }

    /// Called when the tool becomes active, with the last known pointer target
    fn on_activate(&mut self, _target: Option<Target>) {}

    /// Called when another tool takes over
    fn on_deactivate(&mut self) {}

    /// Handle a pointer press. Returns whether the grid was changed.
    fn on_mouse_click(&mut self, event: &mut EventData<'_>) -> bool;

    /// Handle a pointer drag following a click on this tool
    fn on_drag(&mut self, event: &mut EventData<'_>) -> bool {
        self.on_mouse_click(event)
    }
}

/// The built-in tools in toolbar order
pub fn builtin_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(DrawTool::new()),
        Box::new(PaintTool::new()),
        Box::new(EraseTool::new()),
        Box::new(ShadeTool::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::grid::Extent;

    #[test]
    fn test_target_adjacent() {
        let target = Target::new(IVec3::new(1, 1, 1), Some(Face::PosY));
        assert_eq!(target.adjacent(), Some(IVec3::new(1, 2, 1)));
        assert_eq!(Target::new(IVec3::ZERO, None).adjacent(), None);
    }

    #[test]
    fn test_set_voxel_reports_change() {
        let mut grid = VoxelGrid::new(Extent::cube(2).unwrap());
        let mut palette = Palette::default();
        let mut event = EventData {
            target: Target::new(IVec3::ZERO, None),
            button: MouseButton::Primary,
            modifiers: KeyModifiers::NONE,
            grid: &mut grid,
            palette: &mut palette,
        };
        assert!(event.set_voxel(IVec3::ZERO, Color::RED));
        assert!(!event.set_voxel(IVec3::new(2, 0, 0), Color::RED));
        assert!(!event.set_voxel(IVec3::ZERO, Color::CLEAR));
        assert_eq!(grid.get(IVec3::ZERO), None);
    }

    #[test]
    fn test_builtin_ids() {
        let ids: Vec<String> = builtin_tools().iter().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, vec!["draw", "paint", "erase", "shade"]);
    }
}
