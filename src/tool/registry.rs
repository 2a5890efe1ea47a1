//! Tool registration and dispatch

use crate::core::Error;
use crate::core::types::Result;
use super::{EventData, Target, Tool};

/// Ordered set of tools with exactly one active once any is registered.
///
/// Drags are only delivered to the tool that received the originating
/// click; switching tools or ending the stroke drops the rest of the drag.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    /// Index of the active tool
    active: Option<usize>,
    /// Index of the tool that received the current stroke's click
    stroke: Option<usize>,
    /// Last pointer target seen, handed to newly activated tools
    last_target: Option<Target>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tool. The first registered tool becomes active.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        if self.position(tool.id()).is_some() {
            return Err(Error::DuplicateTool(tool.id().to_string()));
        }
        log::debug!("Registered tool '{}'", tool.id());
        self.tools.push(tool);
        if self.active.is_none() {
            let index = self.tools.len() - 1;
            self.active = Some(index);
            self.tools[index].on_activate(self.last_target);
        }
        Ok(())
    }

    /// Append a tool and make it active
    pub fn register_default(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        let id = tool.id().to_string();
        self.register(tool)?;
        self.activate(&id)
    }

    /// Make `id` the active tool, deactivating the previous one
    pub fn activate(&mut self, id: &str) -> Result<()> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::UnknownTool(id.to_string()))?;
        if self.active == Some(index) {
            return Ok(());
        }

        if let Some(previous) = self.active {
            self.tools[previous].on_deactivate();
        }
        self.active = Some(index);
        self.stroke = None;
        self.tools[index].on_activate(self.last_target);
        log::debug!("Activated tool '{}'", id);
        Ok(())
    }

    /// Forward a pointer press to the active tool and start a stroke
    pub fn dispatch_click(&mut self, event: &mut EventData<'_>) -> bool {
        self.last_target = Some(event.target);
        let Some(index) = self.active else {
            return false;
        };
        self.stroke = Some(index);
        self.tools[index].on_mouse_click(event)
    }

    /// Forward a drag to the active tool if it received the stroke's click
    pub fn dispatch_drag(&mut self, event: &mut EventData<'_>) -> bool {
        self.last_target = Some(event.target);
        match (self.active, self.stroke) {
            (Some(active), Some(stroke)) if active == stroke => self.tools[active].on_drag(event),
            _ => false,
        }
    }

    /// End the current stroke; further drags are ignored until the next click
    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    /// Record where the pointer is without interacting
    pub fn set_last_target(&mut self, target: Option<Target>) {
        self.last_target = target;
    }

    pub fn last_target(&self) -> Option<Target> {
        self.last_target
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|index| self.tools[index].id())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// Tool identifiers in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tools.iter().map(|tool| tool.id())
    }

    /// Identifier and description of each tool, in registration order
    pub fn descriptions(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.tools.iter().map(|tool| (tool.id(), tool.description()))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tools.iter().position(|tool| tool.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::core::input::{KeyModifiers, MouseButton};
    use crate::core::types::IVec3;
    use crate::voxel::grid::{Extent, VoxelGrid};
    use crate::voxel::palette::Palette;

    /// Records every callback it receives
    struct Probe {
        id: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn boxed(id: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Tool> {
            Box::new(Probe { id, log: Rc::clone(log) })
        }
    }

    impl Tool for Probe {
        fn id(&self) -> &str {
            self.id
        }

        fn on_activate(&mut self, target: Option<Target>) {
            let pos = target.map(|t| t.pos.x).unwrap_or(-1);
            self.log.borrow_mut().push(format!("{}:activate:{}", self.id, pos));
        }

        fn on_deactivate(&mut self) {
            self.log.borrow_mut().push(format!("{}:deactivate", self.id));
        }

        fn on_mouse_click(&mut self, _event: &mut EventData<'_>) -> bool {
            self.log.borrow_mut().push(format!("{}:click", self.id));
            true
        }

        fn on_drag(&mut self, _event: &mut EventData<'_>) -> bool {
            self.log.borrow_mut().push(format!("{}:drag", self.id));
            true
        }
    }

    struct Fixture {
        grid: VoxelGrid,
        palette: Palette,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                grid: VoxelGrid::new(Extent::cube(4).unwrap()),
                palette: Palette::default(),
            }
        }

        fn event(&mut self, x: i32) -> EventData<'_> {
            EventData {
                target: Target::new(IVec3::new(x, 0, 0), None),
                button: MouseButton::Primary,
                modifiers: KeyModifiers::NONE,
                grid: &mut self.grid,
                palette: &mut self.palette,
            }
        }
    }

    fn entries(log: &Rc<RefCell<Vec<String>>>) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn test_first_registered_is_active() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        assert!(registry.active_id().is_none());

        registry.register(Probe::boxed("a", &log)).unwrap();
        registry.register(Probe::boxed("b", &log)).unwrap();

        assert!(registry.is_active("a"));
        assert!(!registry.is_active("b"));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(entries(&log), vec!["a:activate:-1"]);
    }

    #[test]
    fn test_register_default() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Probe::boxed("a", &log)).unwrap();
        registry.register_default(Probe::boxed("b", &log)).unwrap();
        assert_eq!(registry.active_id(), Some("b"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Probe::boxed("a", &log)).unwrap();
        let result = registry.register(Probe::boxed("a", &log));
        assert!(matches!(result, Err(Error::DuplicateTool(id)) if id == "a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_activate_unknown() {
        let mut registry = ToolRegistry::new();
        assert!(matches!(registry.activate("nope"), Err(Error::UnknownTool(_))));
    }

    #[test]
    fn test_activation_is_exclusive() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Probe::boxed("a", &log)).unwrap();
        registry.register(Probe::boxed("b", &log)).unwrap();
        entries(&log);

        let mut fixture = Fixture::new();
        registry.dispatch_click(&mut fixture.event(3));
        registry.activate("b").unwrap();

        assert!(registry.is_active("b"));
        assert!(!registry.is_active("a"));
        assert_eq!(entries(&log), vec!["a:click", "a:deactivate", "b:activate:3"]);

        // Reactivating the active tool does nothing
        registry.activate("b").unwrap();
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_drag_requires_click_on_same_tool() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Probe::boxed("a", &log)).unwrap();
        registry.register(Probe::boxed("b", &log)).unwrap();
        let mut fixture = Fixture::new();

        // No click yet
        assert!(!registry.dispatch_drag(&mut fixture.event(0)));

        registry.dispatch_click(&mut fixture.event(0));
        assert!(registry.dispatch_drag(&mut fixture.event(1)));

        // Switching tools drops the stroke
        registry.activate("b").unwrap();
        assert!(!registry.dispatch_drag(&mut fixture.event(2)));

        registry.dispatch_click(&mut fixture.event(2));
        assert!(registry.dispatch_drag(&mut fixture.event(3)));

        registry.end_stroke();
        assert!(!registry.dispatch_drag(&mut fixture.event(3)));

        assert_eq!(
            entries(&log),
            vec!["a:activate:-1", "a:click", "a:drag", "a:deactivate", "b:activate:1", "b:click", "b:drag"]
        );
    }

    #[test]
    fn test_hover_target_passed_on_activate() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(Probe::boxed("a", &log)).unwrap();
        registry.register(Probe::boxed("b", &log)).unwrap();
        entries(&log);

        registry.set_last_target(Some(Target::new(IVec3::new(2, 0, 0), None)));
        registry.activate("b").unwrap();
        assert_eq!(entries(&log), vec!["a:deactivate", "b:activate:2"]);
    }
}
