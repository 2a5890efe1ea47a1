//! Editor session: the composition root the UI layer talks to.
//!
//! Owns the grid, palette, tools and codecs. All interaction is serialized
//! through `&mut self`, so a codec never runs while a tool holds the grid.

use std::path::{Path, PathBuf};

use crate::core::Error;
use crate::core::config::SessionConfig;
use crate::core::types::Result;
use crate::io::{builtin_codecs, FileCodec};
use crate::math::Ray;
use crate::tool::{builtin_tools, EventData, PointerEvent, Target, Tool, ToolRegistry};
use crate::voxel::grid::{ObserverId, VoxelGrid};
use crate::voxel::palette::Palette;

pub struct EditorSession {
    config: SessionConfig,
    grid: VoxelGrid,
    palette: Palette,
    tools: ToolRegistry,
    codecs: Vec<Box<dyn FileCodec>>,
    /// File the model was last loaded from or saved to
    filename: Option<PathBuf>,
    /// Codec used for `filename`
    current_codec: Option<usize>,
}

impl EditorSession {
    /// Create a session with the built-in tools and codecs registered
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut session = Self::bare(config)?;
        for tool in builtin_tools() {
            session.register_tool(tool)?;
        }
        for codec in builtin_codecs(session.config.max_extent) {
            session.register_codec(codec);
        }
        Ok(session)
    }

    /// Create a session with no tools or codecs
    pub fn bare(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: VoxelGrid::new(config.default_extent),
            palette: Palette::new(config.palette.clone()),
            tools: ToolRegistry::new(),
            codecs: Vec::new(),
            filename: None,
            current_codec: None,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Direct grid access for UI operations such as resizing
    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn is_changed(&self) -> bool {
        self.grid.is_changed()
    }

    /// Window caption, e.g. "Zoxel - [model.zox] *"
    pub fn caption(&self) -> String {
        let mut caption = match &self.filename {
            Some(path) => format!("{} - [{}]", self.config.caption, path.display()),
            None => format!("{} - [Unsaved model]", self.config.caption),
        };
        if self.grid.is_changed() {
            caption.push_str(" *");
        }
        caption
    }

    /// Subscribe to grid mutations
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> ObserverId {
        self.grid.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.grid.unsubscribe(id)
    }

    // --- Tools ---

    pub fn register_tool(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        self.tools.register(tool)
    }

    pub fn activate_tool(&mut self, id: &str) -> Result<()> {
        self.tools.activate(id)
    }

    /// Pointer pressed. Returns whether the grid changed.
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> bool {
        let Some(target) = event.target else {
            self.tools.set_last_target(None);
            self.tools.end_stroke();
            return false;
        };
        let mut data = EventData {
            target,
            button: event.button,
            modifiers: event.modifiers,
            grid: &mut self.grid,
            palette: &mut self.palette,
        };
        self.tools.dispatch_click(&mut data)
    }

    /// Pointer dragged with a button held. Returns whether the grid changed.
    pub fn on_pointer_drag(&mut self, event: PointerEvent) -> bool {
        let Some(target) = event.target else {
            self.tools.set_last_target(None);
            return false;
        };
        let mut data = EventData {
            target,
            button: event.button,
            modifiers: event.modifiers,
            grid: &mut self.grid,
            palette: &mut self.palette,
        };
        self.tools.dispatch_drag(&mut data)
    }

    /// Pointer released: ends the current stroke
    pub fn on_pointer_up(&mut self) {
        self.tools.end_stroke();
    }

    /// Pointer moved without a button held
    pub fn on_pointer_move(&mut self, target: Option<Target>) {
        self.tools.set_last_target(target);
    }

    /// Pick the voxel under `ray` in the current grid
    pub fn pick(&self, ray: &Ray) -> Option<Target> {
        ray.pick(&self.grid)
    }

    // --- Files ---

    /// Append a codec. Earlier codecs win when several match a path.
    pub fn register_codec(&mut self, codec: Box<dyn FileCodec>) {
        log::debug!("Registered codec '{}'", codec.id());
        self.codecs.push(codec);
    }

    pub fn codecs(&self) -> impl Iterator<Item = &dyn FileCodec> + '_ {
        self.codecs.iter().map(|codec| codec.as_ref())
    }

    pub fn codec(&self, id: &str) -> Option<&dyn FileCodec> {
        self.codec_index(id).ok().map(|index| self.codecs[index].as_ref())
    }

    /// Codec associated with the current file
    pub fn current_codec(&self) -> Option<&dyn FileCodec> {
        self.current_codec.map(|index| self.codecs[index].as_ref())
    }

    /// Id of the first codec whose extension matches `path`
    pub fn codec_for_path(&self, path: &Path) -> Option<&str> {
        self.codecs
            .iter()
            .find(|codec| codec.matches_path(path))
            .map(|codec| codec.id())
    }

    /// Id of the codec whose dialog filter is `filter`
    pub fn codec_for_filter(&self, filter: &str) -> Option<&str> {
        self.codecs
            .iter()
            .find(|codec| codec.filter() == filter)
            .map(|codec| codec.id())
    }

    /// Dialog filters for codecs able to save (or load)
    pub fn file_filters(&self, for_save: bool) -> Vec<String> {
        self.codecs
            .iter()
            .filter(|codec| if for_save { codec.can_save() } else { codec.can_load() })
            .map(|codec| codec.filter())
            .collect()
    }

    /// Discard the model and start an empty one at the default extent
    pub fn new_model(&mut self) {
        self.grid.clear_all();
        self.grid.resize(self.config.default_extent);
        self.grid.saved();
        self.filename = None;
        self.current_codec = None;
        self.tools.end_stroke();
        log::info!("New model {}", self.config.default_extent);
    }

    /// Load `path` with codec `codec_id`.
    ///
    /// On failure the current model, palette and filename are left untouched.
    pub fn load(&mut self, path: &Path, codec_id: &str) -> Result<()> {
        let index = self.codec_index(codec_id)?;
        let model = self.codecs[index].load(path)?;

        self.grid.replace_with(model.grid);
        self.grid.saved();
        if let Some(palette) = model.palette {
            self.palette = palette;
        }
        self.filename = Some(path.to_path_buf());
        self.current_codec = Some(index);
        self.tools.end_stroke();
        Ok(())
    }

    /// Load `path`, choosing the codec by extension
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let id = self.require_codec_for_path(path)?;
        self.load(path, &id)
    }

    /// Save to `path` with codec `codec_id` and make it the current file
    pub fn save(&mut self, path: &Path, codec_id: &str) -> Result<()> {
        let index = self.codec_index(codec_id)?;
        self.codecs[index].save(&self.grid, &self.palette, path)?;

        self.grid.saved();
        self.filename = Some(path.to_path_buf());
        self.current_codec = Some(index);
        Ok(())
    }

    /// Save to `path`, choosing the codec by extension
    pub fn save_path(&mut self, path: &Path) -> Result<()> {
        let id = self.require_codec_for_path(path)?;
        self.save(path, &id)
    }

    /// Save to the current file with its codec
    pub fn save_current(&mut self) -> Result<()> {
        let (Some(path), Some(index)) = (self.filename.clone(), self.current_codec) else {
            return Err(Error::UnknownCodec("model has no current file".to_string()));
        };
        let id = self.codecs[index].id().to_string();
        self.save(&path, &id)
    }

    fn codec_index(&self, id: &str) -> Result<usize> {
        self.codecs
            .iter()
            .position(|codec| codec.id() == id)
            .ok_or_else(|| Error::UnknownCodec(id.to_string()))
    }

    fn require_codec_for_path(&self, path: &Path) -> Result<String> {
        self.codec_for_path(path)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownCodec(path.display().to_string()))
    }
}
