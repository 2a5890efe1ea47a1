//! Color selection state shared by tools

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Current drawing color plus the swatches offered to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Color new voxels are drawn and painted with
    pub current: Color,
    /// Swatch colors
    pub swatches: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(default_swatches())
    }
}

impl Palette {
    /// Create a palette whose current color is the first swatch (white if none)
    pub fn new(swatches: Vec<Color>) -> Self {
        let current = swatches.first().copied().unwrap_or(Color::WHITE);
        Self { current, swatches }
    }

    pub fn current(&self) -> Color {
        self.current
    }

    pub fn set_current(&mut self, color: Color) {
        self.current = color;
    }

    /// Make swatch `index` current. Returns false if there is no such swatch.
    pub fn select(&mut self, index: usize) -> bool {
        match self.swatches.get(index) {
            Some(&color) => {
                self.current = color;
                true
            }
            None => false,
        }
    }
}

/// Swatches offered by a fresh editor
pub fn default_swatches() -> Vec<Color> {
    vec![
        Color::WHITE,
        Color::BLACK,
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::rgb(255, 255, 0),
        Color::rgb(0, 255, 255),
        Color::rgb(255, 0, 255),
        Color::rgb(128, 128, 128),
        Color::rgb(139, 90, 43),
    ]
}
