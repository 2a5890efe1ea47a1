//! Pointer input state carried by editing events

/// Pointer button that started the interaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during the interaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers held
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Copy with shift toggled
    pub fn with_shift(self, shift: bool) -> Self {
        Self { shift, ..self }
    }

    /// Copy with ctrl toggled
    pub fn with_ctrl(self, ctrl: bool) -> Self {
        Self { ctrl, ..self }
    }

    /// Copy with alt toggled
    pub fn with_alt(self, alt: bool) -> Self {
        Self { alt, ..self }
    }

    /// Check if any modifier is held
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_button() {
        assert_eq!(MouseButton::default(), MouseButton::Primary);
    }

    #[test]
    fn test_modifiers() {
        assert!(!KeyModifiers::NONE.any());
        let mods = KeyModifiers::NONE.with_shift(true);
        assert!(mods.shift);
        assert!(mods.any());
        assert!(!mods.with_shift(false).any());
    }
}
