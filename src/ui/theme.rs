use crate::state::ApplyTheme;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_input: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Theme {
    /// Return the palette for the given mode.
    ///
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::tokyo_night()
        } else {
            Self::rose_pine_dawn()
        }
    }

    /// Rose Pine Dawn theme, used for light mode.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::new(161, 119, 255),    // Purple
            accent: ColorSpec::new(255, 109, 146),     // Pink
            banner: ColorSpec::new(255, 109, 146),     // Pink
            text: ColorSpec::new(88, 82, 96),          // Text
            text_muted: ColorSpec::new(152, 147, 165), // Muted
            background: ColorSpec::new(250, 244, 237), // Base
            surface: ColorSpec::new(255, 250, 243),    // Surface
            success: ColorSpec::new(59, 247, 209),     // Pine
            warning: ColorSpec::new(255, 210, 0),      // Gold
            error: ColorSpec::new(235, 111, 146),      // Love
            border_active: ColorSpec::new(161, 119, 255),
            border_normal: ColorSpec::new(88, 82, 96),
            highlight_bg: ColorSpec::new(61, 174, 233), // Foam
            highlight_fg: ColorSpec::new(0, 0, 0),
            footer_input: ColorSpec::new(255, 210, 0),
            footer_normal: ColorSpec::new(61, 174, 233),
        }
    }

    /// Tokyo Night theme, used for dark mode.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::new(125, 207, 255),    // Blue
            accent: ColorSpec::new(255, 159, 196),     // Magenta
            banner: ColorSpec::new(255, 159, 196),     // Magenta
            text: ColorSpec::new(169, 177, 214),       // Foreground
            text_muted: ColorSpec::new(117, 121, 148), // Comment
            background: ColorSpec::new(26, 27, 38),    // Background
            surface: ColorSpec::new(36, 40, 59),       // Selection
            success: ColorSpec::new(158, 206, 106),    // Green
            warning: ColorSpec::new(255, 202, 40),     // Yellow
            error: ColorSpec::new(247, 118, 142),      // Red
            border_active: ColorSpec::new(125, 207, 255),
            border_normal: ColorSpec::new(117, 121, 148),
            highlight_bg: ColorSpec::new(125, 207, 255),
            highlight_fg: ColorSpec::new(26, 27, 38),
            footer_input: ColorSpec::new(255, 202, 40),
            footer_normal: ColorSpec::new(125, 207, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::rose_pine_dawn()
    }
}

/// Shared handle on the palette the renderer draws with.
///
/// Applying a mode swaps the palette in place, so every clone of the handle
/// sees the change on the next frame.
#[derive(Clone, Debug, Default)]
pub struct Appearance {
    palette: Arc<RwLock<Theme>>,
}

impl Appearance {
    pub fn new() -> Self {
        Appearance::default()
    }

    /// Return a copy of the current palette.
    ///
    pub fn palette(&self) -> Theme {
        match self.palette.read() {
            Ok(theme) => theme.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ApplyTheme for Appearance {
    fn apply(&self, dark_mode: bool) {
        let theme = Theme::for_mode(dark_mode);
        match self.palette.write() {
            Ok(mut palette) => *palette = theme,
            Err(poisoned) => *poisoned.into_inner() = theme,
        }
    }
}
