//! Dark/light mode flag.
//!
//! The flag is persisted under `darkMode`. Whatever makes the mode visible
//! (the palette in the terminal front end) sits behind [`ApplyTheme`], and is
//! invoked exactly once on load and once per toggle.

use crate::storage::{Persisted, Store};
use log::*;

/// Storage key of the dark mode flag.
pub const THEME_KEY: &str = "darkMode";

/// Makes the visual mode match the flag. Must be idempotent.
///
pub trait ApplyTheme: Send {
    fn apply(&self, dark_mode: bool);
}

/// Persisted dark mode flag plus the effect applying it.
///
pub struct ThemeState {
    dark_mode: Persisted<bool>,
    applier: Box<dyn ApplyTheme>,
}

impl ThemeState {
    /// Load the flag (light by default) and apply it.
    ///
    pub fn load(store: &Store, applier: impl ApplyTheme + 'static) -> Self {
        let dark_mode = Persisted::load(store, THEME_KEY, false);
        let theme = ThemeState {
            dark_mode,
            applier: Box::new(applier),
        };
        debug!("Loaded {} mode.", theme.mode_name());
        theme.apply();
        theme
    }

    /// Return whether dark mode is on.
    ///
    pub fn get_theme(&self) -> bool {
        *self.dark_mode.get()
    }

    /// Flip the flag, persist it and apply it.
    ///
    pub fn toggle_theme(&mut self) {
        let dark_mode = !self.get_theme();
        self.dark_mode.set(dark_mode);
        info!("Switched to {} mode.", self.mode_name());
        self.apply();
    }

    /// Return "dark" or "light" for the current flag.
    ///
    pub fn mode_name(&self) -> &'static str {
        if self.get_theme() {
            "dark"
        } else {
            "light"
        }
    }

    fn apply(&self) {
        self.applier.apply(self.get_theme());
    }
}
