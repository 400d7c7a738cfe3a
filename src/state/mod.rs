//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data, built via `StateBuilder`
//! - Navigation types (View, InputTarget)
//! - The persisted dark mode flag (`ThemeState`)
//! - State error handling

mod error;
mod navigation;
pub mod theme;

pub use error::StateError;
pub use navigation::{InputTarget, View};
pub use theme::{ApplyTheme, ThemeState, THEME_KEY};

// State struct, builder and methods are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{State, StateBuilder};
