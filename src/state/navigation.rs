//! Navigation-related state types.
//!
//! This module contains the views reachable from the tab bar and the text
//! inputs that can capture the keyboard.

/// Specifying the different views.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum View {
    #[default]
    Home,
    Tasks,
    Posts,
}

impl View {
    /// Every view, in tab order.
    ///
    pub const ALL: [View; 3] = [View::Home, View::Tasks, View::Posts];

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Tasks => "Tasks",
            View::Posts => "Posts",
        }
    }

    /// Position of the view in the tab bar.
    ///
    pub fn index(&self) -> usize {
        match self {
            View::Home => 0,
            View::Tasks => 1,
            View::Posts => 2,
        }
    }

    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Specifies which text input currently captures the keyboard.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputTarget {
    NewTask,
    Search,
}
