use crate::state::State;
use ratatui::{layout::Alignment, text::Text, widgets::Paragraph};

pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

const LABEL: &str = "Loading...";

/// Return the spinner frame for a spinner index.
///
pub fn frame(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}

/// Return a paragraph with the current spinner frame centered in an area of
/// the given height.
///
pub fn widget(state: &State, height: u16) -> Paragraph<'static> {
    let theme = state.get_theme();
    let padding = "\n".repeat((height / 2).saturating_sub(1) as usize);
    let text = Text::from(format!(
        "{}{} {}",
        padding,
        frame(state.get_spinner_index()),
        LABEL
    ));
    Paragraph::new(text)
        .style(super::styling::normal_text_style(&theme))
        .alignment(Alignment::Center)
}
