use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph, Tabs},
};

const THEME_BUTTON_WIDTH: u16 = 14;

/// Render the tab bar with the theme toggle on its right.
///
pub fn navbar(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(THEME_BUTTON_WIDTH)])
        .split(size);

    let titles = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()));
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(&theme))
                .title(Span::styled(
                    env!("CARGO_PKG_NAME"),
                    styling::banner_style(&theme),
                )),
        )
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .select(state.current_view().index());
    frame.render_widget(tabs, columns[0]);

    let button = Paragraph::new(theme_label(state.is_dark_mode()))
        .alignment(Alignment::Center)
        .style(styling::normal_text_style(&theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(&theme))
                .title("t"),
        );
    frame.render_widget(button, columns[1]);
}

/// Return the theme button label for the current mode.
///
pub fn theme_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "🌙 Dark"
    } else {
        "🌞 Light"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_follows_mode() {
        assert_eq!("🌞 Light", theme_label(false));
        assert_eq!("🌙 Dark", theme_label(true));
    }
}
