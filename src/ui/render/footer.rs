use super::Frame;
use crate::state::{InputTarget, State, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the current view and input mode.
///
fn hints(state: &State) -> &'static str {
    match state.input_target() {
        Some(InputTarget::NewTask) => " Type the task, Enter: add, Esc: cancel",
        Some(InputTarget::Search) => " Type a query, Enter: search, Esc: cancel",
        None => match state.current_view() {
            View::Home => " Enter: get started, 1-3/Tab: views, t: theme, L: log, q: quit",
            View::Tasks => {
                " a: add, j/k: move, Space: toggle, d: delete, f: filter, t: theme, q: quit"
            }
            View::Posts => {
                " /: search, h/l: page, c: clear, r: retry, j/k: move, t: theme, q: quit"
            }
        },
    }
}

/// Render footer with the current mode and its key hints.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let (mode, mode_color) = if state.is_input_mode() {
        ("INPUT:", theme.footer_input)
    } else {
        ("NORMAL:", theme.footer_normal)
    };

    let controls = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.highlight_fg.to_color())
                .bg(mode_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints(state), Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls).alignment(Alignment::Left);

    let version = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.accent.to_color()),
    )]);
    let version_width = version.width();
    let version_widget = Paragraph::new(version).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(version_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(version_widget, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_follow_input_mode() {
        let mut state = State::default();
        state.set_view(View::Tasks);
        assert!(hints(&state).contains("a: add"));
        state.start_input(InputTarget::NewTask);
        assert!(hints(&state).contains("Enter: add"));
    }
}
