use super::{footer, home, log, navbar, posts, tasks, Frame};
use crate::state::{State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

const NAVBAR_HEIGHT: u16 = 3;
const LOG_HEIGHT: u16 = 8;
const FOOTER_HEIGHT: u16 = 1;

/// Render the whole screen according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let theme = state.get_theme();
    frame.render_widget(Block::default().style(styling::background_style(&theme)), size);

    let mut constraints = vec![Constraint::Length(NAVBAR_HEIGHT), Constraint::Min(6)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(FOOTER_HEIGHT));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    navbar(frame, rows[0], state);
    match state.current_view() {
        View::Home => home(frame, rows[1], state),
        View::Tasks => tasks(frame, rows[1], state),
        View::Posts => posts(frame, rows[1], state),
    }
    if state.is_log_visible() {
        log(frame, rows[2], state);
    }
    footer(frame, rows[rows.len() - 1], state);
}
