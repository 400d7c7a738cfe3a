use super::Frame;
use crate::state::State;
use crate::tasks::TaskFilter;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const BANNER: &str = "
  _             _     _           _
 | |_ __ _  ___| | __| |__  _   _| |__
 | __/ _` |/ __| |/ /| '_ \\| | | | '_ \\
 | || (_| |\\__ \\   < | | | | |_| | |_) |
  \\__\\__,_||___/_|\\_\\|_| |_|\\__,_|_.__/
";

const INTRO: &str = "Keep a local task list and browse posts from a public API.";

/// Render the home view.
///
pub fn home(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Home")
        .border_style(styling::active_block_border_style(&theme));
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .margin(2)
        .split(size);

    let banner = Paragraph::new(BANNER).style(styling::banner_style(&theme));
    frame.render_widget(banner, rows[0]);

    let tasks = state.get_tasks();
    let content = vec![
        Line::from(Span::styled(INTRO, styling::normal_text_style(&theme))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} tasks, {} active, {} completed",
                tasks.len(),
                tasks.count(TaskFilter::Active),
                tasks.count(TaskFilter::Completed)
            ),
            styling::muted_text_style(&theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to get started.",
            styling::active_block_title_style().fg(theme.primary.to_color()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(content).wrap(Wrap { trim: true }),
        rows[1],
    );
}
