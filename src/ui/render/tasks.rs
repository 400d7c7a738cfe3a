use super::Frame;
use crate::state::{InputTarget, State};
use crate::tasks::{Task, TaskFilter};
use crate::ui::{widgets::styling, Theme};
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const INPUT_PLACEHOLDER: &str = "What needs to be done?";

/// Render the task list view: input, filter bar and list.
///
pub fn tasks(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(size);

    input(frame, rows[0], state);
    filter_bar(frame, rows[1], state);
    list(frame, rows[2], state);
}

fn input(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let active = state.input_target() == Some(InputTarget::NewTask);
    let draft = state.get_task_input();

    let mut block = Block::default().borders(Borders::ALL);
    block = if active {
        block
            .border_style(styling::active_block_border_style(&theme))
            .title(Span::styled(
                "New task (Enter: add, Esc: cancel)",
                styling::active_block_title_style(),
            ))
    } else {
        block
            .border_style(styling::normal_block_border_style(&theme))
            .title("New task (a)")
    };

    let content = if draft.is_empty() && !active {
        Span::styled(INPUT_PLACEHOLDER, styling::muted_text_style(&theme))
    } else if active {
        Span::styled(format!("{}▏", draft), styling::normal_text_style(&theme))
    } else {
        Span::styled(draft.to_string(), styling::normal_text_style(&theme))
    };
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), size);
}

fn filter_bar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let current = state.get_task_filter();
    let tasks = state.get_tasks();

    let mut spans = vec![Span::styled(" Filter (f): ", styling::muted_text_style(&theme))];
    for filter in TaskFilter::ALL {
        let style = if filter == current {
            styling::active_list_item_style(&theme)
        } else {
            styling::normal_text_style(&theme)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!(
            "  {} active, {} completed",
            tasks.count(TaskFilter::Active),
            tasks.count(TaskFilter::Completed)
        ),
        styling::muted_text_style(&theme),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}

fn list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let filter = state.get_task_filter();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(&theme))
        .title(format!("Tasks ({})", filter));

    let visible = state.visible_tasks();
    if visible.is_empty() {
        let message = match filter {
            TaskFilter::All => "No tasks yet. Press a to add one.".to_string(),
            _ => format!("No {} tasks.", filter),
        };
        let empty = Paragraph::new(message)
            .style(styling::muted_text_style(&theme))
            .block(block);
        frame.render_widget(empty, size);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|task| item(task, &theme)).collect();
    let list = List::new(items)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .block(block);

    frame.render_stateful_widget(list, size, state.get_tasks_list_state());
}

fn item(task: &Task, theme: &Theme) -> ListItem<'static> {
    let (checkbox, text_style) = if task.completed {
        ("[x] ", styling::completed_text_style(theme))
    } else {
        ("[ ] ", styling::normal_text_style(theme))
    };
    ListItem::new(Line::from(vec![
        Span::styled(checkbox, styling::normal_text_style(theme)),
        Span::styled(task.text.clone(), text_style),
        Span::styled(
            format!("  {}", created_label(&task.created_at)),
            styling::muted_text_style(theme),
        ),
    ]))
}

/// Format a stored creation timestamp for display in local time.
///
fn created_label(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(date) => date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => created_at.to_string(),
    }
}
