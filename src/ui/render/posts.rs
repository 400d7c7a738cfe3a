use super::widgets::spinner;
use super::Frame;
use crate::posts::{LoadState, Post, PostBrowser};
use crate::state::{InputTarget, State};
use crate::ui::{widgets::styling, Theme};
use crate::utils::text_processing;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "Posts";
const EMPTY_MESSAGE: &str = "No posts found.";
const RETRY_HINT: &str = "Press r to retry.";

/// Render the post browser: search input, list and pagination.
///
pub fn posts(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    search_input(frame, rows[0], state);
    list(frame, rows[1], state);
    pagination(frame, rows[2], state);
}

fn search_input(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let active = state.input_target() == Some(InputTarget::Search);

    let (block, content) = if active {
        (
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(&theme))
                .title(Span::styled(
                    "Search (Enter: search, Esc: cancel)",
                    styling::active_block_title_style(),
                )),
            Span::styled(
                format!("/{}▏", state.get_search_input()),
                styling::normal_text_style(&theme),
            ),
        )
    } else {
        let query = state.get_posts().query();
        let content = if query.is_empty() {
            Span::styled("Search posts...", styling::muted_text_style(&theme))
        } else {
            Span::styled(format!("/{}", query), styling::normal_text_style(&theme))
        };
        (
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(&theme))
                .title("Search (/)"),
            content,
        )
    };
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), size);
}

fn list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let browser = state.get_posts();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(&theme))
        .title(title(browser));

    match browser.load_state() {
        LoadState::Loading | LoadState::Idle => {
            frame.render_widget(spinner::widget(state, size.height).block(block), size);
            return;
        }
        LoadState::Failed(message) => {
            let text = vec![
                Line::from(Span::styled(message.clone(), styling::error_text_style(&theme))),
                Line::from(""),
                Line::from(Span::styled(RETRY_HINT, styling::muted_text_style(&theme))),
            ];
            let error = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(error, size);
            return;
        }
        LoadState::Loaded => {}
    }

    if browser.posts().is_empty() {
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .style(styling::muted_text_style(&theme))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, size);
        return;
    }

    let width = size.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = browser
        .posts()
        .iter()
        .map(|post| item(post, width, &theme))
        .collect();
    let list = List::new(items)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .block(block);

    frame.render_stateful_widget(list, size, state.get_posts_list_state());
}

fn title(browser: &PostBrowser) -> String {
    if browser.is_searching() {
        format!("{} matching \"{}\"", BLOCK_TITLE, browser.query())
    } else {
        BLOCK_TITLE.to_string()
    }
}

fn item(post: &Post, width: usize, theme: &Theme) -> ListItem<'static> {
    let heading = format!("#{} {}", post.id, post.title);
    ListItem::new(vec![
        Line::from(Span::styled(
            text_processing::truncate(&heading, width),
            styling::active_block_title_style().fg(theme.primary.to_color()),
        )),
        Line::from(Span::styled(
            text_processing::preview(&post.body, width),
            styling::muted_text_style(theme),
        )),
    ])
}

fn pagination(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let line = Line::from(Span::styled(
        pagination_label(state.get_posts()),
        styling::normal_text_style(&theme),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), size);
}

/// Return the text under the post list.
///
pub fn pagination_label(browser: &PostBrowser) -> String {
    if browser.is_searching() {
        return format!("{} results (c: clear search)", browser.posts().len());
    }
    let prev = if browser.has_prev_page() { "← h" } else { "   " };
    let next = if browser.has_next_page() { "l →" } else { "   " };
    match browser.page_count() {
        Some(count) => format!("{}  Page {} of {}  {}", prev, browser.page(), count, next),
        None => format!("{}  Page {}  {}", prev, browser.page(), next),
    }
}
