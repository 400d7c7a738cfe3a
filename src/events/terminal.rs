use crate::state::{InputTarget, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => {
                        if let Ok(CrosstermEvent::Key(key)) = event::read() {
                            // Windows reports releases too
                            if key.kind == KeyEventKind::Press
                                && tx_clone.send(Event::Input(key)).is_err()
                            {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(key, state)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    // Text inputs capture every other key
    if state.is_input_mode() {
        match key.code {
            KeyCode::Enter => state.submit_input(),
            KeyCode::Esc => state.cancel_input(),
            KeyCode::Backspace => state.input_backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.input_char(c)
            }
            _ => {}
        }
        return true;
    }

    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyCode::Char('1') => state.set_view(View::Home),
        KeyCode::Char('2') => state.set_view(View::Tasks),
        KeyCode::Char('3') => state.set_view(View::Posts),
        KeyCode::Tab => state.next_view(),
        KeyCode::BackTab => state.prev_view(),
        KeyCode::Char('t') => state.toggle_theme(),
        KeyCode::Char('L') => state.toggle_log(),
        _ => match state.current_view() {
            View::Home => handle_home_key(key, state),
            View::Tasks => handle_tasks_key(key, state),
            View::Posts => handle_posts_key(key, state),
        },
    }
    true
}

fn handle_home_key(key: KeyEvent, state: &mut State) {
    if key.code == KeyCode::Enter {
        state.set_view(View::Tasks);
    }
}

fn handle_tasks_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('i') => state.start_input(InputTarget::NewTask),
        KeyCode::Char('j') | KeyCode::Down => state.select_next_task(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev_task(),
        KeyCode::Char(' ') | KeyCode::Enter => state.toggle_selected_task(),
        KeyCode::Char('d') | KeyCode::Delete => state.delete_selected_task(),
        KeyCode::Char('f') => state.cycle_task_filter(),
        _ => {}
    }
}

fn handle_posts_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('/') => state.start_input(InputTarget::Search),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => state.next_page(),
        KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => state.prev_page(),
        KeyCode::Char('c') | KeyCode::Esc => state.clear_search(),
        KeyCode::Char('r') => state.retry_posts(),
        KeyCode::Char('j') | KeyCode::Down => state.select_next_post(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev_post(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFilter;

    fn press(state: &mut State, code: KeyCode) -> bool {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn type_text(state: &mut State, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = State::default();
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert!(!handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut state
        ));
    }

    #[test]
    fn view_switching() {
        let mut state = State::default();
        press(&mut state, KeyCode::Char('2'));
        assert_eq!(View::Tasks, state.current_view());
        press(&mut state, KeyCode::Tab);
        assert_eq!(View::Posts, state.current_view());
        press(&mut state, KeyCode::BackTab);
        press(&mut state, KeyCode::BackTab);
        assert_eq!(View::Home, state.current_view());
        press(&mut state, KeyCode::Enter);
        assert_eq!(View::Tasks, state.current_view());
    }

    #[test]
    fn theme_toggle_key() {
        let mut state = State::default();
        press(&mut state, KeyCode::Char('t'));
        assert!(state.is_dark_mode());
        press(&mut state, KeyCode::Char('t'));
        assert!(!state.is_dark_mode());
    }

    #[test]
    fn add_toggle_delete_task_by_keys() {
        let mut state = State::default();
        press(&mut state, KeyCode::Char('2'));
        press(&mut state, KeyCode::Char('a'));
        // Shortcut keys are plain text while typing
        type_text(&mut state, "quit the dog walk");
        press(&mut state, KeyCode::Enter);
        assert!(!state.is_input_mode());
        assert_eq!("quit the dog walk", state.visible_tasks()[0].text);

        press(&mut state, KeyCode::Char(' '));
        assert!(state.visible_tasks()[0].completed);

        press(&mut state, KeyCode::Char('f'));
        assert_eq!(TaskFilter::Active, state.get_task_filter());
        assert!(state.visible_tasks().is_empty());

        press(&mut state, KeyCode::Char('f'));
        press(&mut state, KeyCode::Char('d'));
        assert!(state.get_tasks().is_empty());
    }

    #[test]
    fn escape_cancels_new_task() {
        let mut state = State::default();
        press(&mut state, KeyCode::Char('2'));
        press(&mut state, KeyCode::Char('a'));
        type_text(&mut state, "draft");
        press(&mut state, KeyCode::Backspace);
        assert_eq!("draf", state.get_task_input());
        press(&mut state, KeyCode::Esc);
        assert!(!state.is_input_mode());
        assert!(state.get_tasks().is_empty());
    }

    #[test]
    fn search_key_enters_search_input() {
        let mut state = State::default();
        press(&mut state, KeyCode::Char('3'));
        press(&mut state, KeyCode::Char('/'));
        type_text(&mut state, "foo");
        assert_eq!("foo", state.get_search_input());
        press(&mut state, KeyCode::Enter);
        assert!(state.get_posts().is_searching());
        assert_eq!("foo", state.get_posts().query());

        press(&mut state, KeyCode::Char('c'));
        assert!(!state.get_posts().is_searching());
    }
}
