use super::{InputTarget, StateError, ThemeState, View};
use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::posts::{ApiError, Fetched, PostBrowser, PostRequest, Query};
use crate::storage::Store;
use crate::tasks::{Task, TaskFilter, TaskId, TaskList};
use crate::ui::{Appearance, Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    appearance: Appearance,
    theme: ThemeState,
    tasks: TaskList,
    task_filter: TaskFilter,
    tasks_list_state: ListState,
    posts: PostBrowser,
    posts_list_state: ListState,
    current_view: View,
    input_target: Option<InputTarget>,
    task_input: String,
    search_input: String,
    terminal_size: Rect,
    spinner_index: usize,
    log_visible: bool,
    logs: LogBuffer,
}

/// Assembles a `State` from its collaborators.
///
/// The theme is a precondition: building without one fails instead of
/// leaving consumers to discover a missing theme later.
///
#[derive(Default)]
pub struct StateBuilder {
    store: Option<Store>,
    theme: Option<ThemeState>,
    appearance: Option<Appearance>,
    net_sender: Option<NetworkEventSender>,
    logs: Option<LogBuffer>,
}

impl StateBuilder {
    pub fn store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// Provide the theme along with the appearance it applies to.
    ///
    pub fn theme(mut self, theme: ThemeState, appearance: Appearance) -> Self {
        self.theme = Some(theme);
        self.appearance = Some(appearance);
        self
    }

    pub fn net_sender(mut self, sender: NetworkEventSender) -> Self {
        self.net_sender = Some(sender);
        self
    }

    pub fn logs(mut self, logs: LogBuffer) -> Self {
        self.logs = Some(logs);
        self
    }

    pub fn build(self) -> Result<State, StateError> {
        let store = self.store.ok_or(StateError::StoreMissing)?;
        let theme = self.theme.ok_or(StateError::ThemeProviderMissing)?;
        let appearance = self.appearance.ok_or(StateError::ThemeProviderMissing)?;
        let tasks = TaskList::load(&store);
        let mut state = State {
            net_sender: self.net_sender,
            appearance,
            theme,
            tasks,
            task_filter: TaskFilter::All,
            tasks_list_state: ListState::default(),
            posts: PostBrowser::new(),
            posts_list_state: ListState::default(),
            current_view: View::Home,
            input_target: None,
            task_input: String::new(),
            search_input: String::new(),
            terminal_size: Rect::default(),
            spinner_index: 0,
            log_visible: false,
            logs: self.logs.unwrap_or_default(),
        };
        state.clamp_task_selection();
        Ok(state)
    }
}

impl State {
    pub fn builder() -> StateBuilder {
        StateBuilder::default()
    }

    // ----- Navigation -------------------------------------------------------

    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Switch to the view. The posts view fetches its first page on first
    /// visit.
    ///
    pub fn set_view(&mut self, view: View) {
        if self.current_view != view {
            debug!("Switching to {} view.", view.title());
        }
        self.input_target = None;
        self.current_view = view;
        if view == View::Posts && self.posts.is_idle() {
            self.load_page(1);
        }
    }

    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    // ----- Theme ------------------------------------------------------------

    pub fn is_dark_mode(&self) -> bool {
        self.theme.get_theme()
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle_theme();
    }

    pub fn get_theme_state(&self) -> &ThemeState {
        &self.theme
    }

    /// Return the palette currently applied.
    ///
    pub fn get_theme(&self) -> Theme {
        self.appearance.palette()
    }

    // ----- Text input -------------------------------------------------------

    pub fn input_target(&self) -> Option<InputTarget> {
        self.input_target
    }

    pub fn is_input_mode(&self) -> bool {
        self.input_target.is_some()
    }

    /// Start capturing keys into the input.
    ///
    pub fn start_input(&mut self, target: InputTarget) {
        if target == InputTarget::Search {
            self.search_input = self.posts.query().to_string();
        }
        self.input_target = Some(target);
    }

    /// Stop capturing keys. A new-task draft is discarded.
    ///
    pub fn cancel_input(&mut self) {
        if self.input_target == Some(InputTarget::NewTask) {
            self.task_input.clear();
        }
        self.input_target = None;
    }

    pub fn input_char(&mut self, c: char) {
        match self.input_target {
            Some(InputTarget::NewTask) => self.task_input.push(c),
            Some(InputTarget::Search) => self.search_input.push(c),
            None => {}
        }
    }

    pub fn input_backspace(&mut self) {
        match self.input_target {
            Some(InputTarget::NewTask) => {
                self.task_input.pop();
            }
            Some(InputTarget::Search) => {
                self.search_input.pop();
            }
            None => {}
        }
    }

    /// Submit the active input: add the drafted task or run the search.
    ///
    pub fn submit_input(&mut self) {
        match self.input_target.take() {
            Some(InputTarget::NewTask) => {
                let text = std::mem::take(&mut self.task_input);
                self.add_task(&text);
            }
            Some(InputTarget::Search) => {
                let query = self.search_input.clone();
                self.search(&query);
            }
            None => {}
        }
    }

    pub fn get_task_input(&self) -> &str {
        &self.task_input
    }

    pub fn get_search_input(&self) -> &str {
        &self.search_input
    }

    // ----- Tasks ------------------------------------------------------------

    pub fn get_tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn get_task_filter(&self) -> TaskFilter {
        self.task_filter
    }

    pub fn set_task_filter(&mut self, filter: TaskFilter) {
        self.task_filter = filter;
        self.clamp_task_selection();
    }

    pub fn cycle_task_filter(&mut self) {
        self.set_task_filter(self.task_filter.next());
    }

    /// Return the tasks passing the active filter.
    ///
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.filtered_view(self.task_filter)
    }

    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let id = self.tasks.add_task(text)?;
        self.clamp_task_selection();
        Some(id)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let toggled = self.tasks.toggle_task(id);
        self.clamp_task_selection();
        toggled
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let deleted = self.tasks.delete_task(id);
        self.clamp_task_selection();
        deleted
    }

    /// Return the id of the highlighted task.
    ///
    pub fn selected_task_id(&self) -> Option<TaskId> {
        let index = self.tasks_list_state.selected()?;
        self.visible_tasks().get(index).map(|t| t.id)
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.toggle_task(id);
        }
    }

    pub fn delete_selected_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.delete_task(id);
        }
    }

    pub fn select_next_task(&mut self) {
        let len = self.visible_tasks().len();
        select_next(&mut self.tasks_list_state, len);
    }

    pub fn select_prev_task(&mut self) {
        let len = self.visible_tasks().len();
        select_prev(&mut self.tasks_list_state, len);
    }

    pub fn get_tasks_list_state(&mut self) -> &mut ListState {
        &mut self.tasks_list_state
    }

    fn clamp_task_selection(&mut self) {
        let len = self.visible_tasks().len();
        clamp_selection(&mut self.tasks_list_state, len);
    }

    // ----- Posts ------------------------------------------------------------

    pub fn get_posts(&self) -> &PostBrowser {
        &self.posts
    }

    pub fn load_page(&mut self, page: u32) {
        let request = self.posts.load_page(page);
        self.dispatch(request);
    }

    pub fn next_page(&mut self) {
        let request = self.posts.next_page();
        self.dispatch(request);
    }

    pub fn prev_page(&mut self) {
        let request = self.posts.prev_page();
        self.dispatch(request);
    }

    pub fn search(&mut self, query: &str) {
        let request = self.posts.search(query);
        self.search_input = self.posts.query().to_string();
        self.dispatch(request);
    }

    pub fn clear_search(&mut self) {
        if !self.posts.is_searching() {
            return;
        }
        let request = self.posts.clear_search();
        self.search_input.clear();
        self.dispatch(Some(request));
    }

    pub fn retry_posts(&mut self) {
        let request = self.posts.retry();
        self.dispatch(request);
    }

    /// Apply the outcome of a posts request issued earlier.
    ///
    pub fn complete_posts_request(&mut self, token: u64, outcome: Result<Fetched, ApiError>) {
        if self.posts.complete(token, outcome) {
            let len = self.posts.posts().len();
            self.posts_list_state
                .select(if len == 0 { None } else { Some(0) });
        }
    }

    pub fn select_next_post(&mut self) {
        let len = self.posts.posts().len();
        select_next(&mut self.posts_list_state, len);
    }

    pub fn select_prev_post(&mut self) {
        let len = self.posts.posts().len();
        select_prev(&mut self.posts_list_state, len);
    }

    pub fn get_posts_list_state(&mut self) -> &mut ListState {
        &mut self.posts_list_state
    }

    /// Hand the request to the network thread. A request that cannot be
    /// sent fails right away so the view can offer a retry.
    ///
    fn dispatch(&mut self, request: Option<PostRequest>) {
        let Some(request) = request else {
            return;
        };
        let token = request.token;
        if let Err(e) = self.send(request) {
            error!("{}", e);
            self.complete_posts_request(token, Err(ApiError::Dispatch(e.to_string())));
        }
    }

    fn send(&self, request: PostRequest) -> Result<(), StateError> {
        let event = match request.query {
            Query::Page(page) => NetworkEvent::FetchPosts {
                token: request.token,
                page,
            },
            Query::Search(query) => NetworkEvent::SearchPosts {
                token: request.token,
                query,
            },
        };
        match &self.net_sender {
            Some(sender) => sender
                .send(event)
                .map_err(|e| StateError::DispatchFailed(e.to_string())),
            None => Err(StateError::DispatchFailed(format!(
                "no network handler attached for {:?}",
                event
            ))),
        }
    }

    // ----- Terminal ---------------------------------------------------------

    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advance the spinner by one frame.
    ///
    pub fn advance_spinner_index(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn toggle_log(&mut self) {
        self.log_visible = !self.log_visible;
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn get_log_entries(&self) -> Vec<String> {
        self.logs.entries()
    }
}

impl Default for State {
    fn default() -> Self {
        let store = Store::in_memory();
        let appearance = Appearance::new();
        let theme = ThemeState::load(&store, appearance.clone());
        State {
            net_sender: None,
            appearance,
            theme,
            tasks: TaskList::load(&store),
            task_filter: TaskFilter::All,
            tasks_list_state: ListState::default(),
            posts: PostBrowser::new(),
            posts_list_state: ListState::default(),
            current_view: View::Home,
            input_target: None,
            task_input: String::new(),
            search_input: String::new(),
            terminal_size: Rect::default(),
            spinner_index: 0,
            log_visible: false,
            logs: LogBuffer::default(),
        }
    }
}

fn select_next(list_state: &mut ListState, len: usize) {
    if len == 0 {
        list_state.select(None);
        return;
    }
    let next = match list_state.selected() {
        Some(i) if i + 1 < len => i + 1,
        Some(_) => 0,
        None => 0,
    };
    list_state.select(Some(next));
}

fn select_prev(list_state: &mut ListState, len: usize) {
    if len == 0 {
        list_state.select(None);
        return;
    }
    let prev = match list_state.selected() {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    };
    list_state.select(Some(prev));
}

fn clamp_selection(list_state: &mut ListState, len: usize) {
    let selected = match (list_state.selected(), len) {
        (_, 0) => None,
        (Some(i), len) => Some(i.min(len - 1)),
        (None, _) => Some(0),
    };
    list_state.select(selected);
}
