//! Paging and search state for the posts view.
//!
//! The browser never performs I/O. Operations that need data return a
//! [`PostRequest`] for the caller to execute; the outcome is handed back via
//! [`PostBrowser::complete`]. Each request carries a token and only the
//! outcome of the most recently issued request is applied, so a slow
//! response can never overwrite a newer one.

use super::{ApiError, Post, PostPage};
use log::*;

/// Number of posts per page.
pub const PAGE_SIZE: u32 = 10;

/// Message shown when a page fails to load.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch posts. Please try again later.";

/// Message shown when a search fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Failed to search posts. Please try again later.";

/// What a request asks the service for.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Page(u32),
    Search(String),
}

/// A request the caller has to execute against the posts service.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub token: u64,
    pub query: Query,
}

/// Successful outcome of a request.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Page(PostPage),
    Search(Vec<Post>),
}

/// Load progress of the displayed posts.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// State machine behind the posts view.
///
#[derive(Debug, Default)]
pub struct PostBrowser {
    load_state: LoadState,
    searching: bool,
    query: String,
    page: u32,
    total: Option<u64>,
    posts: Vec<Post>,
    last_token: u64,
    pending: Option<PostRequest>,
    failed: Option<Query>,
}

impl PostBrowser {
    pub fn new() -> Self {
        PostBrowser {
            page: 1,
            ..PostBrowser::default()
        }
    }

    /// Request page `page`. Rejected (returns `None`) while searching, for
    /// page 0, and past the last page once the total is known.
    ///
    pub fn load_page(&mut self, page: u32) -> Option<PostRequest> {
        if self.searching {
            debug!("Ignoring page {} request while searching.", page);
            return None;
        }
        if page < 1 {
            debug!("Ignoring request for page 0.");
            return None;
        }
        if let Some(count) = self.page_count() {
            if u64::from(page) > count.max(1) {
                debug!("Ignoring page {} request, only {} pages.", page, count);
                return None;
            }
        }
        self.page = page;
        Some(self.issue(Query::Page(page)))
    }

    /// Request the page after the current one, if there is one.
    ///
    pub fn next_page(&mut self) -> Option<PostRequest> {
        if !self.has_next_page() {
            return None;
        }
        self.load_page(self.page + 1)
    }

    /// Request the page before the current one, if there is one.
    ///
    pub fn prev_page(&mut self) -> Option<PostRequest> {
        if !self.has_prev_page() {
            return None;
        }
        self.load_page(self.page - 1)
    }

    /// Search for `query`. A blank query leaves search mode instead (and
    /// never issues a search request).
    ///
    pub fn search(&mut self, query: &str) -> Option<PostRequest> {
        let query = query.trim();
        if query.is_empty() {
            if self.searching {
                return Some(self.clear_search());
            }
            self.query.clear();
            return None;
        }
        self.searching = true;
        self.query = query.to_string();
        Some(self.issue(Query::Search(self.query.clone())))
    }

    /// Leave search mode and go back to the first page.
    ///
    pub fn clear_search(&mut self) -> PostRequest {
        self.searching = false;
        self.query.clear();
        self.page = 1;
        self.issue(Query::Page(1))
    }

    /// Re-issue the request that failed. Returns `None` unless in the
    /// failed state.
    ///
    pub fn retry(&mut self) -> Option<PostRequest> {
        if !matches!(self.load_state, LoadState::Failed(_)) {
            return None;
        }
        let query = self.failed.take()?;
        info!("Retrying {:?}...", query);
        if let Query::Page(page) = query {
            self.page = page;
        }
        Some(self.issue(query))
    }

    /// Apply the outcome of a request. Outcomes of anything but the latest
    /// request are dropped. Returns whether the outcome was applied.
    ///
    pub fn complete(&mut self, token: u64, outcome: Result<Fetched, ApiError>) -> bool {
        let request = match self.pending.take() {
            Some(request) if request.token == token => request,
            other => {
                debug!("Dropping stale posts response for request {}.", token);
                self.pending = other;
                return false;
            }
        };

        match outcome {
            Ok(Fetched::Page(page)) => {
                self.posts = page.posts;
                self.total = Some(page.total);
                self.load_state = LoadState::Loaded;
            }
            Ok(Fetched::Search(posts)) => {
                self.posts = posts;
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                let message = match request.query {
                    Query::Page(_) => FETCH_ERROR_MESSAGE,
                    Query::Search(_) => SEARCH_ERROR_MESSAGE,
                };
                warn!("Posts request {:?} failed: {}", request.query, e);
                self.failed = Some(request.query);
                self.load_state = LoadState::Failed(message.to_string());
            }
        }
        true
    }

    fn issue(&mut self, query: Query) -> PostRequest {
        self.last_token += 1;
        let request = PostRequest {
            token: self.last_token,
            query,
        };
        self.load_state = LoadState::Loading;
        self.failed = None;
        self.pending = Some(request.clone());
        request
    }

    /// Return whether another page follows the current one.
    ///
    pub fn has_next_page(&self) -> bool {
        match self.total {
            Some(total) if !self.searching => u64::from(self.page) * u64::from(PAGE_SIZE) < total,
            _ => false,
        }
    }

    /// Return whether a page precedes the current one.
    ///
    pub fn has_prev_page(&self) -> bool {
        !self.searching && self.page > 1
    }

    /// Return the number of pages, once a page has loaded.
    ///
    pub fn page_count(&self) -> Option<u64> {
        self.total
            .map(|total| total.div_ceil(u64::from(PAGE_SIZE)))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn is_idle(&self) -> bool {
        self.load_state == LoadState::Idle
    }

    /// Return the user-facing error message, if the last request failed.
    ///
    pub fn error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }
}
