use crate::posts::{Fetched, PostsApi, PAGE_SIZE};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FetchPosts { token: u64, page: u32 },
    SearchPosts { token: u64, query: String },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a PostsApi,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a PostsApi) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::FetchPosts { token, page } => self.fetch_posts(token, page).await?,
            Event::SearchPosts { token, query } => self.search_posts(token, query).await?,
        }
        Ok(())
    }

    /// Update state with one page of posts.
    ///
    async fn fetch_posts(&mut self, token: u64, page: u32) -> Result<()> {
        info!("Fetching posts page {}...", page);
        let outcome = self.api.fetch_posts(page, PAGE_SIZE).await.map(Fetched::Page);
        match &outcome {
            Ok(Fetched::Page(page)) => info!(
                "Received {} posts ({} in total).",
                page.posts.len(),
                page.total
            ),
            Ok(_) => {}
            Err(e) => error!("Failed to fetch posts page {}: {}", page, e),
        }
        let mut state = self.state.lock().await;
        state.complete_posts_request(token, outcome);
        Ok(())
    }

    /// Update state with posts matching the query.
    ///
    async fn search_posts(&mut self, token: u64, query: String) -> Result<()> {
        info!("Searching posts for '{}'...", query);
        let outcome = self.api.search_posts(&query).await.map(Fetched::Search);
        match &outcome {
            Ok(Fetched::Search(posts)) => {
                info!("Search for '{}' matched {} posts.", query, posts.len())
            }
            Ok(_) => {}
            Err(e) => error!("Failed to search posts for '{}': {}", query, e),
        }
        let mut state = self.state.lock().await;
        state.complete_posts_request(token, outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::{LoadState, SEARCH_ERROR_MESSAGE};
    use httpmock::MockServer;
    use serde_json::json;
    use std::sync::mpsc;

    fn posts_json(ids: std::ops::RangeInclusive<u64>) -> serde_json::Value {
        json!(ids
            .map(|id| json!({ "id": id, "title": format!("title {}", id), "body": "" }))
            .collect::<Vec<_>>())
    }

    /// Build connected state and capture the next emitted network event.
    fn state_with_events() -> (Arc<Mutex<State>>, mpsc::Receiver<Event>) {
        use crate::storage::Store;
        use crate::ui::Appearance;
        let (tx, rx) = mpsc::channel();
        let store = Store::in_memory();
        let appearance = Appearance::new();
        let theme = crate::state::ThemeState::load(&store, appearance.clone());
        let state = State::builder()
            .store(store)
            .theme(theme, appearance)
            .net_sender(tx)
            .build()
            .unwrap();
        (Arc::new(Mutex::new(state)), rx)
    }

    #[tokio::test]
    async fn fetch_posts_updates_state() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/posts")
                    .query_param("_page", "1")
                    .query_param("_limit", "10");
                then.status(200)
                    .header("x-total-count", "25")
                    .json_body(posts_json(1..=10));
            })
            .await;

        let api = PostsApi::new(&server.base_url(), None)?;
        let (state, rx) = state_with_events();
        state.lock().await.load_page(1);
        let event = rx.try_recv()?;
        assert!(matches!(event, Event::FetchPosts { page: 1, .. }));

        Handler::new(&state, &api).handle(event).await?;
        mock.assert_async().await;

        let state = state.lock().await;
        let posts = state.get_posts();
        assert_eq!(LoadState::Loaded, *posts.load_state());
        assert_eq!(10, posts.posts().len());
        assert_eq!(Some(3), posts.page_count());
        assert!(posts.has_next_page());
        Ok(())
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_posts() -> Result<()> {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/posts").query_param("_page", "1");
                then.status(200)
                    .header("x-total-count", "100")
                    .json_body(posts_json(1..=10));
            })
            .await;
        let search_mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/posts").query_param("q", "foo");
                then.status(500);
            })
            .await;

        let api = PostsApi::new(&server.base_url(), None)?;
        let (state, rx) = state_with_events();
        let mut handler = Handler::new(&state, &api);

        state.lock().await.load_page(1);
        handler.handle(rx.try_recv()?).await?;
        state.lock().await.search("foo");
        handler.handle(rx.try_recv()?).await?;

        page_mock.assert_async().await;
        search_mock.assert_async().await;

        let state = state.lock().await;
        let posts = state.get_posts();
        assert_eq!(Some(SEARCH_ERROR_MESSAGE), posts.error());
        assert_eq!(10, posts.posts().len());
        assert!(posts.is_searching());
        Ok(())
    }

    #[tokio::test]
    async fn superseded_response_is_ignored() -> Result<()> {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/posts").query_param("_page", "1");
                then.status(200)
                    .header("x-total-count", "100")
                    .json_body(posts_json(1..=10));
            })
            .await;
        let search_mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/posts").query_param("q", "rare");
                then.status(200).json_body(posts_json(99..=99));
            })
            .await;

        let api = PostsApi::new(&server.base_url(), None)?;
        let (state, rx) = state_with_events();
        let mut handler = Handler::new(&state, &api);

        // Both requests are issued before either response arrives
        state.lock().await.load_page(1);
        state.lock().await.search("rare");
        let page_event = rx.try_recv()?;
        let search_event = rx.try_recv()?;

        handler.handle(search_event).await?;
        handler.handle(page_event).await?;
        page_mock.assert_async().await;
        search_mock.assert_async().await;

        let state = state.lock().await;
        let posts = state.get_posts();
        assert_eq!(vec![99], posts.posts().iter().map(|p| p.id).collect::<Vec<_>>());
        assert_eq!(None, posts.total());
        Ok(())
    }
}
