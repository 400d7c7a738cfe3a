//! Remote posts module.
//!
//! This module contains:
//! - `PostsApi`, the typed client for the posts REST service
//! - `PostBrowser`, the paging/search state machine driven by the UI
//! - Post resources and API error types

mod browser;
mod client;
mod error;
mod resource;

pub use browser::{
    Fetched, LoadState, PostBrowser, PostRequest, Query, FETCH_ERROR_MESSAGE, PAGE_SIZE,
    SEARCH_ERROR_MESSAGE,
};
pub use error::ApiError;
pub use resource::{Post, PostPage};

use client::{parse_json, Client};
use log::*;
use std::time::Duration;

/// Base URL of the public posts service.
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Response header carrying the collection size of paged requests.
const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Responsible for asynchronous interaction with the posts service
/// including transformation of response data into explicitly-defined types.
///
pub struct PostsApi {
    client: Client,
}

impl PostsApi {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<PostsApi, ApiError> {
        debug!("Initializing posts client for {}...", base_url);
        Ok(PostsApi {
            client: Client::new(base_url, timeout)?,
        })
    }

    /// Returns one page of posts and the total number of posts.
    ///
    pub async fn fetch_posts(&self, page: u32, limit: u32) -> Result<PostPage, ApiError> {
        debug!("Requesting posts page {} (limit {})...", page, limit);
        let response = self
            .client
            .get(
                "posts",
                &[("_page", page.to_string()), ("_limit", limit.to_string())],
            )
            .await?;

        let total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .ok_or_else(|| ApiError::InvalidTotalCount("header missing".to_string()))?
            .to_str()
            .map_err(|e| ApiError::InvalidTotalCount(e.to_string()))?
            .trim()
            .parse::<u64>()
            .map_err(|e| ApiError::InvalidTotalCount(e.to_string()))?;

        let posts: Vec<Post> = parse_json(response).await?;
        debug!(
            "Retrieved {} posts for page {} of {} total.",
            posts.len(),
            page,
            total
        );
        Ok(PostPage { posts, total })
    }

    /// Returns the posts matching a free-text query.
    ///
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>, ApiError> {
        debug!("Searching posts for '{}'...", query);
        let posts: Vec<Post> = self
            .client
            .get_json("posts", &[("q", query.to_string())])
            .await?;
        debug!("Search for '{}' matched {} posts.", query, posts.len());
        Ok(posts)
    }

    /// Returns a single post.
    ///
    pub async fn fetch_post(&self, id: u64) -> Result<Post, ApiError> {
        debug!("Requesting post {}...", id);
        self.client.get_json(&format!("posts/{}", id), &[]).await
    }

    /// Returns the base URL requests are sent to.
    ///
    pub fn base_url(&self) -> &str {
        &self.client.base_url
    }
}
