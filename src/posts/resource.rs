use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Defines post data structure.
///
/// Fields beyond `id`, `title` and `body` are kept as-is in `extra`.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of posts plus the size of the whole collection.
///
#[derive(Clone, Debug, PartialEq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}
