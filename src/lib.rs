//! A terminal task tracker with a paginated, searchable posts viewer.
//!
//! The state managers ([`tasks`], [`posts`], [`state::theme`]) persist
//! through [`storage`] and are driven by the terminal front end in [`app`].

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod posts;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod ui;
pub mod utils;
