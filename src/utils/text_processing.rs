//! Text processing utilities.
//!
//! Post bodies come back with hard line breaks; these helpers flatten them
//! into single-line previews that fit a list row.

use log::*;
use regex::Regex;
use std::sync::OnceLock;

const ELLIPSIS: char = '…';

static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();

/// Return the compiled whitespace pattern, built on first use.
///
fn whitespace() -> Option<&'static Regex> {
    WHITESPACE
        .get_or_init(|| match Regex::new(r"\s+") {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Failed to compile whitespace pattern: {}", e);
                None
            }
        })
        .as_ref()
}

/// Collapse every run of whitespace (newlines included) into one space and
/// trim both ends.
///
pub fn collapse_whitespace(text: &str) -> String {
    match whitespace() {
        Some(re) => re.replace_all(text.trim(), " ").to_string(),
        None => text.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Cut text to at most `max_chars` characters, ending with an ellipsis when
/// anything was dropped.
///
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut result: String = text.chars().take(max_chars - 1).collect();
    result.truncate(result.trim_end().len());
    result.push(ELLIPSIS);
    result
}

/// Single-line preview of a post body.
///
pub fn preview(text: &str, max_chars: usize) -> String {
    truncate(&collapse_whitespace(text), max_chars)
}
