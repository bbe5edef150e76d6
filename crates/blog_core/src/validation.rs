//! Boundary validation for incoming request bodies.
//!
//! # Responsibility
//! - Reject obviously incomplete input before it reaches the store.
//! - Report one human-readable reason, first failure wins.
//!
//! # Invariants
//! - Article checks run in `title -> content -> author` order.
//! - Comment checks run in `content -> author` order.
//! - Length bounds are not checked here; `Article::validate` owns them.

use serde::Deserialize;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const CONTENT_REQUIRED: &str = "Content is required";
pub const AUTHOR_REQUIRED: &str = "Author is required";
pub const COMMENT_CONTENT_REQUIRED: &str = "Comment content is required";
pub const COMMENT_AUTHOR_REQUIRED: &str = "Comment author is required";
pub const SEARCH_QUERY_REQUIRED: &str = "Query parameter is required and must be a string";

/// Request body for article creation. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Request body for adding a comment. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Returns the first missing article field message, or `None` when complete.
pub fn validate_article_input(draft: &ArticleDraft) -> Option<&'static str> {
    if is_blank(draft.title.as_deref()) {
        return Some(TITLE_REQUIRED);
    }
    if is_blank(draft.content.as_deref()) {
        return Some(CONTENT_REQUIRED);
    }
    if is_blank(draft.author.as_deref()) {
        return Some(AUTHOR_REQUIRED);
    }
    None
}

/// Returns the first missing comment field message, or `None` when complete.
pub fn validate_comment_input(draft: &CommentDraft) -> Option<&'static str> {
    if is_blank(draft.content.as_deref()) {
        return Some(COMMENT_CONTENT_REQUIRED);
    }
    if is_blank(draft.author.as_deref()) {
        return Some(COMMENT_AUTHOR_REQUIRED);
    }
    None
}

/// Returns the rejection message for a missing or blank search query.
pub fn validate_search_query(query: Option<&str>) -> Option<&'static str> {
    if is_blank(query) {
        return Some(SEARCH_QUERY_REQUIRED);
    }
    None
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}
