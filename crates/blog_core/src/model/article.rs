//! Article aggregate model.
//!
//! # Responsibility
//! - Define the article document and its embedded comment sequence.
//! - Provide store-level validation with first-violation reporting.
//!
//! # Invariants
//! - `id` is stable and never reused for another article.
//! - `likes` only moves through [`Article::record_like`], one step per call.
//! - `comments` is append-only through [`Article::push_comment`].
//! - `created_at` is assigned once by the constructor.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier assigned to an article on creation.
pub type ArticleId = Uuid;

/// Minimum accepted title length, in characters after trimming.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum accepted title length, in characters after trimming.
pub const TITLE_MAX_CHARS: usize = 200;
/// Minimum accepted article body length, in characters after trimming.
pub const CONTENT_MIN_CHARS: usize = 10;

/// Field that failed store-level validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Content,
    Author,
    CommentAuthor,
    CommentContent,
}

impl ArticleField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Author => "author",
            Self::CommentAuthor => "comments.author",
            Self::CommentContent => "comments.content",
        }
    }
}

/// Constraint that a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Value is missing or empty after trimming.
    Required,
    /// Value is shorter than `min` characters.
    MinLength { min: usize },
    /// Value is longer than `max` characters.
    MaxLength { max: usize },
}

/// Store-level validation failure for article documents.
///
/// Only the first failing field is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleValidationError {
    pub field: ArticleField,
    pub rule: ValidationRule,
}

impl ArticleValidationError {
    fn new(field: ArticleField, rule: ValidationRule) -> Self {
        Self { field, rule }
    }
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field.as_str();
        match self.rule {
            ValidationRule::Required => write!(f, "{field} is required"),
            ValidationRule::MinLength { min } => {
                write!(f, "{field} is shorter than the minimum length of {min}")
            }
            ValidationRule::MaxLength { max } => {
                write!(f, "{field} is longer than the maximum length of {max}")
            }
        }
    }
}

impl Error for ArticleValidationError {}

/// Comment embedded in exactly one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub content: String,
    /// Unix epoch milliseconds, set when the comment is appended.
    pub created_at: i64,
}

impl Comment {
    /// Creates a comment stamped with the current time.
    ///
    /// Text fields are stored trimmed.
    pub fn new(author: &str, content: &str) -> Self {
        Self {
            author: author.trim().to_string(),
            content: content.trim().to_string(),
            created_at: now_epoch_ms(),
        }
    }

    /// Checks required fields in `content -> author` order.
    pub fn validate(&self) -> Result<(), ArticleValidationError> {
        require(&self.content, ArticleField::CommentContent)?;
        require(&self.author, ArticleField::CommentAuthor)?;
        Ok(())
    }
}

/// Article document: scalar fields plus the embedded comment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub likes: u64,
    pub comments: Vec<Comment>,
    /// Unix epoch milliseconds. Write-once.
    pub created_at: i64,
}

impl Article {
    /// Creates a fresh article with a generated id.
    ///
    /// # Invariants
    /// - Text fields are trimmed.
    /// - `likes` starts at 0 and `comments` starts empty.
    /// - This constructor does not validate; the store does.
    pub fn new(title: &str, content: &str, author: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            author: author.trim().to_string(),
            likes: 0,
            comments: Vec::new(),
            created_at: now_epoch_ms(),
        }
    }

    /// Validates the whole document, reporting the first violation.
    ///
    /// Check order: title, content, author, then comments in sequence order.
    pub fn validate(&self) -> Result<(), ArticleValidationError> {
        require(&self.title, ArticleField::Title)?;
        let title_chars = self.title.trim().chars().count();
        if title_chars < TITLE_MIN_CHARS {
            return Err(ArticleValidationError::new(
                ArticleField::Title,
                ValidationRule::MinLength {
                    min: TITLE_MIN_CHARS,
                },
            ));
        }
        if title_chars > TITLE_MAX_CHARS {
            return Err(ArticleValidationError::new(
                ArticleField::Title,
                ValidationRule::MaxLength {
                    max: TITLE_MAX_CHARS,
                },
            ));
        }

        require(&self.content, ArticleField::Content)?;
        if self.content.trim().chars().count() < CONTENT_MIN_CHARS {
            return Err(ArticleValidationError::new(
                ArticleField::Content,
                ValidationRule::MinLength {
                    min: CONTENT_MIN_CHARS,
                },
            ));
        }

        require(&self.author, ArticleField::Author)?;

        for comment in &self.comments {
            comment.validate()?;
        }

        Ok(())
    }

    /// Appends one comment at the end of the sequence.
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Increments the like counter by exactly one.
    pub fn record_like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }
}

fn require(value: &str, field: ArticleField) -> Result<(), ArticleValidationError> {
    if value.trim().is_empty() {
        return Err(ArticleValidationError::new(field, ValidationRule::Required));
    }
    Ok(())
}

/// Current wall clock time in unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{Article, ArticleField, Comment, ValidationRule};

    #[test]
    fn validation_error_message_names_field_and_rule() {
        let article = Article::new("Hi", "long enough body", "alice");
        let err = article.validate().expect_err("validation fails");
        assert_eq!(
            err.to_string(),
            "title is shorter than the minimum length of 3"
        );
    }

    #[test]
    fn comment_checks_content_before_author() {
        let comment = Comment::new("  ", "");
        let err = comment.validate().expect_err("validation fails");
        assert_eq!(err.field, ArticleField::CommentContent);
        assert_eq!(err.rule, ValidationRule::Required);
    }

    #[test]
    fn record_like_adds_exactly_one() {
        let mut article = Article::new("Title", "some long content", "bob");
        article.record_like();
        article.record_like();
        assert_eq!(article.likes, 2);
    }
}
